//! Lockstep simulation engine for Myxo.
//!
//! [`Simulation`] owns the grid, the double-buffered field store, and the
//! three reference stages, and advances them one atomic tick at a time. Each
//! tick the engine derives a fresh random seed, runs the stages in order over
//! split read/write views, and publishes the staged buffers; a stage failure
//! abandons the staged tick without touching the published state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod config;
mod metrics;
mod seeding;
mod simulation;
mod snapshot;
mod store;

pub use config::{ConfigError, Seeding, SimConfig};
pub use metrics::TickMetrics;
pub use simulation::Simulation;
pub use snapshot::Snapshot;
