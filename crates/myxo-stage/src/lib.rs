//! Stage trait and execution context for the Myxo simulation.
//!
//! A tick is a fixed sequence of stages, each a stateless per-cell transfer
//! function over the double-buffered field store. The `Stage` trait declares
//! field dependencies up front so the pipeline can be validated once at
//! startup; `StepContext` hands each invocation split-borrow access to the
//! frozen tick-start view, the in-tick overlay, and the stage's own write
//! buffers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod context;
mod pipeline;
mod stage;

pub use context::StepContext;
pub use pipeline::{validate_pipeline, PipelineError, StagePlan, WriteConflict};
pub use stage::{Stage, WriteMode};
