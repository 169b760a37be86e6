//! Reference stages for the Myxo simulation.
//!
//! One tick is three stages in fixed order:
//!
//! 1. [`ParticleUpdate`] — move every agent and steer it by its three trail
//!    sensors, writing the next particle store.
//! 2. [`TrailDeposit`] — stamp every agent's heading-colored point into the
//!    trail, on top of the previous trail (the composite).
//! 3. [`TrailDiffuse`] — 5-tap box blur plus exponential decay over the
//!    composite, producing the trail the next tick senses.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod fields;
mod particle_update;
mod trail_deposit;
mod trail_diffuse;

pub use fields::{simulation_fields, PARTICLES, TRAIL, TRAIL_COMPOSITE};
pub use particle_update::{ParticleUpdate, ParticleUpdateBuilder};
pub use trail_deposit::{Blend, TrailDeposit, TrailDepositBuilder};
pub use trail_diffuse::{TrailDiffuse, TrailDiffuseBuilder};
