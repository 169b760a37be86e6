//! Myxo: a deterministic slime-mold (Physarum) simulation.
//!
//! A population of point agents moves over a toroidal 2D field, deposits a
//! colored trail, senses the decaying trail ahead, and steers toward higher
//! concentrations — self-organizing into filament networks. This facade
//! crate re-exports the public API from all Myxo sub-crates; for most users,
//! depending on `myxo` alone is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use myxo::prelude::*;
//!
//! let mut config = SimConfig::new(128, 128, 2_000);
//! config.seed = 7;
//! let mut sim = Simulation::new(config).unwrap();
//!
//! // Tune between ticks the way a UI slider would.
//! sim.params_mut().set_sensor_angle(35f32.to_radians());
//!
//! for _ in 0..60 {
//!     sim.tick().unwrap();
//! }
//!
//! let snapshot = sim.snapshot();
//! assert_eq!(snapshot.tick_id().0, 60);
//! assert_eq!(snapshot.agents().count(), 2_000);
//! assert!(snapshot.trail().iter().any(|&v| v > 0.0));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `myxo-core` | IDs, field definitions, traits, codec, hash random, per-tick parameters |
//! | [`space`] | `myxo-space` | Toroidal grid and the packed agent layout |
//! | [`stage`] | `myxo-stage` | Stage trait, step context, pipeline validation |
//! | [`stages`] | `myxo-stages` | The particle update / deposit / diffuse stages |
//! | [`engine`] | `myxo-engine` | Lockstep engine, configuration, snapshots |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, the texel codec, and per-tick parameters (`myxo-core`).
pub use myxo_core as types;

/// Toroidal grid and packed agent layout (`myxo-space`).
pub use myxo_space as space;

/// Stage trait, step context, and pipeline validation (`myxo-stage`).
///
/// The [`stage::Stage`] trait is the extension point for custom transfer
/// functions.
pub use myxo_stage as stage;

/// Reference stages (`myxo-stages`).
///
/// [`stages::ParticleUpdate`], [`stages::TrailDeposit`], and
/// [`stages::TrailDiffuse`], plus the field registry.
pub use myxo_stages as stages;

/// Lockstep simulation engine (`myxo-engine`).
pub use myxo_engine as engine;

/// Common imports for typical Myxo usage.
///
/// ```rust
/// use myxo::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use myxo_core::{
        ColorMode, FieldDef, FieldId, FieldReader, FieldSet, FieldType, FieldWriter, TickId,
        TickParams,
    };

    // Errors
    pub use myxo_core::{StageError, StepError};

    // Space
    pub use myxo_space::{Agent, AgentLayout, EdgeBehavior, Grid2D};

    // Stages
    pub use myxo_stage::{Stage, StepContext, WriteMode};
    pub use myxo_stages::{
        Blend, ParticleUpdate, TrailDeposit, TrailDiffuse, PARTICLES, TRAIL, TRAIL_COMPOSITE,
    };

    // Engine
    pub use myxo_engine::{
        ConfigError, Seeding, SimConfig, Simulation, Snapshot, TickMetrics,
    };
}
