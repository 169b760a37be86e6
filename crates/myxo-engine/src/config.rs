//! Simulation configuration and validation.

use std::error::Error;
use std::fmt;

use myxo_core::TickParams;
use myxo_space::{Agent, EdgeBehavior, SpaceError};
use myxo_stage::PipelineError;
use myxo_stages::Blend;

/// Where the initial agent population goes.
///
/// All randomized placements draw from the ChaCha stream seeded by
/// [`SimConfig::seed`], so a configuration reproduces its run exactly.
#[derive(Clone, Debug)]
pub enum Seeding {
    /// Uniform placement inside a centered square covering `extent` of each
    /// axis, with uniform random headings. The reference bootstrap: a dense
    /// blob that collapses into filaments.
    Block {
        /// Side length of the square in field-normalized units, (0, 1].
        extent: f32,
    },
    /// Uniform placement over the whole field with uniform random headings.
    Uniform,
    /// Caller-fixed positions and headings, one entry per agent.
    Explicit(Vec<Agent>),
}

impl Default for Seeding {
    fn default() -> Self {
        Self::Block { extent: 0.25 }
    }
}

/// Construction-time configuration for a [`Simulation`](crate::Simulation).
///
/// Structural values are validated once at construction; the numeric tuning
/// inside `params` is deliberately not — bad tuning makes bad pictures, not
/// crashes.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Trail field width in cells.
    pub width: u32,
    /// Trail field height in cells.
    pub height: u32,
    /// Edge policy for the diffusion stencil. Agents always wrap.
    pub edge: EdgeBehavior,
    /// Number of agents.
    pub agent_count: u32,
    /// Master seed for initial placement and per-tick reseeding.
    pub seed: u64,
    /// Initial agent placement.
    pub seeding: Seeding,
    /// Stamp collision policy for the deposit stage.
    pub blend: Blend,
    /// Initial tuning; `agent_count` is overridden from this config.
    pub params: TickParams,
    /// Derive a fresh hash seed from the master stream every tick. Disable
    /// to drive `params.random_seed` by hand.
    pub auto_reseed: bool,
}

impl SimConfig {
    /// A configuration with stock tuning.
    pub fn new(width: u32, height: u32, agent_count: u32) -> Self {
        Self {
            width,
            height,
            edge: EdgeBehavior::Wrap,
            agent_count,
            seed: 0,
            seeding: Seeding::default(),
            blend: Blend::default(),
            params: TickParams::default(),
            auto_reseed: true,
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.agent_count == 0 {
            return Err(ConfigError::NoAgents);
        }
        match &self.seeding {
            Seeding::Block { extent } => {
                if !extent.is_finite() || *extent <= 0.0 || *extent > 1.0 {
                    return Err(ConfigError::SeedingExtentInvalid { value: *extent });
                }
            }
            Seeding::Explicit(agents) => {
                if agents.len() != self.agent_count as usize {
                    return Err(ConfigError::SeedingCountMismatch {
                        expected: self.agent_count as usize,
                        actual: agents.len(),
                    });
                }
            }
            Seeding::Uniform => {}
        }
        Ok(())
    }
}

/// Errors detected while constructing a simulation.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// A field dimension was zero.
    EmptyGrid,
    /// The agent count was zero.
    NoAgents,
    /// A `Seeding::Block` extent outside (0, 1].
    SeedingExtentInvalid {
        /// The offending extent.
        value: f32,
    },
    /// `Seeding::Explicit` did not provide exactly one entry per agent.
    SeedingCountMismatch {
        /// The configured agent count.
        expected: usize,
        /// Entries provided.
        actual: usize,
    },
    /// A stage builder rejected its configuration.
    Stage(String),
    /// Grid construction failed.
    Space(SpaceError),
    /// Stage pipeline validation failed.
    Pipeline(PipelineError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "field dimensions must be non-zero"),
            Self::NoAgents => write!(f, "agent count must be non-zero"),
            Self::SeedingExtentInvalid { value } => {
                write!(f, "seeding extent must be in (0, 1], got {value}")
            }
            Self::SeedingCountMismatch { expected, actual } => {
                write!(
                    f,
                    "explicit seeding needs {expected} agents, got {actual}"
                )
            }
            Self::Stage(reason) => write!(f, "stage configuration: {reason}"),
            Self::Space(err) => write!(f, "space: {err}"),
            Self::Pipeline(err) => write!(f, "pipeline: {err}"),
        }
    }
}

impl Error for ConfigError {}

impl From<SpaceError> for ConfigError {
    fn from(err: SpaceError) -> Self {
        Self::Space(err)
    }
}

impl From<PipelineError> for ConfigError {
    fn from(err: PipelineError) -> Self {
        Self::Pipeline(err)
    }
}
