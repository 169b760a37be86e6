//! Agent point deposition into the trail.
//!
//! Stamps every live agent into the cell containing its freshly updated
//! position, on top of a copy of the previous trail. The stamp color encodes
//! the agent's heading so downstream display (and, through channel 0, the
//! sensors themselves) can tell flows apart.
//!
//! Constructed via the builder pattern: [`TrailDeposit::builder`].

use myxo_core::{fract, FieldId, FieldSet, StageError};
use myxo_space::AgentLayout;
use myxo_stage::{Stage, StepContext, WriteMode};

/// How colliding stamps combine when several agents land on one cell.
///
/// Agents are processed in index order, so `Replace` is last-write-wins in
/// that order. The distinction washes out after a diffusion pass either way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Blend {
    /// Overwrite the cell with the latest stamp.
    #[default]
    Replace,
    /// Sum stamps into the cell.
    Accumulate,
}

/// The deposition stage.
///
/// Reads the current-tick particle store (staged by the update stage) and the
/// previous-tick trail; writes the composite in full.
#[derive(Debug)]
pub struct TrailDeposit {
    particles: FieldId,
    trail: FieldId,
    output: FieldId,
    blend: Blend,
}

/// Builder for [`TrailDeposit`]. The three fields are required.
pub struct TrailDepositBuilder {
    particles: Option<FieldId>,
    trail: Option<FieldId>,
    output: Option<FieldId>,
    blend: Blend,
}

impl TrailDeposit {
    /// Create a new builder.
    pub fn builder() -> TrailDepositBuilder {
        TrailDepositBuilder {
            particles: None,
            trail: None,
            output: None,
            blend: Blend::default(),
        }
    }
}

impl TrailDepositBuilder {
    /// Set the particle store field (read through the in-tick overlay).
    pub fn particles(mut self, field: FieldId) -> Self {
        self.particles = Some(field);
        self
    }

    /// Set the previous trail field the composite is seeded from.
    pub fn trail(mut self, field: FieldId) -> Self {
        self.trail = Some(field);
        self
    }

    /// Set the composite output field.
    pub fn output(mut self, field: FieldId) -> Self {
        self.output = Some(field);
        self
    }

    /// Set the stamp collision policy (default: [`Blend::Replace`]).
    pub fn blend(mut self, blend: Blend) -> Self {
        self.blend = blend;
        self
    }

    /// Build the stage.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any field is not set.
    pub fn build(self) -> Result<TrailDeposit, String> {
        Ok(TrailDeposit {
            particles: self
                .particles
                .ok_or_else(|| "particles field is required".to_string())?,
            trail: self
                .trail
                .ok_or_else(|| "trail field is required".to_string())?,
            output: self
                .output
                .ok_or_else(|| "output field is required".to_string())?,
            blend: self.blend,
        })
    }
}

impl Stage for TrailDeposit {
    fn name(&self) -> &str {
        "trail_deposit"
    }

    fn reads(&self) -> FieldSet {
        [self.particles].into_iter().collect()
    }

    fn reads_previous(&self) -> FieldSet {
        [self.trail].into_iter().collect()
    }

    fn writes(&self) -> Vec<(FieldId, WriteMode)> {
        vec![(self.output, WriteMode::Full)]
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StageError> {
        let grid = ctx.grid().clone();
        let params = ctx.params().clone();
        let layout = AgentLayout::new(params.agent_count, grid.width());

        let particles = ctx
            .reads()
            .read(self.particles)
            .ok_or(StageError::FieldUnavailable {
                field: self.particles,
            })?
            .to_vec();
        let prev_trail = ctx
            .reads_previous()
            .read(self.trail)
            .ok_or(StageError::FieldUnavailable { field: self.trail })?
            .to_vec();

        let out = ctx
            .writes()
            .write(self.output)
            .ok_or(StageError::FieldUnavailable { field: self.output })?;

        let n = out.len().min(prev_trail.len());
        out[..n].copy_from_slice(&prev_trail[..n]);
        out[n..].fill(0.0);

        for agent_idx in 0..params.agent_count {
            let Some(agent) = layout.read_agent(&particles, agent_idx) else {
                continue;
            };

            let dir = fract(agent.heading + params.color_offset);
            let mut color = params.color_mode.channels(dir);
            if params.follow_mouse {
                let strength = 1.0 / (agent.position.distance(params.mouse_position) + 1.0);
                for channel in &mut color {
                    *channel *= strength;
                }
            }

            let base = grid.cell_containing(agent.position) * 4;
            let Some(texel) = out.get_mut(base..base + 4) else {
                continue;
            };
            match self.blend {
                Blend::Replace => texel.copy_from_slice(&color),
                Blend::Accumulate => {
                    for (slot, channel) in texel.iter_mut().zip(color) {
                        *slot += channel;
                    }
                }
            }
        }

        Ok(())
    }
}
