//! Trail diffusion and decay.
//!
//! Replaces every cell with the decayed average of itself and its four
//! cardinal neighbors. A fixed 5-tap box filter, not a true Gaussian — the
//! uniform per-cell cost is the point. Run every tick against the decay, it
//! settles into the moving equilibrium that makes filaments visible.
//!
//! Constructed via the builder pattern: [`TrailDiffuse::builder`].

use myxo_core::{FieldId, FieldSet, StageError};
use myxo_stage::{Stage, StepContext, WriteMode};

/// The diffusion stage.
///
/// Reads the composite staged earlier in the tick (through the in-tick
/// overlay); writes the next trail in full. Color channels 0-2 are averaged
/// and decayed; channel 3 is pinned to 1.0. Neighbors past the grid edge
/// resolve per the grid's [`EdgeBehavior`](myxo_space::EdgeBehavior): wrapped,
/// clamped onto the boundary cell, or absorbed (contributing zero).
#[derive(Debug)]
pub struct TrailDiffuse {
    input: FieldId,
    output: FieldId,
}

/// Builder for [`TrailDiffuse`]. Both fields are required.
pub struct TrailDiffuseBuilder {
    input: Option<FieldId>,
    output: Option<FieldId>,
}

impl TrailDiffuse {
    /// Create a new builder.
    pub fn builder() -> TrailDiffuseBuilder {
        TrailDiffuseBuilder {
            input: None,
            output: None,
        }
    }
}

impl TrailDiffuseBuilder {
    /// Set the composite field to diffuse.
    pub fn input(mut self, field: FieldId) -> Self {
        self.input = Some(field);
        self
    }

    /// Set the trail field to write.
    pub fn output(mut self, field: FieldId) -> Self {
        self.output = Some(field);
        self
    }

    /// Build the stage.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either field is not set.
    pub fn build(self) -> Result<TrailDiffuse, String> {
        Ok(TrailDiffuse {
            input: self
                .input
                .ok_or_else(|| "input field is required".to_string())?,
            output: self
                .output
                .ok_or_else(|| "output field is required".to_string())?,
        })
    }
}

impl Stage for TrailDiffuse {
    fn name(&self) -> &str {
        "trail_diffuse"
    }

    fn reads(&self) -> FieldSet {
        [self.input].into_iter().collect()
    }

    fn writes(&self) -> Vec<(FieldId, WriteMode)> {
        vec![(self.output, WriteMode::Full)]
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StageError> {
        let grid = ctx.grid().clone();
        let retain = 1.0 - ctx.params().decay_rate;

        let prev = ctx
            .reads()
            .read(self.input)
            .ok_or(StageError::FieldUnavailable { field: self.input })?
            .to_vec();

        let out = ctx
            .writes()
            .write(self.output)
            .ok_or(StageError::FieldUnavailable { field: self.output })?;

        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let i = grid.index(col, row);
                let neighbours = grid.neighbours4(col as i32, row as i32);
                for channel in 0..3 {
                    let mut sum = prev[i * 4 + channel];
                    for neighbour in neighbours {
                        sum += neighbour.map(|j| prev[j * 4 + channel]).unwrap_or(0.0);
                    }
                    out[i * 4 + channel] = sum / 5.0 * retain;
                }
                out[i * 4 + 3] = 1.0;
            }
        }

        Ok(())
    }
}
