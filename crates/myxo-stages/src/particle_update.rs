//! Agent movement and sensor steering.
//!
//! Produces the next particle store from the previous store and trail. Every
//! texel of the packed grid is recomputed independently: even texels advance
//! their agent's position along its heading, odd texels re-aim the heading
//! from three trail probes. Both halves read the same frozen tick-start
//! state, so the two sub-updates cannot observe each other mid-tick.
//!
//! Constructed via the builder pattern: [`ParticleUpdate::builder`].

use std::f32::consts::TAU;

use glam::Vec2;

use myxo_core::{encode, fract, random, FieldId, FieldSet, StageError, TickParams};
use myxo_space::{AgentLayout, Grid2D};
use myxo_stage::{Stage, StepContext, WriteMode};

/// The movement/steering stage.
///
/// Reads the previous-tick particle store and trail; writes the next
/// particle store in full. Texels past `2 * agent_count` are zeroed padding.
/// Positions and headings wrap into [0,1) — the field is a torus, and wrap
/// is the only boundary policy.
#[derive(Debug)]
pub struct ParticleUpdate {
    particles: FieldId,
    trail: FieldId,
}

/// Builder for [`ParticleUpdate`]. Both fields are required.
pub struct ParticleUpdateBuilder {
    particles: Option<FieldId>,
    trail: Option<FieldId>,
}

impl ParticleUpdate {
    /// Create a new builder.
    pub fn builder() -> ParticleUpdateBuilder {
        ParticleUpdateBuilder {
            particles: None,
            trail: None,
        }
    }

    /// Trail intensity at a normalized coordinate, channel 0, wrapped.
    fn sample_trail(trail: &[f32], grid: &Grid2D, coord: Vec2) -> f32 {
        let cell = grid.cell_containing(coord);
        trail.get(cell * 4).copied().unwrap_or(0.0)
    }

    /// The ordered steering decision table.
    ///
    /// Probes sit `sensor_distance` cells ahead along `v`, at the configured
    /// half-angle to either side. Priority order matters: a clear gradient
    /// wins, an ambiguous both-sides-high reading breaks the tie with the
    /// position hash, anything else leaves the heading alone.
    fn turn_delta(trail: &[f32], grid: &Grid2D, params: &TickParams, p: Vec2, v: Vec2) -> f32 {
        let sensor = v * params.sensor_distance * grid.cell_size();
        let left = Self::sample_trail(trail, grid, p + params.sensor_inv_rotation * sensor);
        let center = Self::sample_trail(trail, grid, p + sensor);
        let right = Self::sample_trail(trail, grid, p + params.sensor_rotation * sensor);

        if right > center && center > left {
            params.turn_speed
        } else if left > center && center > right {
            -params.turn_speed
        } else if right > center && left > center {
            let toss = random(p, grid.size(), params.random_seed);
            let sign = if toss >= 0.5 { 1.0 } else { -1.0 };
            sign * params.randomness * params.turn_speed
        } else {
            0.0
        }
    }
}

impl ParticleUpdateBuilder {
    /// Set the particle store field (read previous, written next).
    pub fn particles(mut self, field: FieldId) -> Self {
        self.particles = Some(field);
        self
    }

    /// Set the trail field sensed by the steering probes.
    pub fn trail(mut self, field: FieldId) -> Self {
        self.trail = Some(field);
        self
    }

    /// Build the stage.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either field is not set.
    pub fn build(self) -> Result<ParticleUpdate, String> {
        Ok(ParticleUpdate {
            particles: self
                .particles
                .ok_or_else(|| "particles field is required".to_string())?,
            trail: self
                .trail
                .ok_or_else(|| "trail field is required".to_string())?,
        })
    }
}

impl Stage for ParticleUpdate {
    fn name(&self) -> &str {
        "particle_update"
    }

    fn reads_previous(&self) -> FieldSet {
        [self.particles, self.trail].into_iter().collect()
    }

    fn writes(&self) -> Vec<(FieldId, WriteMode)> {
        vec![(self.particles, WriteMode::Full)]
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StageError> {
        let grid = ctx.grid().clone();
        let params = ctx.params().clone();
        // Layout is pure arithmetic over the per-tick agent count; nothing
        // about it is cached between invocations.
        let layout = AgentLayout::new(params.agent_count, grid.width());

        let prev_particles = ctx
            .reads_previous()
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
            .write(self.particles)
            .ok_or(StageError::FieldUnavailable {
                field: self.particles,
            })?;

        let texel_count = out.len() / AgentLayout::CHANNELS;
        for texel in 0..texel_count {
            let base = texel * AgentLayout::CHANNELS;
            let slot = &mut out[base..base + AgentLayout::CHANNELS];

            let agent = layout
                .is_live(texel)
                .then(|| layout.read_agent(&prev_particles, layout.agent_of(texel)))
                .flatten();
            let Some(agent) = agent else {
                slot.fill(0.0);
                continue;
            };

            let theta = TAU * agent.heading;
            let v = Vec2::new(theta.cos(), theta.sin());

            if layout.is_position_texel(texel) {
                let moved = agent.position + v * params.move_speed;
                let pos = Vec2::new(fract(moved.x), fract(moved.y));
                let (x_hi, x_lo) = encode(pos.x);
                let (y_hi, y_lo) = encode(pos.y);
                slot.copy_from_slice(&[x_hi, x_lo, y_hi, y_lo]);
            } else {
                let delta = Self::turn_delta(&prev_trail, &grid, &params, agent.position, v);
                let heading = fract(agent.heading + delta);
                let (h_hi, h_lo) = encode(heading);
                slot.copy_from_slice(&[h_hi, h_lo, 1.0, 1.0]);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myxo_core::{decode, TickId};
    use myxo_space::EdgeBehavior;
    use myxo_test_utils::{MockFieldReader, MockFieldWriter};
    use proptest::prelude::*;

    const F_PARTICLES: FieldId = FieldId(0);
    const F_TRAIL: FieldId = FieldId(1);

    fn stage() -> ParticleUpdate {
        ParticleUpdate::builder()
            .particles(F_PARTICLES)
            .trail(F_TRAIL)
            .build()
            .unwrap()
    }

    fn make_ctx<'a>(
        reader: &'a MockFieldReader,
        writer: &'a mut MockFieldWriter,
        grid: &'a Grid2D,
        params: &'a TickParams,
    ) -> StepContext<'a> {
        StepContext::new(reader, reader, writer, grid, TickId(1), params)
    }

    /// Pack one agent into a fresh store buffer sized by `layout`.
    fn packed_store(layout: &AgentLayout, agents: &[(Vec2, f32)]) -> Vec<f32> {
        let mut buf = vec![0.0f32; layout.slots()];
        for (i, &(position, heading)) in agents.iter().enumerate() {
            layout.write_agent(
                &mut buf,
                i as u32,
                myxo_space::Agent { position, heading },
            );
        }
        buf
    }

    fn read_back(layout: &AgentLayout, writer: &MockFieldWriter, agent: u32) -> myxo_space::Agent {
        layout
            .read_agent(writer.get_field(F_PARTICLES).unwrap(), agent)
            .unwrap()
    }

    #[test]
    fn builder_requires_both_fields() {
        assert!(ParticleUpdate::builder().particles(F_PARTICLES).build().is_err());
        assert!(ParticleUpdate::builder().trail(F_TRAIL).build().is_err());
        let stage = stage();
        assert_eq!(stage.name(), "particle_update");
        assert_eq!(stage.writes(), vec![(F_PARTICLES, WriteMode::Full)]);
        assert!(stage.reads().is_empty());
        assert_eq!(stage.reads_previous().len(), 2);
    }

    #[test]
    fn agent_advances_along_heading() {
        let grid = Grid2D::new(16, 16, EdgeBehavior::Wrap).unwrap();
        let mut params = TickParams::for_agents(1);
        params.move_speed = 0.01;
        let layout = AgentLayout::new(1, grid.width());

        let mut reader = MockFieldReader::new();
        reader.set_field(
            F_PARTICLES,
            packed_store(&layout, &[(Vec2::new(0.5, 0.5), 0.0)]),
        );
        reader.set_field(F_TRAIL, vec![0.0; grid.cell_count() * 4]);

        let mut writer = MockFieldWriter::new();
        writer.add_field(F_PARTICLES, layout.slots());

        let mut ctx = make_ctx(&reader, &mut writer, &grid, &params);
        stage().step(&mut ctx).unwrap();

        let agent = read_back(&layout, &writer, 0);
        // Heading 0 points along +x.
        assert!((agent.position.x - 0.51).abs() <= 1.0 / 65025.0 + 1e-6);
        assert!((agent.position.y - 0.5).abs() <= 1.0 / 65025.0 + 1e-6);
        // Zero trail: every probe reads zero, no branch fires, heading holds.
        assert_eq!(agent.heading, 0.0);
    }

    #[test]
    fn position_wraps_at_the_seam() {
        let grid = Grid2D::new(16, 16, EdgeBehavior::Wrap).unwrap();
        let mut params = TickParams::for_agents(1);
        params.move_speed = 0.05;
        let layout = AgentLayout::new(1, grid.width());

        let mut reader = MockFieldReader::new();
        reader.set_field(
            F_PARTICLES,
            packed_store(&layout, &[(Vec2::new(254.0 / 255.0, 0.5), 0.0)]),
        );
        reader.set_field(F_TRAIL, vec![0.0; grid.cell_count() * 4]);
        let mut writer = MockFieldWriter::new();
        writer.add_field(F_PARTICLES, layout.slots());

        let mut ctx = make_ctx(&reader, &mut writer, &grid, &params);
        stage().step(&mut ctx).unwrap();

        let agent = read_back(&layout, &writer, 0);
        assert!((0.0..1.0).contains(&agent.position.x));
        // 254/255 + 0.05 wraps to ~0.046.
        assert!((agent.position.x - (254.0 / 255.0 + 0.05 - 1.0)).abs() < 1e-3);
    }

    /// Trail with a single hot cell at the given probe target.
    fn trail_with(grid: &Grid2D, cells: &[(Vec2, f32)]) -> Vec<f32> {
        let mut trail = vec![0.0f32; grid.cell_count() * 4];
        for &(coord, value) in cells {
            trail[grid.cell_containing(coord) * 4] = value;
        }
        trail
    }

    /// Probe coordinates for an agent at `p` with heading 0 (v = +x).
    fn probes(grid: &Grid2D, params: &TickParams, p: Vec2) -> (Vec2, Vec2, Vec2) {
        let sensor = Vec2::new(1.0, 0.0) * params.sensor_distance * grid.cell_size();
        (
            p + params.sensor_inv_rotation * sensor,
            p + sensor,
            p + params.sensor_rotation * sensor,
        )
    }

    fn run_single_agent(grid: &Grid2D, params: &TickParams, trail: Vec<f32>) -> myxo_space::Agent {
        let layout = AgentLayout::new(1, grid.width());
        let mut reader = MockFieldReader::new();
        reader.set_field(
            F_PARTICLES,
            packed_store(&layout, &[(Vec2::new(0.5, 0.5), 0.0)]),
        );
        reader.set_field(F_TRAIL, trail);
        let mut writer = MockFieldWriter::new();
        writer.add_field(F_PARTICLES, layout.slots());
        let mut ctx = make_ctx(&reader, &mut writer, grid, params);
        stage().step(&mut ctx).unwrap();
        read_back(&layout, &writer, 0)
    }

    #[test]
    fn clear_gradient_turns_toward_the_stronger_side() {
        let grid = Grid2D::new(64, 64, EdgeBehavior::Wrap).unwrap();
        let mut params = TickParams::for_agents(1);
        params.sensor_distance = 4.0;
        let (left, center, right) = probes(&grid, &params, Vec2::new(0.5, 0.5));

        // right > center > left: +turn.
        let agent = run_single_agent(
            &grid,
            &params,
            trail_with(&grid, &[(right, 1.0), (center, 0.5), (left, 0.1)]),
        );
        let (hi, lo) = encode(fract(params.turn_speed));
        assert_eq!(agent.heading, decode(hi, lo));

        // left > center > right: -turn (wraps below zero).
        let agent = run_single_agent(
            &grid,
            &params,
            trail_with(&grid, &[(left, 1.0), (center, 0.5), (right, 0.1)]),
        );
        let (hi, lo) = encode(fract(-params.turn_speed));
        assert_eq!(agent.heading, decode(hi, lo));
    }

    #[test]
    fn center_peak_holds_the_heading() {
        let grid = Grid2D::new(64, 64, EdgeBehavior::Wrap).unwrap();
        let mut params = TickParams::for_agents(1);
        params.sensor_distance = 4.0;
        let (left, center, right) = probes(&grid, &params, Vec2::new(0.5, 0.5));

        let agent = run_single_agent(
            &grid,
            &params,
            trail_with(&grid, &[(center, 1.0), (left, 0.4), (right, 0.4)]),
        );
        assert_eq!(agent.heading, 0.0);
    }

    #[test]
    fn ambiguous_sides_break_the_tie_stochastically() {
        let grid = Grid2D::new(64, 64, EdgeBehavior::Wrap).unwrap();
        let mut params = TickParams::for_agents(1);
        params.sensor_distance = 4.0;
        params.random_seed = [700_123.0, 700_456.0, 0.42];
        let (left, center, right) = probes(&grid, &params, Vec2::new(0.5, 0.5));

        let agent = run_single_agent(
            &grid,
            &params,
            trail_with(&grid, &[(left, 1.0), (right, 1.0), (center, 0.1)]),
        );
        let magnitude = params.randomness * params.turn_speed;
        let (p_hi, p_lo) = encode(fract(magnitude));
        let (n_hi, n_lo) = encode(fract(-magnitude));
        assert!(
            agent.heading == decode(p_hi, p_lo) || agent.heading == decode(n_hi, n_lo),
            "heading {} is not a ±{} tie-break",
            agent.heading,
            magnitude
        );
    }

    #[test]
    fn padding_texels_are_zeroed() {
        let grid = Grid2D::new(4, 4, EdgeBehavior::Wrap).unwrap();
        let params = TickParams::for_agents(3);
        // 6 live texels tile into a 4x2 grid: two trailing padding texels.
        let layout = AgentLayout::new(3, grid.width());
        assert_eq!(layout.padded_texels(), 8);

        let mut reader = MockFieldReader::new();
        reader.set_field(F_PARTICLES, vec![0.5; layout.slots()]);
        reader.set_field(F_TRAIL, vec![0.0; grid.cell_count() * 4]);
        let mut writer = MockFieldWriter::new();
        writer.add_field(F_PARTICLES, layout.slots());

        let mut ctx = make_ctx(&reader, &mut writer, &grid, &params);
        stage().step(&mut ctx).unwrap();

        let out = writer.get_field(F_PARTICLES).unwrap();
        assert!(out[6 * 4..].iter().all(|&v| v == 0.0));
        // Live heading texels keep their sentinel channels.
        assert_eq!(out[1 * 4 + 2], 1.0);
        assert_eq!(out[1 * 4 + 3], 1.0);
    }

    #[test]
    fn identical_inputs_tick_identically() {
        let grid = Grid2D::new(32, 32, EdgeBehavior::Wrap).unwrap();
        let mut params = TickParams::for_agents(16);
        params.random_seed = [700_321.0, 700_654.0, 0.9];
        let layout = AgentLayout::new(16, grid.width());

        let agents: Vec<(Vec2, f32)> = (0..16)
            .map(|i| {
                let t = i as f32 / 16.0;
                (Vec2::new(fract(t * 3.1), fract(t * 7.7)), t)
            })
            .collect();
        let mut trail = vec![0.0f32; grid.cell_count() * 4];
        for (i, v) in trail.iter_mut().enumerate() {
            *v = ((i % 17) as f32) / 17.0;
        }

        let mut reader = MockFieldReader::new();
        reader.set_field(F_PARTICLES, packed_store(&layout, &agents));
        reader.set_field(F_TRAIL, trail);

        let mut out_a = MockFieldWriter::new();
        out_a.add_field(F_PARTICLES, layout.slots());
        let mut ctx = make_ctx(&reader, &mut out_a, &grid, &params);
        stage().step(&mut ctx).unwrap();

        let mut out_b = MockFieldWriter::new();
        out_b.add_field(F_PARTICLES, layout.slots());
        let mut ctx = make_ctx(&reader, &mut out_b, &grid, &params);
        stage().step(&mut ctx).unwrap();

        assert_eq!(
            out_a.get_field(F_PARTICLES).unwrap(),
            out_b.get_field(F_PARTICLES).unwrap()
        );
    }

    proptest! {
        #[test]
        fn outputs_stay_in_unit_range(
            x in 0.0f32..1.0,
            y in 0.0f32..1.0,
            heading in 0.0f32..1.0,
            speed in 0.0f32..0.5,
        ) {
            let grid = Grid2D::new(16, 16, EdgeBehavior::Wrap).unwrap();
            let mut params = TickParams::for_agents(1);
            params.move_speed = speed;
            params.random_seed = [700_111.0, 700_222.0, 0.5];
            let layout = AgentLayout::new(1, grid.width());

            let mut reader = MockFieldReader::new();
            reader.set_field(
                F_PARTICLES,
                packed_store(&layout, &[(Vec2::new(x, y), heading)]),
            );
            reader.set_field(F_TRAIL, vec![0.25; grid.cell_count() * 4]);
            let mut writer = MockFieldWriter::new();
            writer.add_field(F_PARTICLES, layout.slots());

            let mut ctx = make_ctx(&reader, &mut writer, &grid, &params);
            stage().step(&mut ctx).unwrap();

            let agent = read_back(&layout, &writer, 0);
            prop_assert!((0.0..1.0).contains(&agent.position.x));
            prop_assert!((0.0..1.0).contains(&agent.position.y));
            prop_assert!((0.0..1.0).contains(&agent.heading));
        }
    }
}
