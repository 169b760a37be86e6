//! The lockstep simulation engine.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use myxo_core::{FieldSet, StepError, TickId, TickParams};
use myxo_space::{AgentLayout, Grid2D};
use myxo_stage::{validate_pipeline, Stage, StagePlan, StepContext, WriteMode};
use myxo_stages::{
    simulation_fields, ParticleUpdate, TrailDeposit, TrailDiffuse, PARTICLES, TRAIL,
    TRAIL_COMPOSITE,
};

use crate::config::{ConfigError, SimConfig};
use crate::metrics::TickMetrics;
use crate::seeding;
use crate::snapshot::Snapshot;
use crate::store::{FieldStore, OverlayView, PrevView, StageWriter};

/// A self-contained, deterministic slime-mold simulation.
///
/// Owns the grid, the double-buffered field store, and the three-stage
/// pipeline. Each [`tick`](Self::tick) is atomic: either every stage commits
/// and the staged buffers are published, or the tick is abandoned and the
/// published state is exactly what it was before.
///
/// # Examples
///
/// ```
/// use myxo_engine::{SimConfig, Simulation};
///
/// let mut sim = Simulation::new(SimConfig::new(64, 64, 200)).unwrap();
/// for _ in 0..10 {
///     sim.tick().unwrap();
/// }
/// let snapshot = sim.snapshot();
/// assert_eq!(snapshot.tick_id().0, 10);
/// assert_eq!(snapshot.agents().count(), 200);
/// ```
pub struct Simulation {
    grid: Grid2D,
    store: FieldStore,
    stages: Vec<Box<dyn Stage>>,
    plan: StagePlan,
    params: TickParams,
    tick: TickId,
    auto_reseed: bool,
    seed_stream: ChaCha8Rng,
    last_metrics: TickMetrics,
}

impl Simulation {
    /// Build a simulation from a validated configuration.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid2D::new(config.width, config.height, config.edge)?;
        let layout = AgentLayout::new(config.agent_count, config.width);

        // Field registry: the store sizes buffers straight from the grid and
        // the packed layout.
        let defs = simulation_fields();
        let texel = defs[PARTICLES.0 as usize].field_type.components() as usize;
        let cell_slots = grid.cell_count() * texel;
        let store_sizes = [
            (PARTICLES, layout.slots()),
            (TRAIL, cell_slots),
            (TRAIL_COMPOSITE, cell_slots),
        ];
        let mut store = FieldStore::new(&store_sizes);

        let stages: Vec<Box<dyn Stage>> = vec![
            Box::new(
                ParticleUpdate::builder()
                    .particles(PARTICLES)
                    .trail(TRAIL)
                    .build()
                    .map_err(ConfigError::Stage)?,
            ),
            Box::new(
                TrailDeposit::builder()
                    .particles(PARTICLES)
                    .trail(TRAIL)
                    .output(TRAIL_COMPOSITE)
                    .blend(config.blend)
                    .build()
                    .map_err(ConfigError::Stage)?,
            ),
            Box::new(
                TrailDiffuse::builder()
                    .input(TRAIL_COMPOSITE)
                    .output(TRAIL)
                    .build()
                    .map_err(ConfigError::Stage)?,
            ),
        ];
        let defined: FieldSet = store_sizes.iter().map(|(field, _)| *field).collect();
        let plan = validate_pipeline(&stages, &defined)?;

        // Initial placement, through the codec, into the published buffer.
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let initial = seeding::initial_store(&mut rng, &config.seeding, layout);
        if let Some(buf) = store.prev_mut(PARTICLES) {
            buf.copy_from_slice(&initial);
        }

        let mut params = config.params.clone();
        params.agent_count = config.agent_count;

        Ok(Self {
            grid,
            store,
            stages,
            plan,
            params,
            tick: TickId(0),
            auto_reseed: config.auto_reseed,
            // The placement stream continues as the per-tick seed stream.
            seed_stream: rng,
            last_metrics: TickMetrics::default(),
        })
    }

    /// The trail field's grid.
    pub fn grid(&self) -> &Grid2D {
        &self.grid
    }

    /// The per-tick parameters the next tick will run with.
    pub fn params(&self) -> &TickParams {
        &self.params
    }

    /// Mutate the tuning between ticks (slider semantics). `agent_count`
    /// above the configured population reads as inactive padding.
    pub fn params_mut(&mut self) -> &mut TickParams {
        &mut self.params
    }

    /// The last published tick.
    pub fn tick_id(&self) -> TickId {
        self.tick
    }

    /// Timings for the most recent successful tick.
    pub fn metrics(&self) -> &TickMetrics {
        &self.last_metrics
    }

    /// Read-only view of the published state.
    pub fn snapshot(&self) -> Snapshot<'_> {
        let layout = AgentLayout::new(self.params.agent_count, self.grid.width());
        Snapshot::new(&self.store, &self.grid, layout, self.tick)
    }

    /// Advance one tick.
    ///
    /// Runs update, deposit, and diffuse in order over split views of the
    /// store, then publishes. On a stage failure the staged tick is
    /// abandoned: the published buffers, tick counter, and metrics are all
    /// left untouched.
    pub fn tick(&mut self) -> Result<TickId, StepError> {
        let tick_start = Instant::now();
        if self.auto_reseed {
            self.params.random_seed = next_seed(&mut self.seed_stream);
        }

        let next = TickId(self.tick.0 + 1);
        let mut stage_us = Vec::with_capacity(self.stages.len());

        for index in 0..self.stages.len() {
            let stage_start = Instant::now();
            let stage = &self.stages[index];

            let mut writer = StageWriter::new();
            for (field, mode) in self.plan.write_modes_for(index) {
                let Some(mut buf) = self.store.take_curr(*field) else {
                    continue;
                };
                if *mode == WriteMode::Incremental {
                    if let Some(prev) = self.store.prev(*field) {
                        buf.copy_from_slice(prev);
                    }
                }
                writer.insert(*field, buf);
            }

            let result = {
                let overlay = OverlayView::new(&self.store);
                let frozen = PrevView::new(&self.store);
                let mut ctx = StepContext::new(
                    &overlay,
                    &frozen,
                    &mut writer,
                    &self.grid,
                    next,
                    &self.params,
                );
                stage.step(&mut ctx)
            };

            let name = self.stages[index].name().to_string();
            for (field, buf) in writer.into_buffers() {
                self.store.restore_curr(field, buf);
            }

            if let Err(reason) = result {
                self.store.discard_tick();
                return Err(StepError::StageFailed { name, reason });
            }
            stage_us.push((name, stage_start.elapsed().as_micros() as u64));
        }

        self.store.publish();
        self.tick = next;
        self.last_metrics = TickMetrics {
            tick: next,
            total_us: tick_start.elapsed().as_micros() as u64,
            stage_us,
        };
        Ok(next)
    }
}

/// Fresh hash salt for one tick: two large axis scales (the length-based
/// hash needs the magnitude to scramble cell coordinates) plus a unit
/// offset.
fn next_seed(rng: &mut ChaCha8Rng) -> [f32; 3] {
    [
        700_000.0 + rng.gen::<f32>() * 1000.0,
        700_000.0 + rng.gen::<f32>() * 1000.0,
        rng.gen::<f32>(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rejects_bad_config() {
        assert!(matches!(
            Simulation::new(SimConfig::new(0, 64, 10)),
            Err(ConfigError::EmptyGrid)
        ));
        assert!(matches!(
            Simulation::new(SimConfig::new(64, 64, 0)),
            Err(ConfigError::NoAgents)
        ));
    }

    #[test]
    fn tick_counter_advances() {
        let mut sim = Simulation::new(SimConfig::new(32, 32, 50)).unwrap();
        assert_eq!(sim.tick_id(), TickId(0));
        sim.tick().unwrap();
        sim.tick().unwrap();
        assert_eq!(sim.tick_id(), TickId(2));
        assert_eq!(sim.metrics().tick, TickId(2));
        assert_eq!(sim.metrics().stage_us.len(), 3);
    }

    #[test]
    fn auto_reseed_varies_the_hash_seed() {
        let mut sim = Simulation::new(SimConfig::new(32, 32, 50)).unwrap();
        sim.tick().unwrap();
        let first = sim.params().random_seed;
        sim.tick().unwrap();
        let second = sim.params().random_seed;
        assert_ne!(first, second);
        assert!((700_000.0..701_000.0).contains(&first[0]));
        assert!((0.0..1.0).contains(&first[2]));
    }

    #[test]
    fn manual_seed_is_left_alone() {
        let mut config = SimConfig::new(32, 32, 50);
        config.auto_reseed = false;
        config.params.random_seed = [1.0, 2.0, 3.0];
        let mut sim = Simulation::new(config).unwrap();
        sim.tick().unwrap();
        assert_eq!(sim.params().random_seed, [1.0, 2.0, 3.0]);
    }
}
