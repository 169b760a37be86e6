//! Tie-break distribution over a large population.
//!
//! Builds a striped trail in which every agent's two side probes read hot
//! while its center probe reads cold — the ambiguous steering branch — and
//! checks the stochastic turn direction splits both ways across agents.

use glam::Vec2;
use myxo_core::{FieldReader, TickId, TickParams};
use myxo_space::{Agent, AgentLayout, EdgeBehavior, Grid2D};
use myxo_stage::{Stage, StepContext};
use myxo_stages::{ParticleUpdate, PARTICLES, TRAIL};
use myxo_test_utils::{MockFieldReader, MockFieldWriter};

#[test]
fn ambiguous_tie_breaks_split_both_ways() {
    let grid = Grid2D::new(64, 64, EdgeBehavior::Wrap).unwrap();
    let mut params = TickParams::for_agents(1024);
    params.sensor_distance = 4.0;
    params.random_seed = [700_123.0, 700_456.0, 0.42];

    // Hot everywhere except every fourth column.
    let mut trail = vec![0.0f32; grid.cell_count() * 4];
    for row in 0..64 {
        for col in 0..64 {
            if col % 4 != 0 {
                trail[grid.index(col, row) * 4] = 1.0;
            }
        }
    }

    // One agent per cold-column cell, aimed straight down the stripe: the
    // center probe stays in the cold column, the 45-degree side probes land
    // three columns out on either side, in hot stripes.
    let layout = AgentLayout::new(1024, grid.width());
    let mut store = vec![0.0f32; layout.slots()];
    let mut index = 0u32;
    for col in (0..64u32).step_by(4) {
        for row in 0..64u32 {
            layout.write_agent(
                &mut store,
                index,
                Agent {
                    position: Vec2::new(
                        (col as f32 + 0.5) / 64.0,
                        (row as f32 + 0.5) / 64.0,
                    ),
                    heading: 0.25,
                },
            );
            index += 1;
        }
    }
    assert_eq!(index, 1024);

    let mut reader = MockFieldReader::new();
    reader.set_field(PARTICLES, store);
    reader.set_field(TRAIL, trail);
    let mut writer = MockFieldWriter::new();
    writer.add_field(PARTICLES, layout.slots());

    let stage = ParticleUpdate::builder()
        .particles(PARTICLES)
        .trail(TRAIL)
        .build()
        .unwrap();
    let mut ctx = StepContext::new(&reader, &reader, &mut writer, &grid, TickId(1), &params);
    stage.step(&mut ctx).unwrap();

    let baseline = layout
        .read_agent(reader.read(PARTICLES).unwrap(), 0)
        .unwrap()
        .heading;
    let out = writer.get_field(PARTICLES).unwrap();

    let mut plus = 0u32;
    let mut minus = 0u32;
    for i in 0..1024 {
        let heading = layout.read_agent(out, i).unwrap().heading;
        if heading > baseline {
            plus += 1;
        } else if heading < baseline {
            minus += 1;
        } else {
            panic!("agent {i} did not take the tie-break turn");
        }
    }

    assert_eq!(plus + minus, 1024);
    // The hash is deliberately low-quality, so allow a generous margin
    // around an even split.
    assert!(
        plus >= 150 && minus >= 150,
        "tie-break split {plus}/{minus} is too lopsided"
    );
}
