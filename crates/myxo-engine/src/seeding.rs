//! Initial agent placement.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use myxo_space::{Agent, AgentLayout};

use crate::config::Seeding;

/// Build the initial particle store buffer.
///
/// Every agent goes through the byte-pair codec on the way in, so tick 0
/// already holds channel-exact state and the first update introduces no
/// extra quantization step.
pub(crate) fn initial_store(
    rng: &mut ChaCha8Rng,
    seeding: &Seeding,
    layout: AgentLayout,
) -> Vec<f32> {
    let mut buf = vec![0.0f32; layout.slots()];
    for index in 0..layout.agent_count() {
        let agent = match seeding {
            Seeding::Uniform => Agent {
                position: Vec2::new(rng.gen(), rng.gen()),
                heading: rng.gen(),
            },
            Seeding::Block { extent } => {
                let origin = (1.0 - extent) / 2.0;
                Agent {
                    position: Vec2::new(
                        origin + rng.gen::<f32>() * extent,
                        origin + rng.gen::<f32>() * extent,
                    ),
                    heading: rng.gen(),
                }
            }
            Seeding::Explicit(agents) => match agents.get(index as usize) {
                Some(agent) => *agent,
                None => continue,
            },
        };
        layout.write_agent(&mut buf, index, agent);
    }
    buf
}
