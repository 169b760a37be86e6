//! Filaments — run the simulation headless and watch structure emerge.
//!
//! Demonstrates:
//!   1. Building a `SimConfig` and tuning `TickParams`
//!   2. Ticking the lockstep engine
//!   3. Reading trail state and timings back out of the snapshot
//!
//! Run with:
//!   cargo run --example filaments

use myxo_engine::{SimConfig, Simulation};

// ─── Run parameters ─────────────────────────────────────────────

const SIZE: u32 = 96;
const AGENTS: u32 = 4_000;
const TICKS: u64 = 400;

// Coarse ASCII density ramp for the trail printout.
const RAMP: &[u8] = b" .:-=+*#%@";

fn main() {
    let mut config = SimConfig::new(SIZE, SIZE, AGENTS);
    config.seed = 42;
    config.params.sensor_distance = 9.0;
    config.params.set_sensor_angle(35f32.to_radians());
    config.params.set_turn_angle(30f32.to_radians());

    let mut sim = Simulation::new(config).expect("config is valid");

    for _ in 0..TICKS {
        sim.tick().expect("tick succeeds");
    }

    let snapshot = sim.snapshot();
    let grid = snapshot.grid();

    // Downsample the sensed-intensity channel to an 8x-coarser ASCII map.
    let step = 4;
    for row in (0..grid.height()).step_by(step) {
        let mut line = String::with_capacity((grid.width() as usize / step) * 2);
        for col in (0..grid.width()).step_by(step) {
            let v = snapshot.trail_intensity(col, row).clamp(0.0, 1.0);
            let idx = (v * (RAMP.len() - 1) as f32).round() as usize;
            line.push(RAMP[idx] as char);
            line.push(RAMP[idx] as char);
        }
        println!("{line}");
    }

    let metrics = sim.metrics();
    println!();
    println!(
        "tick {} in {}us ({} agents on {}x{})",
        metrics.tick, metrics.total_us, AGENTS, SIZE, SIZE
    );
    for (name, us) in &metrics.stage_us {
        println!("  {name:>16}: {us}us");
    }
}
