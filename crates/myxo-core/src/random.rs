//! Stateless hash random generator for per-tick stochastic decisions.
//!
//! Steering tie-breaks need a value that is reproducible within a tick (the
//! same agent position must always break the same way under the same seed)
//! but decorrelated across positions and ticks. A low-quality length-based
//! hash over the position, salted by a 3-component seed the caller varies
//! every tick, is enough: the output only ever feeds a 0.5 threshold.
//!
//! All arithmetic is deliberately `f32` to match the precision envelope of
//! normalized texel storage.

use glam::Vec2;

use crate::codec::fract;

/// One round of the hash.
///
/// The seed point is first snapped to the grid resolution so every position
/// inside a cell hashes identically, then scaled by one of the two large
/// seed components (chosen by the dominant axis, which breaks up diagonal
/// symmetry) and folded through `fract`.
fn random_once(seed: Vec2, grid: Vec2, seeds: [f32; 3]) -> f32 {
    let seed = Vec2::new(
        (seed.x * grid.x).floor() / grid.x,
        (seed.y * grid.y).floor() / grid.y,
    );
    let scale = if seed.x.abs() > seed.y.abs() {
        seeds[0]
    } else {
        seeds[1]
    };
    fract((seed * scale).length() + seeds[2])
}

/// Hash a 2D point to a value in [0,1).
///
/// Deterministic in `(seed, grid, seeds)`. Applies [`random_once`] to its own
/// output (with a `-1.0` offset on the inner coordinate) to knock down the
/// axis-aligned banding a single round produces.
pub fn random(seed: Vec2, grid: Vec2, seeds: [f32; 3]) -> f32 {
    let inner = Vec2::new(
        random_once(seed, grid, seeds),
        random_once(seed - 1.0, grid, seeds),
    );
    random_once(inner, grid, seeds)
}
