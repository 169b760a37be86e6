//! The per-tick parameter block.
//!
//! Every tunable the stages consume travels through [`TickParams`], passed by
//! reference into each stage invocation. No tuning state lives anywhere else,
//! so the only mutable state that survives between ticks is the
//! double-buffered field store itself.

use glam::{Mat2, Vec2};

use std::f32::consts::TAU;

/// Which texel channels carry the heading-derived deposit color.
///
/// The heading folds into a complementary `(a, b)` pair; the mode selects
/// where that pair lands. The remaining channels are pinned to 1.0. Channel 0
/// doubles as the sensed trail intensity, so the mode also shapes what agents
/// can smell — a quirk of the model that is kept, not fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// `(a, b, 1, 1)`: heading drives red and green.
    #[default]
    RedGreen,
    /// `(1, a, b, 1)`: heading drives green and blue.
    GreenBlue,
    /// `(a, 1, b, 1)`: heading drives red and blue.
    RedBlue,
}

impl ColorMode {
    /// Encode a wrapped heading (in turns, [0,1)) as a texel color.
    pub fn channels(self, dir: f32) -> [f32; 4] {
        let (a, b) = if dir < 0.5 {
            (0.0, 1.0 - 2.0 * dir)
        } else {
            (2.0 * dir - 1.0, 0.0)
        };
        match self {
            Self::RedGreen => [a, b, 1.0, 1.0],
            Self::GreenBlue => [1.0, a, b, 1.0],
            Self::RedBlue => [a, 1.0, b, 1.0],
        }
    }
}

/// Per-tick simulation parameters.
///
/// Supplied fresh on every tick; stages hold no copies. The numeric fields
/// are deliberately unvalidated — out-of-range values produce strange
/// pictures, not crashes — matching the model's total-function contract.
#[derive(Clone, Debug)]
pub struct TickParams {
    /// Number of live agents. Packed-texel layout is recomputed from this
    /// (and the field width) on every stage invocation.
    pub agent_count: u32,
    /// Distance an agent advances per tick, in field-normalized units.
    pub move_speed: f32,
    /// Heading change per steering decision, in turns.
    pub turn_speed: f32,
    /// How far ahead the three sensors probe, in cells.
    pub sensor_distance: f32,
    /// Scale on the stochastic tie-break turn.
    pub randomness: f32,
    /// Trail retention loss per diffusion pass, in [0,1).
    pub decay_rate: f32,
    /// Rotation by the sensor half-angle (left probe).
    pub sensor_rotation: Mat2,
    /// Rotation by the negated sensor half-angle (right probe).
    pub sensor_inv_rotation: Mat2,
    /// Salt for the hash random generator. Expected to differ every tick.
    pub random_seed: [f32; 3],
    /// Pointer position in field-normalized coordinates.
    pub mouse_position: Vec2,
    /// Scale deposit brightness by proximity to `mouse_position`.
    pub follow_mouse: bool,
    /// Channel arrangement for the heading-derived deposit color.
    pub color_mode: ColorMode,
    /// Hue rotation applied to the heading before color encoding, in turns.
    pub color_offset: f32,
}

impl TickParams {
    /// Parameters for `agent_count` agents with the stock tuning.
    pub fn for_agents(agent_count: u32) -> Self {
        Self {
            agent_count,
            ..Self::default()
        }
    }

    /// Set both sensor rotation matrices from a half-angle in radians.
    pub fn set_sensor_angle(&mut self, radians: f32) {
        self.sensor_rotation = Mat2::from_angle(radians);
        self.sensor_inv_rotation = Mat2::from_angle(-radians);
    }

    /// Set the per-decision turn from an angle in radians.
    pub fn set_turn_angle(&mut self, radians: f32) {
        self.turn_speed = radians / TAU;
    }
}

impl Default for TickParams {
    fn default() -> Self {
        let mut params = Self {
            agent_count: 0,
            move_speed: 0.001,
            turn_speed: 45.0 / 360.0,
            sensor_distance: 50.0,
            randomness: 1.0,
            decay_rate: 0.1,
            sensor_rotation: Mat2::IDENTITY,
            sensor_inv_rotation: Mat2::IDENTITY,
            random_seed: [0.0; 3],
            mouse_position: Vec2::ZERO,
            follow_mouse: false,
            color_mode: ColorMode::RedGreen,
            color_offset: 0.0,
        };
        params.set_sensor_angle(45f32.to_radians());
        params
    }
}
