//! Packed-texel layout for agent state.
//!
//! Agent data is one-dimensional but lives in image-shaped storage: agent `i`
//! occupies texel `2i` (position, as two byte-pair channels per axis) and
//! texel `2i+1` (heading byte-pair, unused channels pinned to 1.0). The texel
//! sequence tiles row-major into a grid whose width is bounded by the trail
//! field's width. The layout carries no buffer — it is cheap arithmetic,
//! recomputed from the per-tick parameters on every stage invocation.

use glam::Vec2;

use myxo_core::{decode, encode};

/// Decoded view of one agent's two texels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Agent {
    /// Position in field-normalized [0,1) coordinates.
    pub position: Vec2,
    /// Heading in turns, [0,1). Radians are `TAU * heading`.
    pub heading: f32,
}

/// Geometry of the packed agent grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentLayout {
    agent_count: u32,
    cols: usize,
    rows: usize,
}

impl AgentLayout {
    /// Channels per texel.
    pub const CHANNELS: usize = 4;

    /// Compute the layout for `agent_count` agents packed into a grid no
    /// wider than `field_width`.
    ///
    /// Mirrors the tiling the store is allocated with:
    /// `cols = min(2 * agent_count, field_width)`,
    /// `rows = ceil(2 * agent_count / field_width)`.
    pub fn new(agent_count: u32, field_width: u32) -> Self {
        let texel_count = agent_count as usize * 2;
        let width = field_width as usize;
        let (cols, rows) = if width == 0 {
            (0, 0)
        } else {
            (texel_count.min(width), texel_count.div_ceil(width))
        };
        Self {
            agent_count,
            cols,
            rows,
        }
    }

    /// Number of agents the layout addresses.
    pub fn agent_count(&self) -> u32 {
        self.agent_count
    }

    /// Number of live texels (`2 * agent_count`).
    pub fn texel_count(&self) -> usize {
        self.agent_count as usize * 2
    }

    /// Packed grid width in texels.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Packed grid height in texels.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total texels in the padded grid, trailing padding included.
    pub fn padded_texels(&self) -> usize {
        self.cols * self.rows
    }

    /// Total f32 slots the padded grid occupies.
    pub fn slots(&self) -> usize {
        self.padded_texels() * Self::CHANNELS
    }

    /// Whether a flat texel index is live (not trailing padding).
    pub fn is_live(&self, texel: usize) -> bool {
        texel < self.texel_count()
    }

    /// The agent owning a flat texel index.
    pub fn agent_of(&self, texel: usize) -> u32 {
        (texel / 2) as u32
    }

    /// Whether a texel is the position half (even index) of its agent.
    pub fn is_position_texel(&self, texel: usize) -> bool {
        texel % 2 == 0
    }

    /// Flat index of an agent's position texel.
    pub fn position_texel(&self, agent: u32) -> usize {
        agent as usize * 2
    }

    /// Flat index of an agent's heading texel.
    pub fn heading_texel(&self, agent: u32) -> usize {
        agent as usize * 2 + 1
    }

    /// Decode an agent from a packed buffer.
    ///
    /// Returns `None` for an agent index past the layout or a buffer too
    /// short to hold its texels.
    pub fn read_agent(&self, texels: &[f32], agent: u32) -> Option<Agent> {
        if agent >= self.agent_count {
            return None;
        }
        let base = self.position_texel(agent) * Self::CHANNELS;
        let t = texels.get(base..base + 2 * Self::CHANNELS)?;
        Some(Agent {
            position: Vec2::new(decode(t[0], t[1]), decode(t[2], t[3])),
            heading: decode(t[4], t[5]),
        })
    }

    /// Encode an agent into a packed buffer through the byte-pair codec.
    ///
    /// Out-of-range agents and short buffers are ignored.
    pub fn write_agent(&self, texels: &mut [f32], agent: u32, state: Agent) {
        if agent >= self.agent_count {
            return;
        }
        let base = self.position_texel(agent) * Self::CHANNELS;
        let Some(t) = texels.get_mut(base..base + 2 * Self::CHANNELS) else {
            return;
        };
        let (x_hi, x_lo) = encode(state.position.x);
        let (y_hi, y_lo) = encode(state.position.y);
        let (h_hi, h_lo) = encode(state.heading);
        t[0] = x_hi;
        t[1] = x_lo;
        t[2] = y_hi;
        t[3] = y_lo;
        t[4] = h_hi;
        t[5] = h_lo;
        t[6] = 1.0;
        t[7] = 1.0;
    }
}
