//! Read-only view of the published simulation state.

use myxo_core::TickId;
use myxo_space::{Agent, AgentLayout, Grid2D};
use myxo_stages::{PARTICLES, TRAIL, TRAIL_COMPOSITE};

use crate::store::FieldStore;

/// Borrowed view of the buffers published by the most recent tick.
///
/// The composite ([`trail_composite`](Self::trail_composite)) is the natural
/// display surface: the previous trail with this tick's agent points stamped
/// on top. [`trail`](Self::trail) is its diffused, decayed successor — what
/// the next tick's agents will sense.
pub struct Snapshot<'a> {
    store: &'a FieldStore,
    grid: &'a Grid2D,
    layout: AgentLayout,
    tick: TickId,
}

impl<'a> Snapshot<'a> {
    pub(crate) fn new(
        store: &'a FieldStore,
        grid: &'a Grid2D,
        layout: AgentLayout,
        tick: TickId,
    ) -> Self {
        Self {
            store,
            grid,
            layout,
            tick,
        }
    }

    /// The tick that produced this state. `TickId(0)` is the initial state.
    pub fn tick_id(&self) -> TickId {
        self.tick
    }

    /// The trail field's grid.
    pub fn grid(&self) -> &Grid2D {
        self.grid
    }

    /// The packed-texel layout of the particle store.
    pub fn layout(&self) -> AgentLayout {
        self.layout
    }

    /// The packed particle store, 4 channels per texel.
    pub fn particles(&self) -> &[f32] {
        self.store.prev(PARTICLES).unwrap_or(&[])
    }

    /// The diffused trail, 4 channels per cell.
    pub fn trail(&self) -> &[f32] {
        self.store.prev(TRAIL).unwrap_or(&[])
    }

    /// The composited trail (previous trail plus fresh points), 4 channels
    /// per cell.
    pub fn trail_composite(&self) -> &[f32] {
        self.store.prev(TRAIL_COMPOSITE).unwrap_or(&[])
    }

    /// Decode one agent from the particle store.
    pub fn agent(&self, index: u32) -> Option<Agent> {
        self.layout.read_agent(self.particles(), index)
    }

    /// Iterate over every agent in index order.
    pub fn agents(&self) -> impl Iterator<Item = Agent> + '_ {
        (0..self.layout.agent_count()).filter_map(|i| self.agent(i))
    }

    /// Sensed trail intensity (channel 0) at a cell.
    pub fn trail_intensity(&self, col: u32, row: u32) -> f32 {
        let base = self.grid.index(col, row) * 4;
        self.trail().get(base).copied().unwrap_or(0.0)
    }
}
