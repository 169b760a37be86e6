//! Execution context passed to stages during a tick.

use myxo_core::{FieldReader, FieldWriter, TickId, TickParams};
use myxo_space::Grid2D;

/// Split-borrow field access handed to each stage's `step()`.
///
/// Dynamic dispatch (`&dyn FieldReader`, `&mut dyn FieldWriter`) keeps the
/// [`Stage`](crate::Stage) trait object-safe and lets stage tests run against
/// mocks instead of a full engine.
///
/// # Read views
///
/// - **`reads()`** — the in-tick overlay: a field written by an earlier stage
///   this tick reads back its staged value; anything else reads the previous
///   generation. Sequential (Euler-style) composition.
/// - **`reads_previous()`** — the frozen tick-start view: always the previous
///   generation, so a stage can use Jacobi-style stencils over state that it
///   or its predecessors are replacing.
pub struct StepContext<'a> {
    reads: &'a dyn FieldReader,
    reads_previous: &'a dyn FieldReader,
    writes: &'a mut dyn FieldWriter,
    grid: &'a Grid2D,
    tick: TickId,
    params: &'a TickParams,
}

impl<'a> StepContext<'a> {
    /// Construct a step context.
    ///
    /// Called by the engine per stage per tick; tests construct one directly
    /// over mock readers and writers.
    pub fn new(
        reads: &'a dyn FieldReader,
        reads_previous: &'a dyn FieldReader,
        writes: &'a mut dyn FieldWriter,
        grid: &'a Grid2D,
        tick: TickId,
        params: &'a TickParams,
    ) -> Self {
        Self {
            reads,
            reads_previous,
            writes,
            grid,
            tick,
            params,
        }
    }

    /// In-tick overlay reader.
    pub fn reads(&self) -> &dyn FieldReader {
        self.reads
    }

    /// Frozen tick-start reader.
    pub fn reads_previous(&self) -> &dyn FieldReader {
        self.reads_previous
    }

    /// Writer for the current stage's declared output buffers.
    pub fn writes(&mut self) -> &mut dyn FieldWriter {
        self.writes
    }

    /// The trail field's grid.
    pub fn grid(&self) -> &Grid2D {
        self.grid
    }

    /// The tick being computed.
    pub fn tick_id(&self) -> TickId {
        self.tick
    }

    /// Per-tick parameters.
    pub fn params(&self) -> &TickParams {
        self.params
    }
}
