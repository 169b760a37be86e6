//! The [`Stage`] trait and [`WriteMode`] enum.

use myxo_core::{FieldId, FieldSet, StageError};

use crate::context::StepContext;

/// Write initialization strategy for a declared output field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteMode {
    /// Fresh buffer; the stage must fill every slot.
    Full,
    /// Buffer seeded from the previous generation before `step()` runs; the
    /// stage touches only the slots it needs to change.
    Incremental,
}

/// One transfer function in the per-tick pipeline.
///
/// # Contract
///
/// - `step()` must be deterministic: identical inputs (including the per-tick
///   parameters) produce bit-identical outputs.
/// - Stages are `&self` and stateless; all mutable state flows through the
///   field store, all tuning through [`StepContext::params`].
/// - `reads()`, `reads_previous()`, and `writes()` are consulted once at
///   pipeline construction, not per tick.
///
/// # Examples
///
/// ```
/// use myxo_core::{FieldId, StageError};
/// use myxo_stage::{Stage, StepContext, WriteMode};
///
/// struct ClearField {
///     field: FieldId,
/// }
///
/// impl Stage for ClearField {
///     fn name(&self) -> &str { "clear_field" }
///
///     fn writes(&self) -> Vec<(FieldId, WriteMode)> {
///         vec![(self.field, WriteMode::Full)]
///     }
///
///     fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StageError> {
///         let buf = ctx
///             .writes()
///             .write(self.field)
///             .ok_or(StageError::FieldUnavailable { field: self.field })?;
///         buf.fill(0.0);
///         Ok(())
///     }
/// }
///
/// let stage = ClearField { field: FieldId(0) };
/// assert_eq!(stage.name(), "clear_field");
/// assert_eq!(stage.writes(), vec![(FieldId(0), WriteMode::Full)]);
/// ```
pub trait Stage: Send + 'static {
    /// Human-readable name for error reporting and metrics.
    fn name(&self) -> &str;

    /// Fields read through the in-tick overlay view.
    ///
    /// Reads through `ctx.reads()` see the staged output of any earlier
    /// stage in the current tick, falling back to the previous generation.
    fn reads(&self) -> FieldSet {
        FieldSet::empty()
    }

    /// Fields read through the frozen tick-start view.
    ///
    /// Reads through `ctx.reads_previous()` always see the previous
    /// generation, regardless of in-tick writes.
    fn reads_previous(&self) -> FieldSet {
        FieldSet::empty()
    }

    /// Fields this stage writes, with their initialization mode.
    fn writes(&self) -> Vec<(FieldId, WriteMode)>;

    /// Execute the stage for one tick.
    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StageError>;
}
