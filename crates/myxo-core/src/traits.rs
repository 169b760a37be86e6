//! Field access traits implemented by the engine's store and by test mocks.

use crate::id::FieldId;

/// Read-only access to field data within a simulation step.
///
/// Returns `None` if the field is not readable in the current context.
pub trait FieldReader {
    /// Read a field's data as a flat f32 slice.
    fn read(&self, field: FieldId) -> Option<&[f32]>;
}

/// Mutable access to field data within a simulation step.
///
/// Returns `None` if the field is not writable in the current context; a
/// stage may only write the fields it declared.
pub trait FieldWriter {
    /// Get a mutable slice for writing a field's data.
    fn write(&mut self, field: FieldId) -> Option<&mut [f32]>;
}
