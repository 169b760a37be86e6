//! Mock field access for stage-level tests.
//!
//! Stages read and write through `&dyn FieldReader` / `&mut dyn FieldWriter`,
//! so unit tests can hand them plain hash-map-backed buffers instead of a
//! full engine and store.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashMap;

use myxo_core::{FieldId, FieldReader, FieldWriter};

/// Mock [`FieldReader`] backed by a `HashMap<FieldId, Vec<f32>>`.
///
/// Populate with [`set_field`](MockFieldReader::set_field) before handing to
/// code under test. Also usable as both read views of a `StepContext` when a
/// test does not care about the overlay/frozen distinction.
#[derive(Default)]
pub struct MockFieldReader {
    fields: HashMap<FieldId, Vec<f32>>,
}

impl MockFieldReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a field with data.
    pub fn set_field(&mut self, field: FieldId, data: Vec<f32>) {
        self.fields.insert(field, data);
    }
}

impl FieldReader for MockFieldReader {
    fn read(&self, field: FieldId) -> Option<&[f32]> {
        self.fields.get(&field).map(Vec::as_slice)
    }
}

/// Mock [`FieldWriter`] backed by a `HashMap<FieldId, Vec<f32>>`.
///
/// Allocate buffers with [`add_field`](MockFieldWriter::add_field) (zeroed)
/// or [`seed_field`](MockFieldWriter::seed_field) (pre-filled, standing in
/// for an incremental write seeded from the previous generation). Inspect
/// results with [`get_field`](MockFieldWriter::get_field).
#[derive(Default)]
pub struct MockFieldWriter {
    fields: HashMap<FieldId, Vec<f32>>,
}

impl MockFieldWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate a zeroed buffer of `size` slots.
    pub fn add_field(&mut self, field: FieldId, size: usize) {
        self.fields.insert(field, vec![0.0; size]);
    }

    /// Pre-fill a buffer with the given data.
    pub fn seed_field(&mut self, field: FieldId, data: Vec<f32>) {
        self.fields.insert(field, data);
    }

    /// Read back a written buffer for assertions.
    pub fn get_field(&self, field: FieldId) -> Option<&[f32]> {
        self.fields.get(&field).map(Vec::as_slice)
    }

    /// Move a written buffer out, e.g. to feed the next simulated tick.
    pub fn take_field(&mut self, field: FieldId) -> Option<Vec<f32>> {
        self.fields.remove(&field)
    }
}

impl FieldWriter for MockFieldWriter {
    fn write(&mut self, field: FieldId) -> Option<&mut [f32]> {
        self.fields.get_mut(&field).map(Vec::as_mut_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_round_trip() {
        let mut reader = MockFieldReader::new();
        reader.set_field(FieldId(1), vec![1.0, 2.0]);
        assert_eq!(reader.read(FieldId(1)), Some([1.0, 2.0].as_slice()));
        assert_eq!(reader.read(FieldId(2)), None);
    }

    #[test]
    fn writer_allocates_and_takes() {
        let mut writer = MockFieldWriter::new();
        writer.add_field(FieldId(0), 3);
        writer.write(FieldId(0)).unwrap()[1] = 5.0;
        assert_eq!(writer.get_field(FieldId(0)), Some([0.0, 5.0, 0.0].as_slice()));
        assert_eq!(writer.take_field(FieldId(0)), Some(vec![0.0, 5.0, 0.0]));
        assert!(writer.get_field(FieldId(0)).is_none());
    }
}
