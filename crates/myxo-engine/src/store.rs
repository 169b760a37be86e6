//! Double-buffered field store.
//!
//! Every field keeps two buffers: `prev` is the published generation every
//! read view resolves against, `curr` is the staging buffer the current
//! tick's stages write into. [`FieldStore::publish`] swaps the pair for each
//! field written this tick; a rolled-back tick just clears the written set,
//! leaving the published generation untouched.
//!
//! Stages never hold both views at once. The engine moves a stage's declared
//! write buffers out of the store (leaving an empty placeholder), hands them
//! to the stage through a [`StageWriter`], and moves them back afterwards —
//! so the read views borrow the store immutably while the stage mutates its
//! own buffers.

use indexmap::IndexMap;

use myxo_core::{FieldId, FieldReader, FieldSet, FieldWriter};

struct FieldBuffers {
    prev: Vec<f32>,
    curr: Vec<f32>,
}

/// The engine's double-buffered field storage.
pub struct FieldStore {
    fields: IndexMap<FieldId, FieldBuffers>,
    written: FieldSet,
}

impl FieldStore {
    /// Create a store with the given `(field, slot count)` registrations,
    /// all buffers zeroed.
    pub fn new(sizes: &[(FieldId, usize)]) -> Self {
        let fields = sizes
            .iter()
            .map(|&(field, slots)| {
                (
                    field,
                    FieldBuffers {
                        prev: vec![0.0; slots],
                        curr: vec![0.0; slots],
                    },
                )
            })
            .collect();
        Self {
            fields,
            written: FieldSet::empty(),
        }
    }

    /// The published buffer of a field.
    pub fn prev(&self, field: FieldId) -> Option<&[f32]> {
        self.fields.get(&field).map(|b| b.prev.as_slice())
    }

    /// Mutable access to the published buffer, for initial state seeding
    /// before the first tick.
    pub fn prev_mut(&mut self, field: FieldId) -> Option<&mut [f32]> {
        self.fields.get_mut(&field).map(|b| b.prev.as_mut_slice())
    }

    /// Move a field's staging buffer out for a stage to fill.
    pub fn take_curr(&mut self, field: FieldId) -> Option<Vec<f32>> {
        self.fields
            .get_mut(&field)
            .map(|b| std::mem::take(&mut b.curr))
    }

    /// Return a staging buffer after the stage ran and record the write.
    pub fn restore_curr(&mut self, field: FieldId, buf: Vec<f32>) {
        if let Some(buffers) = self.fields.get_mut(&field) {
            buffers.curr = buf;
            self.written.insert(field);
        }
    }

    /// Fields staged so far this tick.
    pub fn written(&self) -> &FieldSet {
        &self.written
    }

    /// Abandon the current tick's staged writes.
    ///
    /// The staging buffers keep their stale contents; every field is either
    /// fully rewritten or re-seeded from `prev` before its next use.
    pub fn discard_tick(&mut self) {
        self.written = FieldSet::empty();
    }

    /// Swap staged buffers into the published role for every written field
    /// and start the next tick's written set empty.
    pub fn publish(&mut self) {
        for (field, buffers) in &mut self.fields {
            if self.written.contains(*field) {
                std::mem::swap(&mut buffers.prev, &mut buffers.curr);
            }
        }
        self.written = FieldSet::empty();
    }
}

/// View of the previous (published) generation.
pub struct PrevView<'a>(&'a FieldStore);

impl<'a> PrevView<'a> {
    /// Wrap a store.
    pub fn new(store: &'a FieldStore) -> Self {
        Self(store)
    }
}

impl FieldReader for PrevView<'_> {
    fn read(&self, field: FieldId) -> Option<&[f32]> {
        self.0.prev(field)
    }
}

/// In-tick overlay view: staged value if an earlier stage wrote the field
/// this tick, previous generation otherwise.
pub struct OverlayView<'a>(&'a FieldStore);

impl<'a> OverlayView<'a> {
    /// Wrap a store.
    pub fn new(store: &'a FieldStore) -> Self {
        Self(store)
    }
}

impl FieldReader for OverlayView<'_> {
    fn read(&self, field: FieldId) -> Option<&[f32]> {
        let buffers = self.0.fields.get(&field)?;
        if self.0.written.contains(field) {
            Some(&buffers.curr)
        } else {
            Some(&buffers.prev)
        }
    }
}

/// The write buffers taken out of the store for one stage invocation.
#[derive(Default)]
pub struct StageWriter {
    buffers: IndexMap<FieldId, Vec<f32>>,
}

impl StageWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand the writer a buffer for a declared output field.
    pub fn insert(&mut self, field: FieldId, buf: Vec<f32>) {
        self.buffers.insert(field, buf);
    }

    /// Drain the buffers back out, in insertion order.
    pub fn into_buffers(self) -> impl Iterator<Item = (FieldId, Vec<f32>)> {
        self.buffers.into_iter()
    }
}

impl FieldWriter for StageWriter {
    fn write(&mut self, field: FieldId) -> Option<&mut [f32]> {
        self.buffers.get_mut(&field).map(Vec::as_mut_slice)
    }
}
