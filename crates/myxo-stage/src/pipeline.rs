//! Startup pipeline validation.
//!
//! [`validate_pipeline`] runs once at engine construction. It checks the
//! stage list for structural errors — nothing here executes per tick — and
//! returns the [`StagePlan`] the engine consults to seed incremental write
//! buffers.

use indexmap::IndexMap;

use myxo_core::{FieldId, FieldSet};

use crate::stage::{Stage, WriteMode};

use std::error::Error;
use std::fmt;

/// Per-stage write metadata produced by [`validate_pipeline`].
#[derive(Debug)]
#[must_use]
pub struct StagePlan {
    write_modes: Vec<Vec<(FieldId, WriteMode)>>,
}

impl StagePlan {
    /// Number of stages in the plan.
    pub fn len(&self) -> usize {
        self.write_modes.len()
    }

    /// Whether the plan covers zero stages.
    pub fn is_empty(&self) -> bool {
        self.write_modes.is_empty()
    }

    /// The `(field, mode)` pairs a stage writes.
    pub fn write_modes_for(&self, stage_index: usize) -> &[(FieldId, WriteMode)] {
        self.write_modes
            .get(stage_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Fields the stage declared as [`WriteMode::Incremental`].
    ///
    /// The engine copies the previous generation into the write buffer for
    /// each of these before calling `step()`.
    pub fn incremental_fields_for(&self, stage_index: usize) -> Vec<FieldId> {
        self.write_modes_for(stage_index)
            .iter()
            .filter(|(_, mode)| *mode == WriteMode::Incremental)
            .map(|(field, _)| *field)
            .collect()
    }
}

/// A detected write-write conflict between two stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteConflict {
    /// The contested field.
    pub field: FieldId,
    /// Name of the earlier writer in pipeline order.
    pub first_writer: String,
    /// Name of the later writer.
    pub second_writer: String,
}

/// Errors from pipeline validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// No stages registered.
    EmptyPipeline,
    /// Two or more stages write the same field.
    WriteConflict(Vec<WriteConflict>),
    /// A stage references a field that was never defined.
    UndefinedField {
        /// Which stage.
        stage: String,
        /// The missing field.
        field: FieldId,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPipeline => write!(f, "pipeline has no stages"),
            Self::WriteConflict(conflicts) => {
                write!(f, "write-write conflicts:")?;
                for c in conflicts {
                    write!(
                        f,
                        " field {} written by '{}' and '{}';",
                        c.field, c.first_writer, c.second_writer
                    )?;
                }
                Ok(())
            }
            Self::UndefinedField { stage, field } => {
                write!(f, "stage '{stage}' references undefined field {field}")
            }
        }
    }
}

impl Error for PipelineError {}

/// Validate a stage pipeline.
///
/// Checks, in order:
///
/// 1. The pipeline is non-empty.
/// 2. No two stages write the same field (one writer per field per tick is
///    what makes the publish swap well-defined).
/// 3. Every read and written field exists in `defined_fields`.
///
/// Returns the write-mode plan on success.
pub fn validate_pipeline(
    stages: &[Box<dyn Stage>],
    defined_fields: &FieldSet,
) -> Result<StagePlan, PipelineError> {
    if stages.is_empty() {
        return Err(PipelineError::EmptyPipeline);
    }

    let mut last_writer: IndexMap<FieldId, usize> = IndexMap::new();
    let mut conflicts: Vec<WriteConflict> = Vec::new();
    for (i, stage) in stages.iter().enumerate() {
        for (field, _mode) in stage.writes() {
            if let Some(&j) = last_writer.get(&field) {
                conflicts.push(WriteConflict {
                    field,
                    first_writer: stages[j].name().to_string(),
                    second_writer: stage.name().to_string(),
                });
            }
            last_writer.insert(field, i);
        }
    }
    if !conflicts.is_empty() {
        return Err(PipelineError::WriteConflict(conflicts));
    }

    for stage in stages {
        let referenced = stage
            .reads()
            .union(&stage.reads_previous())
            .union(&stage.writes().iter().map(|(f, _)| *f).collect());
        for field in referenced.iter() {
            if !defined_fields.contains(field) {
                return Err(PipelineError::UndefinedField {
                    stage: stage.name().to_string(),
                    field,
                });
            }
        }
    }

    let write_modes = stages.iter().map(|s| s.writes()).collect();
    Ok(StagePlan { write_modes })
}
