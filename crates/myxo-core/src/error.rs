//! Error types shared across the workspace.
//!
//! The simulation core is total over numeric inputs — wrap and quantization
//! stand in for range errors — so the only runtime failures are wiring
//! problems: a stage asked for a buffer the engine never handed it.

use std::error::Error;
use std::fmt;

use crate::id::FieldId;

/// Errors from an individual stage's `step()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageError {
    /// A declared field buffer was not available through the step context.
    ///
    /// Indicates an engine/stage wiring mismatch, not a data condition.
    FieldUnavailable {
        /// The missing field.
        field: FieldId,
    },
    /// The stage's step function failed for another reason.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldUnavailable { field } => {
                write!(f, "field {field} not available in step context")
            }
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
        }
    }
}

impl Error for StageError {}

/// Errors from the engine during a tick.
///
/// A failed tick is rolled back atomically: the staged buffers are abandoned
/// and the published state is untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A stage returned an error during execution.
    StageFailed {
        /// Name of the failing stage.
        name: String,
        /// The underlying stage error.
        reason: StageError,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StageFailed { name, reason } => {
                write!(f, "stage '{name}' failed: {reason}")
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StageFailed { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_stage_name() {
        let err = StepError::StageFailed {
            name: "particle_update".into(),
            reason: StageError::FieldUnavailable { field: FieldId(2) },
        };
        let msg = err.to_string();
        assert!(msg.contains("particle_update"));
        assert!(msg.contains('2'));
    }

    #[test]
    fn source_chains_to_stage_error() {
        let err = StepError::StageFailed {
            name: "trail_diffuse".into(),
            reason: StageError::ExecutionFailed {
                reason: "boom".into(),
            },
        };
        assert!(err.source().is_some());
    }
}
