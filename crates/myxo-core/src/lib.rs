//! Core types and numeric primitives for the Myxo simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! identifiers, field definitions, reader/writer traits, and error types
//! shared by the rest of the workspace, plus the two numeric primitives the
//! whole model is built on: the byte-pair texel codec and the per-tick hash
//! random generator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod codec;
mod error;
mod field;
mod id;
mod params;
mod random;
mod traits;

pub use codec::{byte, decode, encode, fract};
pub use error::{StageError, StepError};
pub use field::{FieldDef, FieldSet, FieldSetIter, FieldType};
pub use id::{FieldId, TickId};
pub use params::{ColorMode, TickParams};
pub use random::random;
pub use traits::{FieldReader, FieldWriter};
