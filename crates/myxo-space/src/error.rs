//! Error types for spatial construction.

use std::error::Error;
use std::fmt;

/// Errors from grid construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpaceError {
    /// A grid dimension was zero.
    EmptyGrid,
    /// A grid dimension exceeds the addressable maximum.
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The offending value.
        value: u32,
        /// The maximum supported value.
        max: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid dimensions must be non-zero"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds the maximum of {max}")
            }
        }
    }
}

impl Error for SpaceError {}
