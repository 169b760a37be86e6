//! Spatial structures for the Myxo simulation.
//!
//! Two kinds of geometry live here: the [`Grid2D`] cell grid the trail field
//! occupies (wrap-around by default), and the [`AgentLayout`] packing that
//! tiles one-dimensional agent data into image-shaped texel storage.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod edge;
mod error;
mod grid2d;
mod layout;

pub use edge::EdgeBehavior;
pub use error::SpaceError;
pub use grid2d::{resolve_axis, Grid2D};
pub use layout::{Agent, AgentLayout};
