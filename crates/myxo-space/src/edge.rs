//! Boundary behavior for grid neighbor lookups.

/// How the grid resolves neighbors past its edges.
///
/// This only affects the diffusion stencil. Agent positions always wrap —
/// the field is a torus as far as movement and sensing are concerned.
///
/// # Examples
///
/// ```
/// use myxo_space::{EdgeBehavior, Grid2D};
///
/// let torus = Grid2D::new(4, 4, EdgeBehavior::Wrap).unwrap();
/// // Every neighbor of a corner cell resolves on a torus.
/// assert!(torus.neighbours4(0, 0).iter().all(|n| n.is_some()));
///
/// let open = Grid2D::new(4, 4, EdgeBehavior::Absorb).unwrap();
/// // Two of a corner's neighbors fall off the edge.
/// assert_eq!(open.neighbours4(0, 0).iter().flatten().count(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Out-of-bounds neighbor wraps to the opposite side (torus).
    #[default]
    Wrap,
    /// Out-of-bounds neighbor maps back to the boundary cell.
    Clamp,
    /// Out-of-bounds neighbor is absent; it contributes nothing.
    Absorb,
}
