//! 2D cell grid with configurable edge resolution.

use glam::Vec2;
use smallvec::SmallVec;

use myxo_core::fract;

use crate::edge::EdgeBehavior;
use crate::error::SpaceError;

/// Resolve a single axis coordinate under the given edge behavior.
///
/// Returns `None` for `Absorb` out-of-bounds; otherwise the in-range
/// coordinate.
pub fn resolve_axis(val: i32, len: i32, edge: EdgeBehavior) -> Option<i32> {
    if val >= 0 && val < len {
        return Some(val);
    }
    match edge {
        EdgeBehavior::Absorb => None,
        EdgeBehavior::Clamp => Some(val.clamp(0, len - 1)),
        EdgeBehavior::Wrap => Some(((val % len) + len) % len),
    }
}

/// A two-dimensional cell grid addressed by `(col, row)`.
///
/// Cells are laid out row-major: `index = row * width + col`. Positions in
/// field-normalized coordinates ([0,1) per axis, x rightward, y downward in
/// row direction) map onto cells through [`cell_containing`](Self::cell_containing),
/// which wraps first — the field is toroidal for everything position-shaped.
/// The [`EdgeBehavior`] governs only neighbor lookups (the diffusion stencil).
#[derive(Clone, Debug)]
pub struct Grid2D {
    width: u32,
    height: u32,
    edge: EdgeBehavior,
}

impl Grid2D {
    /// Maximum dimension: coordinates are `i32` internally.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a grid of `width * height` cells.
    ///
    /// Returns `Err(SpaceError::EmptyGrid)` for a zero dimension and
    /// `Err(SpaceError::DimensionTooLarge)` past [`Self::MAX_DIM`].
    pub fn new(width: u32, height: u32, edge: EdgeBehavior) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptyGrid);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self {
            width,
            height,
            edge,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Edge behavior for neighbor lookups.
    pub fn edge_behavior(&self) -> EdgeBehavior {
        self.edge
    }

    /// Total cell count.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Grid dimensions as a float vector, for normalized-coordinate math.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// The extent of one cell in normalized coordinates.
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(1.0 / self.width as f32, 1.0 / self.height as f32)
    }

    /// Flat index of the cell at `(col, row)`. No bounds handling.
    pub fn index(&self, col: u32, row: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Flat index of the cell containing a normalized position.
    ///
    /// Wraps both axes into [0,1) first, so any finite position resolves.
    /// The clamp guards the rounding edge where `fract(x) * width` lands
    /// exactly on `width`.
    pub fn cell_containing(&self, p: Vec2) -> usize {
        let col = ((fract(p.x) * self.width as f32) as u32).min(self.width - 1);
        let row = ((fract(p.y) * self.height as f32) as u32).min(self.height - 1);
        self.index(col, row)
    }

    /// The four cardinal neighbors of `(col, row)` as flat indices, in
    /// north/south/west/east order. `None` marks an absorbed neighbor.
    pub fn neighbours4(&self, col: i32, row: i32) -> [Option<usize>; 4] {
        let offsets: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
        let mut result = [None; 4];
        for (slot, (dc, dr)) in result.iter_mut().zip(offsets) {
            let nc = resolve_axis(col + dc, self.width as i32, self.edge);
            let nr = resolve_axis(row + dr, self.height as i32, self.edge);
            if let (Some(nc), Some(nr)) = (nc, nr) {
                *slot = Some(self.index(nc as u32, nr as u32));
            }
        }
        result
    }

    /// Flat indices of all resolvable cardinal neighbors.
    pub fn neighbours4_present(&self, col: i32, row: i32) -> SmallVec<[usize; 4]> {
        self.neighbours4(col, row).into_iter().flatten().collect()
    }
}
