//! World bounds.
//!
//! `GridDims` can only be built through [`GridDims::new`], which rejects
//! non-positive or oversized dimensions.  Every other crate may therefore
//! assume `width >= 1 && height >= 1` without checking.

use crate::{Cell, GsError, GsResult};

/// Smallest accepted side length.
pub const MIN_GRID_DIM: i32 = 1;
/// Largest accepted side length.
pub const MAX_GRID_DIM: i32 = 100;

/// Width and height of a bounded grid: cells `[0, width) × [0, height)`.
///
/// Not serde-derived: snapshots carry plain `width`/`height` and go back
/// through [`GridDims::new`] on load.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct GridDims {
    width:  i32,
    height: i32,
}

impl GridDims {
    /// Validate and construct.  Fails fast with
    /// [`GsError::InvalidDimensions`] outside `1..=100` on either axis.
    pub fn new(width: i32, height: i32) -> GsResult<Self> {
        let ok = |v: i32| (MIN_GRID_DIM..=MAX_GRID_DIM).contains(&v);
        if !ok(width) || !ok(height) {
            return Err(GsError::InvalidDimensions { width, height });
        }
        Ok(GridDims { width, height })
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Clamp `cell` into `[0, width) × [0, height)`.
    #[inline]
    pub fn clamp(self, cell: Cell) -> Cell {
        Cell::new(
            cell.x.clamp(0, self.width - 1),
            cell.y.clamp(0, self.height - 1),
        )
    }

    /// Row-major index of an in-bounds cell.  `None` outside the grid.
    #[inline]
    pub fn index_of(self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let w = self.width;
        (0..self.height).flat_map(move |y| (0..w).map(move |x| Cell::new(x, y)))
    }
}

impl Default for GridDims {
    /// The 25 × 25 world a fresh session starts with.
    fn default() -> Self {
        GridDims { width: 25, height: 25 }
    }
}

impl std::fmt::Display for GridDims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
