//! The 4-connected grid graph searched by every [`PathFinder`][crate::PathFinder].
//!
//! # Data layout
//!
//! The graph is implicit: nodes are the in-bounds cells of a `GridDims`,
//! edges join orthogonal neighbours, and a wall set removes cells.  Searches
//! keep their bookkeeping in flat `Vec`s indexed by
//! [`GridDims::index_of`](gs_core::GridDims::index_of), so no per-node
//! allocation happens in the inner loop.

use rustc_hash::FxHashSet;

use gs_core::{Cell, GridDims};

/// Bounds plus impassable cells.
#[derive(Clone, Debug)]
pub struct GridGraph {
    dims:  GridDims,
    walls: FxHashSet<Cell>,
}

impl GridGraph {
    /// Build a graph from bounds and the cells of non-destructible obstacles.
    /// Out-of-bounds wall cells are ignored.
    pub fn new(dims: GridDims, walls: impl IntoIterator<Item = Cell>) -> Self {
        let walls = walls.into_iter().filter(|c| dims.contains(*c)).collect();
        Self { dims, walls }
    }

    /// A graph with no walls.
    pub fn open(dims: GridDims) -> Self {
        Self { dims, walls: FxHashSet::default() }
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    /// In bounds and not a wall.
    #[inline]
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.dims.contains(cell) && !self.walls.contains(&cell)
    }

    /// Passable orthogonal neighbours of `cell`, in N, E, S, W order.
    #[inline]
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.neighbors4().into_iter().filter(|n| self.is_passable(*n))
    }
}
