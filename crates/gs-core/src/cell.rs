//! Integer grid coordinates and single-step moves.

use std::fmt;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// A cell on the grid.  May lie outside any particular `GridDims`; use
/// [`GridDims::contains`][crate::GridDims::contains] before indexing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// The cell reached by applying `delta` (no bounds check).
    #[inline]
    pub fn offset(self, delta: Delta) -> Cell {
        Cell::new(self.x + delta.dx, self.y + delta.dy)
    }

    /// The orthogonal neighbour in `dir` (no bounds check).
    #[inline]
    pub fn step(self, dir: Direction) -> Cell {
        self.offset(dir.delta())
    }

    /// Manhattan (L1) distance.  The metric for vision and for the A*
    /// heuristic on a 4-connected grid.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four orthogonal neighbours in `Direction::ALL` order (N, E, S, W).
    #[inline]
    pub fn neighbors4(self) -> [Cell; 4] {
        Direction::ALL.map(|d| self.step(d))
    }

    /// The delta that leads from `self` to `to`.
    #[inline]
    pub fn delta_to(self, to: Cell) -> Delta {
        Delta::new(to.x - self.x, to.y - self.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

// ── Delta ─────────────────────────────────────────────────────────────────────

/// A requested move.  Decision logic may produce any integers; the engine
/// only ever applies [`Delta::clamp_unit`]ed deltas.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    /// "Stay where you are."
    pub const ZERO: Delta = Delta { dx: 0, dy: 0 };

    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Delta { dx, dy }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Clamp each component into `{-1, 0, 1}`.
    #[inline]
    pub fn clamp_unit(self) -> Delta {
        Delta::new(self.dx.signum(), self.dy.signum())
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:+}, {:+}]", self.dx, self.dy)
    }
}

impl From<(i32, i32)> for Delta {
    #[inline]
    fn from((dx, dy): (i32, i32)) -> Self {
        Delta::new(dx, dy)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the four orthogonal moves.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Neighbour generation order shared by every search and strategy.
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    #[inline]
    pub fn delta(self) -> Delta {
        match self {
            Direction::North => Delta::new(0, -1),
            Direction::East  => Delta::new(1, 0),
            Direction::South => Delta::new(0, 1),
            Direction::West  => Delta::new(-1, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East  => "east",
            Direction::South => "south",
            Direction::West  => "west",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
