//! Path search trait and the four grid searches.
//!
//! # Pluggability
//!
//! Decision logic calls searches via the [`PathFinder`] trait, picking an
//! implementation per agent with [`finder_for`].  All four share neighbour
//! generation ([`GridGraph::neighbors`]) and path reconstruction, and differ
//! only in frontier discipline:
//!
//! | Finder       | Frontier                         | Optimal? |
//! |--------------|----------------------------------|----------|
//! | [`Bfs`]      | FIFO queue                       | yes      |
//! | [`Dfs`]      | LIFO stack                       | no       |
//! | [`Dijkstra`] | min-heap on `g`                  | yes      |
//! | [`AStar`]    | min-heap on `g + manhattan(goal)`| yes      |
//!
//! Edge cost is 1 per orthogonal step.  The heap searches break priority ties
//! by insertion order so results are reproducible.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use gs_core::{Cell, Delta, SearchStrategy};

use crate::{GridGraph, SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a search: the cells to walk, in order, excluding `start`.
///
/// An empty route means either `start == goal` or the goal is unreachable;
/// both are "no move" for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub start: Cell,
    pub cells: Vec<Cell>,
}

impl Route {
    pub fn empty(start: Cell) -> Self {
        Route { start, cells: Vec::new() }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// The last cell, if any.
    pub fn goal(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// The immediate single-step delta toward the goal, or `Delta::ZERO`.
    pub fn first_step(&self) -> Delta {
        self.cells
            .first()
            .map_or(Delta::ZERO, |&next| self.start.delta_to(next))
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable single-pair search over a [`GridGraph`].
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; they hold no state and are shared
/// as `&'static dyn PathFinder` (see [`finder_for`]).
pub trait PathFinder: Send + Sync {
    /// Which strategy tag this finder implements.
    fn strategy(&self) -> SearchStrategy;

    /// Search assuming both endpoints are in bounds.
    fn search(&self, graph: &GridGraph, start: Cell, goal: Cell) -> Route;

    /// Validate the endpoints, then search.
    ///
    /// Returns an empty route (not an error) when `goal` is unreachable.
    fn find(&self, graph: &GridGraph, start: Cell, goal: Cell) -> SpatialResult<Route> {
        let dims = graph.dims();
        if !dims.contains(start) {
            return Err(SpatialError::OutOfBounds { which: "start", cell: start, dims });
        }
        if !dims.contains(goal) {
            return Err(SpatialError::OutOfBounds { which: "goal", cell: goal, dims });
        }
        Ok(self.search(graph, start, goal))
    }
}

/// Breadth-first search: shortest by hop count.
pub struct Bfs;

/// Depth-first search: finds *a* path, not necessarily a short one.
pub struct Dfs;

/// Uniform-cost search.  Same answers as [`Bfs`] on this unit-cost grid, but
/// structured for weighted terrain.
pub struct Dijkstra;

/// [`Dijkstra`] guided by the Manhattan heuristic (admissible on a
/// 4-connected grid).
pub struct AStar;

static BFS: Bfs = Bfs;
static DFS: Dfs = Dfs;
static DIJKSTRA: Dijkstra = Dijkstra;
static ASTAR: AStar = AStar;

/// The shared finder for `strategy`.
pub fn finder_for(strategy: SearchStrategy) -> &'static dyn PathFinder {
    match strategy {
        SearchStrategy::Bfs      => &BFS,
        SearchStrategy::Dfs      => &DFS,
        SearchStrategy::Dijkstra => &DIJKSTRA,
        SearchStrategy::AStar    => &ASTAR,
    }
}

/// First step from `start` toward `goal`, collapsing every failure
/// (out-of-bounds endpoint, unreachable goal) to `Delta::ZERO`.
pub fn next_step(finder: &dyn PathFinder, graph: &GridGraph, start: Cell, goal: Cell) -> Delta {
    finder
        .find(graph, start, goal)
        .map_or(Delta::ZERO, |route| route.first_step())
}

impl PathFinder for Bfs {
    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::Bfs
    }

    fn search(&self, graph: &GridGraph, start: Cell, goal: Cell) -> Route {
        let mut tree = SearchTree::new(graph, start);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                break;
            }
            for next in graph.neighbors(current) {
                if tree.discover(graph, next, current) {
                    queue.push_back(next);
                }
            }
        }
        tree.route_to(graph, start, goal)
    }
}

impl PathFinder for Dfs {
    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::Dfs
    }

    fn search(&self, graph: &GridGraph, start: Cell, goal: Cell) -> Route {
        let mut tree = SearchTree::new(graph, start);
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            if current == goal {
                break;
            }
            for next in graph.neighbors(current) {
                if tree.discover(graph, next, current) {
                    stack.push(next);
                }
            }
        }
        tree.route_to(graph, start, goal)
    }
}

impl PathFinder for Dijkstra {
    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::Dijkstra
    }

    fn search(&self, graph: &GridGraph, start: Cell, goal: Cell) -> Route {
        best_first(graph, start, goal, |_| 0)
    }
}

impl PathFinder for AStar {
    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::AStar
    }

    fn search(&self, graph: &GridGraph, start: Cell, goal: Cell) -> Route {
        best_first(graph, start, goal, |cell| cell.manhattan(goal))
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

/// Predecessor links over the flat cell index.
struct SearchTree {
    came_from: Vec<Option<Cell>>,
    reached:   Vec<bool>,
}

impl SearchTree {
    fn new(graph: &GridGraph, start: Cell) -> Self {
        let n = graph.dims().cell_count();
        let mut tree = SearchTree { came_from: vec![None; n], reached: vec![false; n] };
        if let Some(i) = graph.dims().index_of(start) {
            tree.reached[i] = true;
        }
        tree
    }

    /// Record `next` as reached via `from`.  `false` if already reached.
    fn discover(&mut self, graph: &GridGraph, next: Cell, from: Cell) -> bool {
        let Some(i) = graph.dims().index_of(next) else {
            return false;
        };
        if self.reached[i] {
            return false;
        }
        self.reached[i] = true;
        self.came_from[i] = Some(from);
        true
    }

    /// Re-point `next` at a cheaper predecessor.
    fn relink(&mut self, graph: &GridGraph, next: Cell, from: Cell) {
        if let Some(i) = graph.dims().index_of(next) {
            self.reached[i] = true;
            self.came_from[i] = Some(from);
        }
    }

    fn route_to(&self, graph: &GridGraph, start: Cell, goal: Cell) -> Route {
        let dims = graph.dims();
        let reached = dims.index_of(goal).is_some_and(|i| self.reached[i]);
        if !reached || goal == start {
            return Route::empty(start);
        }

        let mut cells = Vec::new();
        let mut cur = goal;
        while cur != start {
            cells.push(cur);
            match dims.index_of(cur).and_then(|i| self.came_from[i]) {
                Some(prev) => cur = prev,
                None => return Route::empty(start),
            }
        }
        cells.reverse();
        Route { start, cells }
    }
}

/// Shared body of Dijkstra and A*: a min-heap keyed on `g + h(cell)`.
fn best_first(graph: &GridGraph, start: Cell, goal: Cell, h: impl Fn(Cell) -> u32) -> Route {
    let dims = graph.dims();
    let mut tree = SearchTree::new(graph, start);
    // cost[v] = best known hop count to reach v.
    let mut cost = vec![u32::MAX; dims.cell_count()];
    if let Some(i) = dims.index_of(start) {
        cost[i] = 0;
    }

    // Min-heap: (priority, insertion seq, g, cell).  The sequence number
    // makes equal priorities pop in insertion order.
    let mut heap: BinaryHeap<Reverse<(u32, u64, u32, Cell)>> = BinaryHeap::new();
    let mut seq: u64 = 0;
    heap.push(Reverse((h(start), seq, 0, start)));

    while let Some(Reverse((_, _, g, current))) = heap.pop() {
        if current == goal {
            break;
        }
        let Some(ci) = dims.index_of(current) else {
            continue;
        };
        // Skip stale heap entries.
        if g > cost[ci] {
            continue;
        }

        for next in graph.neighbors(current) {
            let Some(ni) = dims.index_of(next) else {
                continue;
            };
            let new_cost = g + 1;
            if new_cost < cost[ni] {
                cost[ni] = new_cost;
                tree.relink(graph, next, current);
                seq += 1;
                heap.push(Reverse((new_cost + h(next), seq, new_cost, next)));
            }
        }
    }

    tree.route_to(graph, start, goal)
}
