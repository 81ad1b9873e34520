//! `gs-spatial` — grid graph and path searches.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`graph`]   | `GridGraph` — bounds + wall set, 4-connected neighbours      |
//! | [`router`]  | `PathFinder` trait, `Route`, `Bfs`, `Dfs`, `Dijkstra`, `AStar` |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Passability
//!
//! Only walls (non-destructible obstacles) are excluded from the graph.
//! Agents, food, and destructible obstacles are all passable here; the
//! engine decides what actually happens when an agent steps onto them.

pub mod error;
pub mod graph;
pub mod router;


pub use error::{SpatialError, SpatialResult};
pub use graph::GridGraph;
pub use router::{AStar, Bfs, Dfs, Dijkstra, PathFinder, Route, finder_for, next_step};
