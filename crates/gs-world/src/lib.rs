//! `gs-world` — the bounded grid and everything standing on it.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`entity`] | `Food`, `Obstacle`, `FoodSpec`, `ObstacleSpec`             |
//! | [`world`]  | `World` — placement, removal, occupancy, passability       |
//! | [`error`]  | `PlacementError`, `PlacementResult<T>`                     |
//!
//! # Occupied vs. blocked
//!
//! Two different questions are asked of a cell and they must not be
//! conflated:
//!
//! - [`World::is_occupied`] — *placement*: is anything (agent, food,
//!   obstacle) there?  New entities may only go on unoccupied cells.
//! - [`World::is_blocked`] — *movement*: is the cell impassable?  Only
//!   non-destructible obstacles and agents block.  Food never blocks, so
//!   agents can always step onto (and eat) it.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on entity types.       |

pub mod entity;
pub mod error;
pub mod world;


pub use entity::{DEFAULT_DESTRUCTION_COST, DEFAULT_FOOD_VALUE, Food, FoodSpec, Obstacle, ObstacleSpec};
pub use error::{PlacementError, PlacementResult};
pub use world::{Removed, World};
