//! Food and obstacles.

use gs_core::{Cell, FoodId, Mobility, ObstacleId};

/// Nutrition of food placed without an explicit value.
pub const DEFAULT_FOOD_VALUE: f64 = 20.0;
/// Energy an agent pays to clear a destructible obstacle placed without an
/// explicit cost.
pub const DEFAULT_DESTRUCTION_COST: f64 = 5.0;

// ── Food ──────────────────────────────────────────────────────────────────────

/// A food item.  Consumed whole by the first agent to end a move on it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Food {
    pub id:    FoodId,
    pub pos:   Cell,
    pub value: f64,
    /// Free-form client tag (`"food"`, `"energy"`, …).
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub tag:   String,
}

/// Placement parameters for food.
#[derive(Clone, Debug, PartialEq)]
pub struct FoodSpec {
    pub value: f64,
    pub tag:   String,
}

impl Default for FoodSpec {
    fn default() -> Self {
        FoodSpec { value: DEFAULT_FOOD_VALUE, tag: "food".to_owned() }
    }
}

// ── Obstacle ──────────────────────────────────────────────────────────────────

/// A blocking entity.
///
/// | `destructible` | `mobility` | Behaviour                                    |
/// |----------------|------------|----------------------------------------------|
/// | `false`        | static     | Permanent wall                               |
/// | `true`         | static     | Removed by an agent paying `destruction_cost`|
/// | any            | dynamic    | Random-walks one free cell per tick          |
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Obstacle {
    pub id:               ObstacleId,
    pub pos:              Cell,
    pub destructible:     bool,
    pub destruction_cost: f64,
    pub mobility:         Mobility,
}

impl Obstacle {
    /// Impassable for pathfinding and movement.
    #[inline]
    pub fn is_wall(&self) -> bool {
        !self.destructible
    }
}

/// Placement parameters for an obstacle.
#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleSpec {
    pub destructible:     bool,
    pub destruction_cost: f64,
    pub mobility:         Mobility,
}

impl Default for ObstacleSpec {
    fn default() -> Self {
        ObstacleSpec {
            destructible:     false,
            destruction_cost: DEFAULT_DESTRUCTION_COST,
            mobility:         Mobility::Static,
        }
    }
}
