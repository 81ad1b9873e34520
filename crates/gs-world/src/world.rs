//! The `World` struct.

use tracing::debug;

use gs_agent::{Agent, AgentSpec, AgentStore};
use gs_core::{AgentId, Cell, FoodId, GridDims, Mobility, ObstacleId, SimRng};
use gs_spatial::GridGraph;

use crate::{Food, FoodSpec, Obstacle, ObstacleSpec, PlacementError, PlacementResult};

/// What [`World::remove_at`] took off the grid.
#[derive(Clone, Debug, PartialEq)]
pub enum Removed {
    Agent(Agent),
    Food(Food),
    Obstacle(Obstacle),
}

/// Grid bounds plus every entity on it.
///
/// `World` is `Clone`: the engine clones it once per tick to produce the
/// read-only snapshot decision logic works from.
///
/// # Invariant
///
/// At most one entity occupies a cell at the start of a tick.  Placement
/// enforces it; movement resolution preserves it by rejecting moves onto
/// agents and obstacles and consuming food on arrival.
#[derive(Clone, Debug)]
pub struct World {
    dims:          GridDims,
    /// Agents in insertion (= acting) order.
    pub agents:    AgentStore,
    food:          Vec<Food>,
    obstacles:     Vec<Obstacle>,
    next_food:     FoodId,
    next_obstacle: ObstacleId,
}

impl World {
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            agents:        AgentStore::new(),
            food:          Vec::new(),
            obstacles:     Vec::new(),
            next_food:     FoodId::FIRST,
            next_obstacle: ObstacleId::FIRST,
        }
    }

    // ── Bounds ────────────────────────────────────────────────────────────

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn clamp(&self, cell: Cell) -> Cell {
        self.dims.clamp(cell)
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.dims.contains(cell)
    }

    /// Remove every entity and restart all id counters.  Bounds are kept.
    pub fn clear(&mut self) {
        self.agents.clear();
        self.food.clear();
        self.obstacles.clear();
        self.next_food = FoodId::FIRST;
        self.next_obstacle = ObstacleId::FIRST;
    }

    /// Change bounds.  Implies [`clear`](Self::clear).
    pub fn resize(&mut self, dims: GridDims) {
        self.clear();
        self.dims = dims;
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Anything at all on `cell`.  Used for placement.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.agents.at(cell).is_some()
            || self.food_at(cell).is_some()
            || self.obstacle_at(cell).is_some()
    }

    /// Impassable for movement: an agent or a non-destructible obstacle.
    /// Food never blocks; destructible obstacles are resolved by the engine.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.agents.at(cell).is_some() || self.obstacle_at(cell).is_some_and(Obstacle::is_wall)
    }

    pub fn food(&self) -> &[Food] {
        &self.food
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn food_at(&self, cell: Cell) -> Option<&Food> {
        self.food.iter().find(|f| f.pos == cell)
    }

    pub fn obstacle_at(&self, cell: Cell) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.pos == cell)
    }

    /// Cells of non-destructible obstacles.
    pub fn walls(&self) -> impl Iterator<Item = Cell> + '_ {
        self.obstacles.iter().filter(|o| o.is_wall()).map(|o| o.pos)
    }

    /// Pathfinding graph for the current layout.
    pub fn graph(&self) -> GridGraph {
        GridGraph::new(self.dims, self.walls())
    }

    /// Food within Manhattan `radius` of `from`, in placement order.
    pub fn visible_food(&self, from: Cell, radius: u32) -> Vec<&Food> {
        self.food.iter().filter(|f| from.manhattan(f.pos) <= radius).collect()
    }

    /// Obstacles within Manhattan `radius` of `from`, in placement order.
    pub fn visible_obstacles(&self, from: Cell, radius: u32) -> Vec<&Obstacle> {
        self.obstacles.iter().filter(|o| from.manhattan(o.pos) <= radius).collect()
    }

    // ── Placement ─────────────────────────────────────────────────────────

    fn check_free(&self, cell: Cell) -> PlacementResult<()> {
        if !self.dims.contains(cell) {
            return Err(PlacementError::OutOfBounds(cell));
        }
        if self.is_occupied(cell) {
            return Err(PlacementError::Occupied(cell));
        }
        Ok(())
    }

    pub fn place_agent(&mut self, spec: AgentSpec) -> PlacementResult<AgentId> {
        self.check_free(spec.pos())?;
        Ok(self.agents.insert(spec))
    }

    pub fn place_food(&mut self, cell: Cell, spec: FoodSpec) -> PlacementResult<FoodId> {
        self.check_free(cell)?;
        let id = self.next_food;
        self.next_food = id.next();
        self.food.push(Food { id, pos: cell, value: spec.value, tag: spec.tag });
        Ok(id)
    }

    pub fn place_obstacle(&mut self, cell: Cell, spec: ObstacleSpec) -> PlacementResult<ObstacleId> {
        self.check_free(cell)?;
        let id = self.next_obstacle;
        self.next_obstacle = id.next();
        self.obstacles.push(Obstacle {
            id,
            pos:              cell,
            destructible:     spec.destructible,
            destruction_cost: spec.destruction_cost,
            mobility:         spec.mobility,
        });
        Ok(id)
    }

    /// Re-insert a persisted agent, keeping its id.  Same placement rules.
    pub fn restore_agent(&mut self, agent: Agent) -> PlacementResult<()> {
        self.check_free(agent.pos)?;
        if self.agents.get(agent.id).is_some() {
            return Err(PlacementError::DuplicateId(agent.id.to_string()));
        }
        self.agents.restore(agent);
        Ok(())
    }

    /// Re-insert persisted food, keeping its id.
    pub fn restore_food(&mut self, food: Food) -> PlacementResult<()> {
        self.check_free(food.pos)?;
        if self.food.iter().any(|f| f.id == food.id) {
            return Err(PlacementError::DuplicateId(food.id.to_string()));
        }
        if food.id >= self.next_food {
            self.next_food = food.id.next();
        }
        self.food.push(food);
        Ok(())
    }

    /// Re-insert a persisted obstacle, keeping its id.
    pub fn restore_obstacle(&mut self, obstacle: Obstacle) -> PlacementResult<()> {
        self.check_free(obstacle.pos)?;
        if self.obstacles.iter().any(|o| o.id == obstacle.id) {
            return Err(PlacementError::DuplicateId(obstacle.id.to_string()));
        }
        if obstacle.id >= self.next_obstacle {
            self.next_obstacle = obstacle.id.next();
        }
        self.obstacles.push(obstacle);
        Ok(())
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Remove whatever stands on `cell`.
    pub fn remove_at(&mut self, cell: Cell) -> Option<Removed> {
        if let Some(id) = self.agents.at(cell).map(|a| a.id) {
            return self.agents.remove(id).map(Removed::Agent);
        }
        if let Some(food) = self.consume_food_at(cell) {
            return Some(Removed::Food(food));
        }
        self.take_obstacle_at(cell).map(Removed::Obstacle)
    }

    /// Take the food on `cell` out of the world.
    pub fn consume_food_at(&mut self, cell: Cell) -> Option<Food> {
        let idx = self.food.iter().position(|f| f.pos == cell)?;
        Some(self.food.remove(idx))
    }

    /// Take the obstacle on `cell` out of the world.
    pub fn take_obstacle_at(&mut self, cell: Cell) -> Option<Obstacle> {
        let idx = self.obstacles.iter().position(|o| o.pos == cell)?;
        Some(self.obstacles.remove(idx))
    }

    /// Move an agent directly, outside normal movement rules.  The target
    /// is clamped into bounds; the move is refused (returns `false`) if
    /// something else already stands there.
    pub fn teleport_agent(&mut self, id: AgentId, target: Cell) -> bool {
        let target = self.dims.clamp(target);
        let Some(current) = self.agents.get(id).map(|a| a.pos) else {
            return false;
        };
        if current == target {
            return true;
        }
        if self.is_occupied(target) {
            return false;
        }
        match self.agents.get_mut(id) {
            Some(agent) => {
                agent.place_at(target);
                true
            }
            None => false,
        }
    }

    // ── Dynamic obstacles ─────────────────────────────────────────────────

    /// Each dynamic obstacle, in placement order, takes one random
    /// orthogonal step into an in-bounds unoccupied cell, or stays if none
    /// is free.  Returns how many moved.
    pub fn advance_dynamic_obstacles(&mut self, rng: &mut SimRng) -> usize {
        let mut moved = 0;
        for i in 0..self.obstacles.len() {
            if self.obstacles[i].mobility != Mobility::Dynamic {
                continue;
            }
            let from = self.obstacles[i].pos;
            let free: Vec<Cell> = from
                .neighbors4()
                .into_iter()
                .filter(|&c| self.dims.contains(c) && !self.is_occupied(c))
                .collect();
            if let Some(&to) = rng.choose(&free) {
                debug!(obstacle = %self.obstacles[i].id, %from, %to, "Dynamic obstacle moved");
                self.obstacles[i].pos = to;
                moved += 1;
            }
        }
        moved
    }
}

impl Default for World {
    fn default() -> Self {
        World::new(GridDims::default())
    }
}
