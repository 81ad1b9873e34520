//! Integration tests for gs-sim.

use std::sync::Arc;

use serde_json::json;

use gs_behavior::{BehaviorResult, CodeRunner, Perception};
use gs_core::{AgentId, AgentRng, BehaviorKind, Cell, Delta, GridDims, Tick};
use gs_world::{ObstacleSpec, World};

use crate::{
    Command, CommandOutcome, NoopObserver, Rejection, Sim, SimBuilder, SimConfig, SimError,
    SimObserver, StopReason, TickOutcome, TickReport, WorldSnapshot,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sim(w: i32, h: i32) -> Sim {
    SimBuilder::new(SimConfig::default()).dims(GridDims::new(w, h).unwrap()).build().unwrap()
}

fn cmd(value: serde_json::Value) -> Command {
    serde_json::from_value(value).unwrap()
}

fn add_agent(s: &mut Sim, kind: &str, x: i32, y: i32) -> AgentId {
    let before = s.world.agents.ids();
    let out = s.execute(cmd(json!({"type": "ADD_AGENT", "data": {"x": x, "y": y, "agent_type": kind}})));
    assert_eq!(out, CommandOutcome::Applied);
    *s.world.agents.ids().iter().find(|id| !before.contains(id)).unwrap()
}

fn add_food(s: &mut Sim, x: i32, y: i32) {
    let out = s.execute(cmd(json!({"type": "ADD_FOOD", "data": {"x": x, "y": y}})));
    assert_eq!(out, CommandOutcome::Applied);
}

fn pos(s: &Sim, id: AgentId) -> Cell {
    s.world.agents.get(id).unwrap().pos
}

fn energy(s: &Sim, id: AgentId) -> f64 {
    s.world.agents.get(id).unwrap().energy
}

/// Accepts any program and always answers with the same delta.
struct Fixed(Delta);

impl CodeRunner for Fixed {
    fn validate(&self, _code: &str) -> BehaviorResult<()> {
        Ok(())
    }
    fn run(&self, _code: &str, _p: &Perception, _rng: &mut AgentRng) -> BehaviorResult<Delta> {
        Ok(self.0)
    }
}

const SEEK_FOOD: &str = r#"
(module
  (import "agent" "x" (func $x (result i32)))
  (import "agent" "y" (func $y (result i32)))
  (import "agent" "food_count" (func $count (result i32)))
  (import "agent" "food_x" (func $fx (param i32) (result i32)))
  (import "agent" "food_y" (func $fy (param i32) (result i32)))
  (import "math" "sign" (func $sign (param i32) (result i32)))
  (func (export "decide") (result i32 i32)
    (if (result i32 i32) (i32.eqz (call $count))
      (then (i32.const 0) (i32.const 0))
      (else
        (call $sign (i32.sub (call $fx (i32.const 0)) (call $x)))
        (call $sign (i32.sub (call $fy (i32.const 0)) (call $y)))))))
"#;

const READS_FILES: &str = r#"
(module
  (import "wasi_snapshot_preview1" "path_open" (func $open (param i32) (result i32)))
  (func (export "decide") (result i32 i32)
    i32.const 0
    i32.const 0))
"#;

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_empty_paused_world() {
        let s = SimBuilder::new(SimConfig::default()).build().unwrap();
        assert_eq!(s.world.dims(), GridDims::default());
        assert_eq!(s.tick(), Tick::ZERO);
        assert!(!s.is_running());
        assert!(s.world.agents.is_empty());
    }

    #[test]
    fn invalid_config_is_refused() {
        let mut config = SimConfig::default();
        config.energy.max_energy = 0.0;
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn config_loads_from_toml() {
        let config = SimConfig::from_toml_str(
            "max_steps = 7\nseed = 3\n[energy]\nmove_cost = 1.0\n",
        )
        .unwrap();
        assert_eq!(config.max_steps, 7);
        assert_eq!(config.seed, 3);
        assert_eq!(config.energy.move_cost, 1.0);
        assert_eq!(config.energy.max_energy, 150.0);
        assert!(config.stop_on_no_food);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn collector_crosses_corridor_within_diameter() {
        for strategy in ["bfs", "dijkstra", "a_star"] {
            let mut s = sim(7, 3);
            s.execute(cmd(json!({"type": "ADD_AGENT",
                "data": {"x": 0, "y": 1, "agent_type": "collector", "strategy": strategy}})));
            add_food(&mut s, 6, 1);
            let id = s.world.agents.ids()[0];

            let mut ticks = 0;
            while !s.world.food().is_empty() && ticks < 20 {
                assert!(matches!(s.step(), TickOutcome::Advanced(_)));
                ticks += 1;
            }
            assert!(s.world.food().is_empty(), "{strategy}: food never eaten");
            assert!(ticks <= 6, "{strategy}: took {ticks} ticks");
            assert_eq!(pos(&s, id), Cell::new(6, 1));
            assert_eq!(s.world.agents.get(id).unwrap().stats.food_collected, 1);
        }
    }

    #[test]
    fn collector_breaks_through_destructible_obstacle() {
        let mut s = sim(5, 3);
        let id = add_agent(&mut s, "collector", 0, 1);
        s.execute(cmd(json!({"type": "ADD_OBSTACLE",
            "data": {"x": 1, "y": 1, "config": {"isDestructible": true, "destructionCost": 10}}})));
        add_food(&mut s, 3, 1);

        let report = s.step();
        assert_eq!(report.report().unwrap().obstacles_destroyed, 1);
        assert_eq!(pos(&s, id), Cell::new(0, 1));
        assert_eq!(energy(&s, id), 90.0);
        assert!(s.world.obstacles().is_empty());

        for _ in 0..3 {
            s.step();
        }
        assert_eq!(pos(&s, id), Cell::new(3, 1));
        assert!(s.world.food().is_empty());
    }

    #[test]
    fn unaffordable_obstacle_is_a_collision() {
        let mut s = sim(3, 1);
        let id = add_agent(&mut s, "collector", 0, 0);
        s.world.agents.get_mut(id).unwrap().energy = 5.0;
        s.world
            .place_obstacle(Cell::new(1, 0), ObstacleSpec { destructible: true, destruction_cost: 10.0, ..ObstacleSpec::default() })
            .unwrap();
        add_food(&mut s, 2, 0);

        let report = s.step().report().cloned().unwrap();
        assert_eq!(report.collisions, 1);
        assert_eq!(s.world.obstacles().len(), 1);
        assert_eq!(energy(&s, id), 5.0 - s.config.energy.collision_cost);
    }

    #[test]
    fn cooperatives_claim_different_food() {
        let mut s = sim(5, 3);
        let a = add_agent(&mut s, "cooperative", 0, 0);
        let b = add_agent(&mut s, "cooperative", 0, 2);
        add_food(&mut s, 0, 1);
        add_food(&mut s, 4, 1);

        s.step();
        let claims: Vec<_> = s.claims().iter().map(|c| (c.agent, c.cell)).collect();
        assert_eq!(claims, vec![(a, Cell::new(0, 1)), (b, Cell::new(4, 1))]);
        assert_eq!(s.world.agents.get(b).unwrap().memory.inbox, vec![Cell::new(0, 1)]);
        // The earlier agent never sees a later agent's claim.
        assert!(s.world.agents.get(a).unwrap().memory.inbox.is_empty());

        // a ate (0,1).  Tick 2 starts from an empty log, so b's stale claim on
        // (4,1) does not stop a from claiming it first.
        assert_eq!(s.world.food().len(), 1);
        s.step();
        let claims: Vec<_> = s.claims().iter().map(|c| (c.agent, c.cell)).collect();
        assert_eq!(claims, vec![(a, Cell::new(4, 1))]);
        assert!(s.world.agents.get(a).unwrap().memory.inbox.is_empty());
        assert_eq!(s.world.agents.get(b).unwrap().memory.inbox, vec![Cell::new(4, 1)]);
    }

    #[test]
    fn dead_agent_stays_put() {
        let mut s = sim(5, 5);
        s.execute(cmd(json!({"type": "ADD_AGENT",
            "data": {"x": 2, "y": 2, "agent_type": "collector", "config": {"initialEnergy": 0}}})));
        add_food(&mut s, 2, 3);
        let id = s.world.agents.ids()[0];

        for _ in 0..10 {
            let report = s.step();
            assert_eq!(report.report().unwrap().decided, 0);
        }
        assert_eq!(pos(&s, id), Cell::new(2, 2));
        assert_eq!(energy(&s, id), 0.0);
        assert_eq!(s.world.food().len(), 1);
    }

    #[test]
    fn custom_agent_moves_by_fixed_runner() {
        let mut s = SimBuilder::new(SimConfig::default())
            .dims(GridDims::new(5, 5).unwrap())
            .runner(Arc::new(Fixed(Delta::new(5, 0))))
            .build()
            .unwrap();
        s.execute(cmd(json!({"type": "UPDATE_AGENT_CODE", "data": {"agent_type": "custom", "code": "anything"}})));
        let id = add_agent(&mut s, "custom", 0, 0);
        add_food(&mut s, 4, 4);

        s.step();
        assert_eq!(pos(&s, id), Cell::new(1, 0));
    }

    #[test]
    fn custom_agent_without_code_stays_put() {
        let mut s = sim(5, 5);
        let id = add_agent(&mut s, "custom", 2, 2);
        add_food(&mut s, 4, 4);
        s.step();
        assert_eq!(pos(&s, id), Cell::new(2, 2));
        assert_eq!(energy(&s, id), 100.0);
    }
}

// ── Invariants ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod invariant_tests {
    use super::*;

    #[test]
    fn positions_stay_in_bounds() {
        let mut s = sim(4, 4);
        s.config.unlimited = true;
        s.config.stop_on_no_food = false;
        for (i, kind) in ["explorer", "reactive", "competitive", "q_learning"].iter().enumerate() {
            add_agent(&mut s, kind, i as i32, 0);
        }
        s.execute(cmd(json!({"type": "ADD_OBSTACLE", "data": {"x": 2, "y": 2, "subtype": "dynamic"}})));

        for _ in 0..200 {
            s.step();
            for a in s.world.agents.iter() {
                assert!(s.world.contains(a.pos), "{} left the grid at {}", a.id, a.pos);
            }
            for o in s.world.obstacles() {
                assert!(s.world.contains(o.pos));
            }
        }
    }

    #[test]
    fn eating_caps_energy() {
        let mut s = sim(3, 1);
        s.execute(cmd(json!({"type": "ADD_AGENT",
            "data": {"x": 0, "y": 0, "agent_type": "collector", "config": {"initialEnergy": 149}}})));
        add_food(&mut s, 1, 0);
        add_food(&mut s, 2, 0);
        let id = s.world.agents.ids()[0];

        s.step();
        assert_eq!(energy(&s, id), s.config.energy.max_energy);
        assert_eq!(s.world.food().len(), 1);
    }

    #[test]
    fn eating_strictly_raises_energy() {
        let mut s = sim(3, 1);
        let id = add_agent(&mut s, "collector", 0, 0);
        add_food(&mut s, 1, 0);
        add_food(&mut s, 2, 0);

        s.step();
        assert_eq!(energy(&s, id), 100.0 - 0.5 + 20.0);
    }

    #[test]
    fn initial_energy_is_capped_on_placement() {
        let mut s = sim(3, 3);
        s.execute(cmd(json!({"type": "ADD_AGENT",
            "data": {"x": 0, "y": 0, "config": {"initialEnergy": 900}}})));
        let id = s.world.agents.ids()[0];
        assert_eq!(energy(&s, id), s.config.energy.max_energy);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut s = sim(6, 6);
        add_agent(&mut s, "explorer", 0, 0);
        add_food(&mut s, 5, 5);
        s.step();
        s.config.max_steps = 33;

        s.reset();
        let once = s.snapshot();
        s.reset();
        assert_eq!(s.snapshot(), once);
        assert!(once.agents.is_empty() && once.food.is_empty() && once.obstacles.is_empty());
        assert_eq!(once.step, 0);
        assert_eq!(s.config.max_steps, 33);
    }

    #[test]
    fn ids_restart_after_reset() {
        let mut s = sim(4, 4);
        add_agent(&mut s, "reactive", 0, 0);
        let second = add_agent(&mut s, "reactive", 1, 0);
        assert_eq!(second, AgentId(2));
        s.reset();
        assert_eq!(add_agent(&mut s, "reactive", 0, 0), AgentId(1));
    }

    #[test]
    fn same_seed_same_run() {
        let build = || {
            let mut s = sim(8, 8);
            s.config.unlimited = true;
            for x in 0..4 {
                add_agent(&mut s, "explorer", x, 0);
            }
            add_food(&mut s, 7, 7);
            s.run_ticks(30, &mut NoopObserver);
            s.snapshot()
        };
        assert_eq!(build(), build());
    }
}

// ── Stop conditions ───────────────────────────────────────────────────────────

#[cfg(test)]
mod stop_tests {
    use super::*;

    #[test]
    fn step_budget_halts() {
        let mut s = sim(5, 5);
        s.config.max_steps = 3;
        add_agent(&mut s, "explorer", 0, 0);
        add_food(&mut s, 4, 4);

        let summary = s.run(&mut NoopObserver).unwrap();
        assert_eq!(summary.ticks, 3);
        assert!(!s.is_running());
        assert_eq!(s.step(), TickOutcome::Halted(StopReason::StepBudget));
        assert_eq!(s.tick(), Tick(3));
    }

    #[test]
    fn no_food_halts_only_with_agents() {
        let mut s = sim(5, 5);
        assert!(matches!(s.step(), TickOutcome::Advanced(_)));

        add_agent(&mut s, "reactive", 0, 0);
        assert_eq!(s.step(), TickOutcome::Halted(StopReason::NoFood));
    }

    #[test]
    fn eating_last_food_pauses_after_the_tick() {
        let mut s = sim(3, 1);
        add_agent(&mut s, "collector", 0, 0);
        add_food(&mut s, 1, 0);
        s.set_running(true);

        let report = s.step().report().cloned().unwrap();
        assert_eq!(report.food_eaten, 1);
        assert_eq!(report.halted, Some(StopReason::NoFood));
        assert!(!s.is_running());
    }

    #[test]
    fn unlimited_ignores_budget_but_cannot_run() {
        let mut s = sim(5, 5);
        s.config.max_steps = 1;
        s.config.unlimited = true;
        add_agent(&mut s, "explorer", 0, 0);
        add_food(&mut s, 4, 4);

        assert_eq!(s.run_ticks(5, &mut NoopObserver), 5);
        assert!(matches!(s.run(&mut NoopObserver), Err(SimError::Unbounded)));
    }

    #[test]
    fn step_command_reports_halt() {
        let mut s = sim(5, 5);
        add_agent(&mut s, "reactive", 0, 0);
        let out = s.execute(Command::Step);
        assert_eq!(out, CommandOutcome::rejected(Rejection::Halted { stop: StopReason::NoFood }));
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod command_tests {
    use super::*;

    #[test]
    fn parses_wire_commands() {
        assert_eq!(Command::from_json(r#"{"type":"STEP"}"#).unwrap(), Command::Step);
        assert_eq!(Command::from_json(r#"{"type":"START","data":{}}"#).unwrap(), Command::Start);

        let Command::AddAgent(args) =
            Command::from_json(r#"{"type":"ADD_AGENT","data":{"x":1,"y":2}}"#).unwrap()
        else {
            panic!("wrong variant");
        };
        assert_eq!((args.x, args.y), (1, 2));
        assert_eq!(args.agent_type, "reactive");
        assert_eq!(args.strategy, "bfs");

        let Command::ResizeGrid(args) = Command::from_json(r#"{"type":"RESIZE_GRID","data":{}}"#).unwrap()
        else {
            panic!("wrong variant");
        };
        assert_eq!((args.width, args.height), (25, 25));

        let Command::UpdateAgentCode(args) = Command::from_json(
            r#"{"type":"UPDATE_AGENT_CODE","data":{"agentType":"custom","code":"x"}}"#,
        )
        .unwrap() else {
            panic!("wrong variant");
        };
        assert_eq!(args.agent_type, "custom");
    }

    #[test]
    fn rejects_unknown_or_malformed_commands() {
        assert!(Command::from_json(r#"{"type":"TELEPORT_EVERYONE"}"#).is_err());
        assert!(Command::from_json(r#"{"type":"ADD_FOOD","data":{"x":"left"}}"#).is_err());
        assert!(Command::from_json(r#"{"data":{}}"#).is_err());
    }

    #[test]
    fn serializes_tagged() {
        let v = serde_json::to_value(Command::Reset).unwrap();
        assert_eq!(v, json!({"type": "RESET"}));
        let v = serde_json::to_value(cmd(json!({"type": "SET_SPEED", "data": {"speed": 2.0}}))).unwrap();
        assert_eq!(v, json!({"type": "SET_SPEED", "data": {"speed": 2.0}}));
    }

    #[test]
    fn placement_on_occupied_cell_is_rejected() {
        let mut s = sim(5, 5);
        add_food(&mut s, 1, 1);
        let out = s.execute(cmd(json!({"type": "ADD_AGENT", "data": {"x": 1, "y": 1}})));
        assert_eq!(out, CommandOutcome::rejected(Rejection::Occupied { cell: Cell::new(1, 1) }));
        assert!(s.world.agents.is_empty());

        let out = s.execute(cmd(json!({"type": "ADD_OBSTACLE", "data": {"x": 9, "y": 0}})));
        assert_eq!(out, CommandOutcome::rejected(Rejection::OutOfBounds { cell: Cell::new(9, 0) }));
    }

    #[test]
    fn malformed_placement_fields_are_skipped() {
        let mut s = sim(5, 5);
        let out = s.execute(cmd(json!({"type": "ADD_AGENT",
            "data": {"x": 0, "y": 0, "agent_type": "explorer",
                     "config": {"color": "#123456", "visionRadius": "far", "initialEnergy": "80"}}})));
        assert_eq!(out, CommandOutcome::Partial { skipped: vec!["visionRadius".to_owned()] });
        let agent = s.world.agents.iter().next().unwrap();
        assert_eq!(agent.color, "#123456");
        assert_eq!(agent.energy, 80.0);
        assert_eq!(agent.vision_radius, s.config.defaults.vision_radius);
        assert_eq!(agent.kind, BehaviorKind::Explorer);
    }

    #[test]
    fn food_and_obstacle_config() {
        let mut s = sim(5, 5);
        s.execute(cmd(json!({"type": "ADD_FOOD",
            "data": {"x": 0, "y": 0, "food_type": "energy", "config": {"nutritionValue": 35}}})));
        s.execute(cmd(json!({"type": "ADD_OBSTACLE",
            "data": {"x": 1, "y": 0, "subtype": "dynamic", "config": {"destructible": "yes"}}})));

        let food = &s.world.food()[0];
        assert_eq!((food.value, food.tag.as_str()), (35.0, "energy"));
        let obstacle = &s.world.obstacles()[0];
        assert!(obstacle.destructible);
        assert_eq!(obstacle.destruction_cost, s.config.defaults.destruction_cost);
        assert_eq!(obstacle.mobility, gs_core::Mobility::Dynamic);
    }

    #[test]
    fn remove_element_reports_empty_cells() {
        let mut s = sim(5, 5);
        add_food(&mut s, 2, 2);
        assert_eq!(s.execute(cmd(json!({"type": "REMOVE_ELEMENT", "data": {"x": 2, "y": 2}}))), CommandOutcome::Applied);
        assert!(s.world.food().is_empty());
        assert_eq!(
            s.execute(cmd(json!({"type": "REMOVE_ELEMENT", "data": {"x": 2, "y": 2}}))),
            CommandOutcome::rejected(Rejection::NothingAt { cell: Cell::new(2, 2) })
        );
    }

    #[test]
    fn batch_move_clamps_and_skips() {
        let mut s = sim(5, 5);
        let a = add_agent(&mut s, "reactive", 0, 0);
        let b = add_agent(&mut s, "reactive", 1, 0);
        add_food(&mut s, 3, 3);

        let out = s.execute(cmd(json!({"type": "BATCH_MOVE", "data": {"moves": [
            {"id": "agent_1", "x": 40, "y": -3},
            {"id": 2, "x": 3, "y": 3},
            {"id": "nobody", "x": 0, "y": 0}
        ]}})));
        assert_eq!(out, CommandOutcome::Partial { skipped: vec![b.to_string(), "moves[2]".to_owned()] });
        assert_eq!(pos(&s, a), Cell::new(4, 0));
        assert_eq!(pos(&s, b), Cell::new(1, 0));
    }

    #[test]
    fn resize_validates_and_resets() {
        let mut s = sim(5, 5);
        add_agent(&mut s, "reactive", 0, 0);
        let out = s.execute(cmd(json!({"type": "RESIZE_GRID", "data": {"width": 0, "height": 10}})));
        assert_eq!(out, CommandOutcome::rejected(Rejection::InvalidDimensions { width: 0, height: 10 }));
        assert_eq!(s.world.agents.len(), 1);

        let reply = s.apply(cmd(json!({"type": "RESIZE_GRID", "data": {"width": 12, "height": 8}})));
        assert_eq!(reply.outcome, CommandOutcome::Applied);
        assert_eq!((reply.state.width, reply.state.height), (12, 8));
        assert!(reply.state.agents.is_empty());
    }

    #[test]
    fn speed_sets_tick_interval() {
        let mut s = sim(5, 5);
        assert_eq!(s.execute(cmd(json!({"type": "SET_SPEED", "data": {"speed": 2}}))), CommandOutcome::Applied);
        assert_eq!(s.config.tick_interval_ms, 250);
        let out = s.execute(cmd(json!({"type": "SET_SPEED", "data": {"speed": 0}})));
        assert!(out.is_rejected());
        assert_eq!(s.config.tick_interval_ms, 250);
    }

    #[test]
    fn malformed_config_field_keeps_prior_value() {
        let mut s = sim(5, 5);
        let out = s.execute(cmd(json!({"type": "UPDATE_CONFIG",
            "data": {"maxSteps": "lots", "isUnlimited": "true", "stopOnFood": false}})));
        assert_eq!(out, CommandOutcome::Partial { skipped: vec!["maxSteps".to_owned()] });
        assert_eq!(s.config.max_steps, 100);
        assert!(s.config.unlimited);
        assert!(!s.config.stop_on_no_food);

        let out = s.execute(cmd(json!({"type": "UPDATE_CONFIG", "data": {"maxSteps": 250}})));
        assert_eq!(out, CommandOutcome::Applied);
        assert_eq!(s.config.max_steps, 250);
    }

    #[test]
    fn start_and_pause_toggle_running() {
        let mut s = sim(5, 5);
        assert!(s.apply(Command::Start).state.is_running);
        assert!(!s.apply(Command::Pause).state.is_running);
        s.execute(Command::Start);
        assert!(!s.apply(Command::Stop).state.is_running);
    }

    #[test]
    fn reply_carries_config_view() {
        let mut s = sim(5, 5);
        let reply = s.apply(cmd(json!({"type": "UPDATE_CONFIG", "data": {"max_steps": 12}})));
        let state = serde_json::to_value(&reply.state).unwrap();
        assert_eq!(state["config"]["maxSteps"], json!(12));
        assert_eq!(state["isRunning"], json!(false));
    }
}

// ── Snapshots ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot_tests {
    use super::*;

    #[test]
    fn export_then_load_reproduces_state() {
        let mut s = SimBuilder::new(SimConfig::default())
            .dims(GridDims::new(6, 6).unwrap())
            .runner(Arc::new(Fixed(Delta::new(0, 1))))
            .build()
            .unwrap();
        s.execute(cmd(json!({"type": "UPDATE_AGENT_CODE", "data": {"agent_type": "custom", "code": "prog"}})));
        add_agent(&mut s, "custom", 0, 0);
        add_agent(&mut s, "explorer", 3, 3);
        add_food(&mut s, 5, 0);
        s.execute(cmd(json!({"type": "ADD_OBSTACLE", "data": {"x": 2, "y": 5, "config": {"isDestructible": 1}}})));
        s.run_ticks(3, &mut NoopObserver);

        let exported = s.export_state();
        let json = exported.to_json().unwrap();

        let mut fresh = SimBuilder::new(SimConfig::default())
            .runner(Arc::new(Fixed(Delta::new(0, 0))))
            .build()
            .unwrap();
        fresh.load_state(WorldSnapshot::from_json(&json).unwrap()).unwrap();
        assert_eq!(fresh.export_state(), exported);
        assert_eq!(fresh.code_for(BehaviorKind::Custom), Some("prog"));
        let explorer = fresh.world.agents.iter().find(|a| a.kind == BehaviorKind::Explorer).unwrap();
        assert!(!explorer.memory.visited.is_empty());
    }

    #[test]
    fn overlapping_snapshot_leaves_world_untouched() {
        let mut s = sim(5, 5);
        add_agent(&mut s, "reactive", 1, 1);
        let mut snap = s.export_state();
        snap.food.push(gs_world::Food { id: gs_core::FoodId(1), pos: Cell::new(1, 1), value: 5.0, tag: "food".into() });

        let mut target = sim(5, 5);
        add_food(&mut target, 4, 4);
        let before = target.snapshot();
        let out = target.execute(Command::LoadState(Box::new(snap)));
        assert!(matches!(out, CommandOutcome::Rejected { rejection: Rejection::InvalidState { .. } }));
        assert_eq!(target.snapshot(), before);
    }

    #[test]
    fn duplicate_agent_ids_are_refused() {
        let mut s = sim(5, 5);
        add_agent(&mut s, "reactive", 0, 0);
        let mut snap = s.export_state();
        let twin = gs_agent::Agent { pos: Cell::new(4, 4), ..snap.agents[0].clone() };
        snap.agents.push(twin);

        let mut fresh = sim(5, 5);
        add_food(&mut fresh, 2, 2);
        let before = fresh.snapshot();
        let err = fresh.load_state(snap).unwrap_err();
        assert!(matches!(err, SimError::Placement(gs_world::PlacementError::DuplicateId(_))));
        assert_eq!(fresh.snapshot(), before);
    }

    #[test]
    fn rejected_program_is_not_loaded() {
        // The default runner refuses every upload, so it must refuse the
        // same program arriving inside a snapshot.
        let mut fresh = sim(5, 5);
        let upload = fresh.execute(cmd(json!({"type": "UPDATE_AGENT_CODE",
            "data": {"agent_type": "custom", "code": READS_FILES}})));
        assert!(matches!(upload, CommandOutcome::Rejected { rejection: Rejection::CodeRejected { .. } }));

        let mut snap = sim(5, 5).export_state();
        snap.agent_code.insert(BehaviorKind::Custom, READS_FILES.to_owned());
        let out = fresh.execute(Command::LoadState(Box::new(snap)));
        assert!(matches!(out, CommandOutcome::Rejected { rejection: Rejection::InvalidState { .. } }));
        assert_eq!(fresh.code_for(BehaviorKind::Custom), None);
    }

    #[test]
    fn rejected_agent_program_is_not_loaded() {
        let mut s = sim(5, 5);
        add_agent(&mut s, "custom", 1, 1);
        let mut snap = s.export_state();
        snap.agents[0].memory.code = Some(READS_FILES.to_owned());

        let mut fresh = sim(5, 5);
        let err = fresh.load_state(snap).unwrap_err();
        assert!(matches!(err, SimError::RejectedCode { kind: BehaviorKind::Custom, .. }));
        assert!(fresh.world.agents.is_empty());
    }

    #[test]
    fn loaded_energy_is_capped() {
        let mut s = sim(5, 5);
        add_agent(&mut s, "reactive", 0, 0);
        let mut snap = s.export_state();
        snap.agents[0].energy = 10_000.0;

        let mut fresh = sim(5, 5);
        fresh.load_state(snap).unwrap();
        let cap = fresh.config.energy.max_energy;
        assert_eq!(fresh.world.agents.iter().next().unwrap().energy, cap);
    }

    #[test]
    fn load_continues_id_sequence() {
        let mut s = sim(5, 5);
        add_agent(&mut s, "reactive", 0, 0);
        add_agent(&mut s, "reactive", 1, 0);
        let snap = s.export_state();

        let mut fresh = sim(5, 5);
        fresh.load_state(snap).unwrap();
        assert_eq!(add_agent(&mut fresh, "reactive", 2, 0), AgentId(3));
    }

    #[test]
    fn snapshot_uses_wire_names() {
        let mut s = sim(5, 5);
        add_agent(&mut s, "reactive", 0, 0);
        let v = serde_json::to_value(s.snapshot()).unwrap();
        assert!(v["agents"][0].get("visionRadius").is_some());
        assert!(v.get("isRunning").is_some());
        assert!(v.get("agentCode").is_none());
    }
}

// ── Sandbox end to end ────────────────────────────────────────────────────────

#[cfg(test)]
mod sandbox_tests {
    use super::*;
    use gs_sandbox::{SandboxConfig, WasmSandbox};

    fn sandboxed(w: i32, h: i32) -> Sim {
        let runner: Arc<dyn CodeRunner> = Arc::new(WasmSandbox::new(SandboxConfig::default()).unwrap());
        SimBuilder::new(SimConfig::default())
            .dims(GridDims::new(w, h).unwrap())
            .runner(runner)
            .build()
            .unwrap()
    }

    #[test]
    fn custom_program_walks_to_food() {
        let mut s = sandboxed(6, 6);
        let out = s.execute(cmd(json!({"type": "UPDATE_AGENT_CODE",
            "data": {"agent_type": "custom", "code": SEEK_FOOD}})));
        assert_eq!(out, CommandOutcome::Applied);
        let id = add_agent(&mut s, "custom", 0, 0);
        add_food(&mut s, 3, 3);

        for _ in 0..3 {
            s.step();
        }
        assert_eq!(pos(&s, id), Cell::new(3, 3));
        assert!(s.world.food().is_empty());
    }

    #[test]
    fn rejected_code_keeps_stored_program() {
        let mut s = sandboxed(6, 6);
        s.execute(cmd(json!({"type": "UPDATE_AGENT_CODE", "data": {"agent_type": "custom", "code": SEEK_FOOD}})));
        let id = add_agent(&mut s, "custom", 0, 0);

        let out = s.execute(cmd(json!({"type": "UPDATE_AGENT_CODE",
            "data": {"agent_type": "custom", "code": READS_FILES}})));
        assert!(matches!(out, CommandOutcome::Rejected { rejection: Rejection::CodeRejected { .. } }));
        assert_eq!(s.code_for(BehaviorKind::Custom), Some(SEEK_FOOD));
        assert_eq!(s.world.agents.get(id).unwrap().memory.code.as_deref(), Some(SEEK_FOOD));
    }

    #[test]
    fn code_update_hot_swaps_existing_agents() {
        let mut s = sandboxed(6, 6);
        let id = add_agent(&mut s, "custom", 0, 0);
        assert!(s.world.agents.get(id).unwrap().memory.code.is_none());
        s.execute(cmd(json!({"type": "UPDATE_AGENT_CODE", "data": {"agent_type": "custom", "code": SEEK_FOOD}})));
        assert_eq!(s.world.agents.get(id).unwrap().memory.code.as_deref(), Some(SEEK_FOOD));
    }

    #[test]
    fn default_runner_rejects_all_code() {
        let mut s = sim(5, 5);
        let out = s.execute(cmd(json!({"type": "UPDATE_AGENT_CODE", "data": {"agent_type": "custom", "code": SEEK_FOOD}})));
        assert!(out.is_rejected());
        assert_eq!(s.code_for(BehaviorKind::Custom), None);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        starts:    u64,
        ends:      u64,
        snapshots: Vec<Tick>,
        halts:     Vec<StopReason>,
    }

    impl SimObserver for Counting {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {
            self.ends += 1;
        }
        fn on_snapshot(&mut self, tick: Tick, _world: &World) {
            self.snapshots.push(tick);
        }
        fn on_halt(&mut self, _tick: Tick, reason: StopReason) {
            self.halts.push(reason);
        }
    }

    #[test]
    fn hooks_fire_per_tick_and_interval() {
        let mut s = sim(5, 5);
        s.config.max_steps = 4;
        s.config.output_interval_ticks = 2;
        add_agent(&mut s, "explorer", 0, 0);
        add_food(&mut s, 4, 4);

        let mut obs = Counting::default();
        s.run(&mut obs).unwrap();
        assert_eq!(obs.starts, 4);
        assert_eq!(obs.ends, 4);
        assert_eq!(obs.snapshots, vec![Tick(2), Tick(4)]);
        assert_eq!(obs.halts.first(), Some(&StopReason::StepBudget));
    }

    #[test]
    fn summary_tracks_coverage() {
        let mut s = sim(2, 1);
        s.config.unlimited = true;
        add_agent(&mut s, "explorer", 0, 0);
        add_food(&mut s, 1, 0);
        s.step();

        let summary = s.summary();
        assert_eq!(summary.food_collected, 1);
        assert_eq!(summary.coverage_percent, 100.0);
        assert_eq!(summary.heatmap, vec![vec![1, 1]]);
    }
}
