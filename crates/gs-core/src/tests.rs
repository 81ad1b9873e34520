//! Unit tests for gs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, FoodId, ObstacleId};

    #[test]
    fn counter_starts_at_one_and_increments() {
        assert_eq!(AgentId::FIRST, AgentId(1));
        assert_eq!(AgentId(1).next(), AgentId(2));
        assert_eq!(AgentId::default(), AgentId::FIRST);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(FoodId(100) > FoodId(99));
    }

    #[test]
    fn display_uses_label_prefix() {
        assert_eq!(AgentId(7).to_string(), "agent_7");
        assert_eq!(FoodId(2).to_string(), "food_2");
        assert_eq!(ObstacleId(3).to_string(), "obstacle_3");
    }
}

#[cfg(test)]
mod cell {
    use crate::{Cell, Delta, Direction};

    #[test]
    fn manhattan_is_symmetric() {
        let a = Cell::new(0, 1);
        let b = Cell::new(6, 1);
        assert_eq!(a.manhattan(b), 6);
        assert_eq!(b.manhattan(a), 6);
        assert_eq!(Cell::new(-2, 3).manhattan(Cell::new(1, -1)), 7);
    }

    #[test]
    fn directions_match_screen_coordinates() {
        let c = Cell::new(5, 5);
        assert_eq!(c.step(Direction::North), Cell::new(5, 4));
        assert_eq!(c.step(Direction::East), Cell::new(6, 5));
        assert_eq!(c.step(Direction::South), Cell::new(5, 6));
        assert_eq!(c.step(Direction::West), Cell::new(4, 5));
    }

    #[test]
    fn neighbors_follow_nesw_order() {
        let n = Cell::new(1, 1).neighbors4();
        assert_eq!(n, [Cell::new(1, 0), Cell::new(2, 1), Cell::new(1, 2), Cell::new(0, 1)]);
    }

    #[test]
    fn clamp_unit_squashes_components() {
        assert_eq!(Delta::new(5, -9).clamp_unit(), Delta::new(1, -1));
        assert_eq!(Delta::new(0, 2).clamp_unit(), Delta::new(0, 1));
        assert!(Delta::new(0, 0).clamp_unit().is_zero());
    }

    #[test]
    fn delta_to_inverts_offset() {
        let from = Cell::new(3, 4);
        let to = Cell::new(1, 9);
        assert_eq!(from.offset(from.delta_to(to)), to);
    }
}

#[cfg(test)]
mod grid {
    use crate::{Cell, GridDims, GsError};

    #[test]
    fn rejects_non_positive_and_oversized() {
        assert!(matches!(GridDims::new(0, 5), Err(GsError::InvalidDimensions { .. })));
        assert!(matches!(GridDims::new(5, -1), Err(GsError::InvalidDimensions { .. })));
        assert!(matches!(GridDims::new(101, 5), Err(GsError::InvalidDimensions { .. })));
        assert!(GridDims::new(100, 1).is_ok());
    }

    #[test]
    fn clamp_into_bounds() {
        let dims = GridDims::new(7, 3).unwrap();
        assert_eq!(dims.clamp(Cell::new(-1, 1)), Cell::new(0, 1));
        assert_eq!(dims.clamp(Cell::new(9, 9)), Cell::new(6, 2));
        assert_eq!(dims.clamp(Cell::new(3, 1)), Cell::new(3, 1));
    }

    #[test]
    fn contains_and_index() {
        let dims = GridDims::new(4, 2).unwrap();
        assert!(dims.contains(Cell::new(3, 1)));
        assert!(!dims.contains(Cell::new(4, 1)));
        assert_eq!(dims.index_of(Cell::new(1, 1)), Some(5));
        assert_eq!(dims.index_of(Cell::new(-1, 0)), None);
        assert_eq!(dims.cells().count(), dims.cell_count());
    }

    #[test]
    fn default_is_25_square() {
        let dims = GridDims::default();
        assert_eq!((dims.width(), dims.height()), (25, 25));
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(10) + 5, Tick(15));
        assert_eq!(Tick(3).next(), Tick(4));
        assert_eq!(Tick(4).to_string(), "T4");
    }

    #[test]
    fn interval_zero_never_fires() {
        assert!(!Tick(0).is_multiple_of(0));
        assert!(Tick(6).is_multiple_of(3));
        assert!(!Tick(7).is_multiple_of(3));
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn same_seed_same_stream() {
        let mut a = AgentRng::new(42, AgentId(1));
        let mut b = AgentRng::new(42, AgentId(1));
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..u32::MAX)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..u32::MAX)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn agents_get_independent_streams() {
        let mut a = AgentRng::new(42, AgentId(1));
        let mut b = AgentRng::new(42, AgentId(2));
        assert_ne!(a.gen_range(0..u64::MAX), b.gen_range(0..u64::MAX));
    }

    #[test]
    fn fork_follows_the_parent_stream() {
        let mut a = AgentRng::new(5, AgentId(2));
        let mut b = AgentRng::new(5, AgentId(2));
        assert_eq!(a.fork().gen_range(0..1_000_000), b.fork().gen_range(0..1_000_000));
        // The parent moved on, so the next fork differs.
        let first = AgentRng::new(5, AgentId(2)).fork().gen_range(0..u64::MAX);
        assert_ne!(a.fork().gen_range(0..u64::MAX), first);
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(1);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[9]), Some(&9));
    }
}

#[cfg(test)]
mod kind {
    use crate::{BehaviorKind, Mobility, SearchStrategy};

    #[test]
    fn behavior_labels_round_trip_through_lenient_parse() {
        for kind in BehaviorKind::ALL {
            assert_eq!(BehaviorKind::parse_lenient(kind.as_str()), kind);
        }
    }

    #[test]
    fn unknown_labels_fall_back() {
        assert_eq!(BehaviorKind::parse_lenient("wizard"), BehaviorKind::Reactive);
        assert_eq!(BehaviorKind::parse_lenient("goal_based"), BehaviorKind::Collector);
        assert_eq!(SearchStrategy::parse_lenient("greedy"), SearchStrategy::Bfs);
        assert_eq!(SearchStrategy::parse_lenient("A*"), SearchStrategy::AStar);
        assert_eq!(Mobility::parse_lenient("DYNAMIC"), Mobility::Dynamic);
        assert_eq!(Mobility::parse_lenient("whatever"), Mobility::Static);
    }
}
