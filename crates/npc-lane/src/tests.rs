//! Unit tests for the lane graph.

#[cfg(test)]
mod graph {
    use npc_core::{LaneId, Vec3};

    use crate::{LaneError, LaneGraph, LaneGraphBuilder, TurnDirection};

    fn two_lane_graph() -> LaneGraph {
        let mut b = LaneGraphBuilder::new();
        b.add_lane(LaneId(1), vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)], 10.0);
        b.add_lane(LaneId(2), vec![Vec3::new(0.0, 0.0, 10.0), Vec3::new(10.0, 0.0, 20.0)], 5.0)
            .turn_direction = TurnDirection::Right;
        b.connect(LaneId(1), LaneId(2));
        b.build().unwrap()
    }

    #[test]
    fn lookups() {
        let g = two_lane_graph();
        assert_eq!(g.lane_count(), 2);
        assert!(g.contains(LaneId(2)));
        assert_eq!(g.successors(LaneId(1)).unwrap(), &[LaneId(2)]);
        assert!(g.successors(LaneId(2)).unwrap().is_empty());
        assert_eq!(g.waypoints(LaneId(2)).unwrap()[1], Vec3::new(10.0, 0.0, 20.0));
        assert_eq!(g.lane(LaneId(2)).unwrap().speed_limit, 5.0);
        assert!(g.lane(LaneId(2)).unwrap().turn_direction.is_turn());
    }

    #[test]
    fn unknown_lane_is_error() {
        let g = two_lane_graph();
        assert!(matches!(g.lane(LaneId(9)), Err(LaneError::LaneNotFound(LaneId(9)))));
        assert!(g.successors(LaneId(9)).is_err());
        assert!(g.waypoints(LaneId(9)).is_err());
        assert!(g.get(LaneId(9)).is_none());
    }

    #[test]
    fn sparse_ids_index_correctly() {
        let mut b = LaneGraphBuilder::new();
        b.add_lane(LaneId(1000), vec![Vec3::ZERO, Vec3::X], 1.0);
        b.add_lane(LaneId(3), vec![Vec3::X, Vec3::Z], 2.0);
        let g = b.build().unwrap();
        assert_eq!(g.lane(LaneId(1000)).unwrap().speed_limit, 1.0);
        assert_eq!(g.lane(LaneId(3)).unwrap().speed_limit, 2.0);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut b = LaneGraphBuilder::new();
        b.add_lane(LaneId(1), vec![Vec3::ZERO, Vec3::X], 1.0);
        b.add_lane(LaneId(1), vec![Vec3::ZERO, Vec3::Z], 1.0);
        assert!(matches!(b.build(), Err(LaneError::DuplicateLane(LaneId(1)))));
    }

    #[test]
    fn rejects_single_waypoint() {
        let mut b = LaneGraphBuilder::new();
        b.add_lane(LaneId(4), vec![Vec3::ZERO], 1.0);
        assert!(matches!(
            b.build(),
            Err(LaneError::TooFewWaypoints { id: LaneId(4), count: 1 })
        ));
    }

    #[test]
    fn rejects_bad_speed_limit() {
        let mut b = LaneGraphBuilder::new();
        b.add_lane(LaneId(1), vec![Vec3::ZERO, Vec3::X], -1.0);
        assert!(matches!(b.build(), Err(LaneError::InvalidSpeedLimit { .. })));

        let mut b = LaneGraphBuilder::new();
        b.add_lane(LaneId(1), vec![Vec3::ZERO, Vec3::X], f32::NAN);
        assert!(matches!(b.build(), Err(LaneError::InvalidSpeedLimit { .. })));
    }

    #[test]
    fn zero_speed_limit_is_allowed() {
        let mut b = LaneGraphBuilder::new();
        b.add_lane(LaneId(1), vec![Vec3::ZERO, Vec3::X], 0.0);
        assert!(b.build().is_ok());
    }

    #[test]
    fn dangling_successor_is_kept_and_reported() {
        let mut b = LaneGraphBuilder::new();
        b.add_lane(LaneId(1), vec![Vec3::ZERO, Vec3::X], 1.0);
        b.connect(LaneId(1), LaneId(77));
        let g = b.build().unwrap();
        assert_eq!(g.successors(LaneId(1)).unwrap(), &[LaneId(77)]);
        assert_eq!(g.dangling_successors(), vec![(LaneId(1), LaneId(77))]);
    }

    #[test]
    fn connect_from_unknown_lane_is_dropped() {
        let mut b = LaneGraphBuilder::new();
        b.add_lane(LaneId(1), vec![Vec3::ZERO, Vec3::X], 1.0);
        b.connect(LaneId(5), LaneId(1));
        let g = b.build().unwrap();
        assert!(g.lanes().all(|l| l.successors.is_empty()));
    }

    #[test]
    fn empty_graph() {
        let g = LaneGraph::empty();
        assert!(g.is_empty());
        assert!(g.lane(LaneId(0)).is_err());
    }
}

#[cfg(test)]
mod lane {
    use npc_core::{LaneId, Vec3};

    use crate::{Lane, TurnDirection};

    #[test]
    fn endpoints() {
        let lane = Lane {
            id: LaneId(1),
            waypoints: vec![Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)],
            speed_limit: 3.0,
            turn_direction: TurnDirection::Unknown,
            intersection: false,
            successors: vec![],
            stop_line: None,
        };
        assert_eq!(lane.start(), Vec3::ZERO);
        assert_eq!(lane.last_index(), 2);
    }

    #[test]
    fn only_left_and_right_are_turns() {
        assert!(TurnDirection::Left.is_turn());
        assert!(TurnDirection::Right.is_turn());
        assert!(!TurnDirection::Straight.is_turn());
        assert!(!TurnDirection::Unknown.is_turn());
    }
}

#[cfg(test)]
mod naming {
    use npc_core::LaneId;

    use crate::parse_lane_id;

    #[test]
    fn parses_suffix() {
        assert_eq!(parse_lane_id("TrafficLane.123"), Some(LaneId(123)));
        assert_eq!(parse_lane_id("TrafficLane.0"), Some(LaneId(0)));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(parse_lane_id("TrafficLane"), None);
        assert_eq!(parse_lane_id("TrafficLane.abc"), None);
        assert_eq!(parse_lane_id("TrafficLane.-4"), None);
        assert_eq!(parse_lane_id(""), None);
    }

    #[test]
    fn ignores_trailing_parts() {
        assert_eq!(parse_lane_id("TrafficLane.12.001"), Some(LaneId(12)));
    }
}
