//! Unit tests for npc-behavior.

use glam::Vec3;

use npc_agent::{VehicleAgent, VehicleBounds, VehicleConfig};
use npc_core::{LaneId, ProfileId};
use npc_lane::{LaneGraph, LaneGraphBuilder, TurnDirection};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Lane 1 runs north along +z and forks into straight lane 2 and left-turn
/// lane 3.  Lane 4 points at a lane that does not exist.
fn fork_graph() -> LaneGraph {
    let mut b = LaneGraphBuilder::new();
    b.add_lane(
        LaneId(1),
        vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 50.0), Vec3::new(0.0, 0.0, 100.0)],
        10.0,
    );
    b.add_lane(LaneId(2), vec![Vec3::new(0.0, 0.0, 100.0), Vec3::new(0.0, 0.0, 150.0)], 10.0);
    b.add_lane(LaneId(3), vec![Vec3::new(0.0, 0.0, 100.0), Vec3::new(-50.0, 0.0, 150.0)], 6.0)
        .turn_direction = TurnDirection::Left;
    b.add_lane(LaneId(4), vec![Vec3::new(100.0, 0.0, 0.0), Vec3::new(100.0, 0.0, 10.0)], 10.0);
    b.connect(LaneId(1), LaneId(2));
    b.connect(LaneId(1), LaneId(3));
    b.connect(LaneId(4), LaneId(99));
    b.build().unwrap()
}

/// 4 m long vehicle at `position` facing `yaw`.
fn vehicle(lane: u32, position: Vec3, yaw: f32, target: Vec3) -> VehicleAgent {
    VehicleAgent::new(
        ProfileId(0),
        VehicleConfig::default(),
        VehicleBounds::from_length(4.0, 2.0),
        LaneId(lane),
        position,
        yaw,
        target,
    )
}

// ── Cognition ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cognition {
    use glam::Vec3;

    use npc_agent::VehicleBounds;
    use npc_core::{AgentRng, LaneId, LaneSelection, Tick, VehicleId};
    use npc_lane::LaneGraphBuilder;

    use super::{fork_graph, vehicle};
    use crate::cognition::cognition;
    use crate::{BehaviorError, TickContext, TrafficSnapshot};

    fn rng() -> AgentRng {
        AgentRng::new(1, VehicleId::new(0, 0))
    }

    #[test]
    fn unreached_target_is_idempotent() {
        let graph = fork_graph();
        let snap = TrafficSnapshot::new();
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap);
        let mut a = vehicle(1, Vec3::ZERO, 0.0, Vec3::new(0.0, 0.0, 50.0));
        a.cognition.waypoint_index = 1;
        let before = a.clone();
        let mut r = rng();
        cognition(&mut a, &mut r, &ctx).unwrap();
        cognition(&mut a, &mut r, &ctx).unwrap();
        assert_eq!(a.cognition, before.cognition);
        assert_eq!(a.decision.target, before.decision.target);
        assert!(!a.should_despawn);
    }

    #[test]
    fn waypoints_advance_then_reset_on_lane_change() {
        let graph = fork_graph();
        let snap = TrafficSnapshot::new();
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap)
            .with_lane_selection(LaneSelection::First);
        let mut a = vehicle(1, Vec3::ZERO, 0.0, Vec3::ZERO);
        let mut r = rng();

        cognition(&mut a, &mut r, &ctx).unwrap();
        assert_eq!(a.cognition.waypoint_index, 1);
        assert_eq!(a.decision.target, Vec3::new(0.0, 0.0, 50.0));

        a.control.position = Vec3::new(0.0, 0.0, 49.0);
        cognition(&mut a, &mut r, &ctx).unwrap();
        assert_eq!(a.cognition.waypoint_index, 2);
        assert_eq!(a.decision.target, Vec3::new(0.0, 0.0, 100.0));

        a.control.position = Vec3::new(0.0, 0.0, 99.5);
        cognition(&mut a, &mut r, &ctx).unwrap();
        assert_eq!(a.cognition.lane, LaneId(2));
        assert_eq!(a.cognition.waypoint_index, 1);
        assert_eq!(a.decision.target, Vec3::new(0.0, 0.0, 150.0));
        assert!(!a.cognition.is_turning);
        assert!(!a.should_despawn);
    }

    #[test]
    fn turning_successor_sets_is_turning() {
        let graph = fork_graph();
        let snap = TrafficSnapshot::new();
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap);
        let mut seen_left = false;
        let mut seen_straight = false;
        for slot in 0..64 {
            let mut a = vehicle(1, Vec3::new(0.0, 0.0, 100.0), 0.0, Vec3::new(0.0, 0.0, 100.0));
            a.cognition.waypoint_index = 2;
            let mut r = AgentRng::new(9, VehicleId::new(slot, 0));
            cognition(&mut a, &mut r, &ctx).unwrap();
            match a.cognition.lane {
                LaneId(2) => {
                    seen_straight = true;
                    assert!(!a.cognition.is_turning);
                }
                LaneId(3) => {
                    seen_left = true;
                    assert!(a.cognition.is_turning);
                }
                other => panic!("unexpected lane {other}"),
            }
        }
        assert!(seen_left && seen_straight, "random selection should reach both successors");
    }

    #[test]
    fn dead_end_flags_despawn() {
        // Single two-point lane, vehicle on its final waypoint.
        let mut b = LaneGraphBuilder::new();
        b.add_lane(LaneId(5), vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)], 10.0);
        let graph = b.build().unwrap();
        let snap = TrafficSnapshot::new();
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap);

        let mut a = vehicle(5, Vec3::new(0.0, 0.0, 9.7), 0.0, Vec3::new(0.0, 0.0, 10.0));
        a.bounds = VehicleBounds {
            front: Vec3::new(0.0, 0.0, 0.4),
            back:  Vec3::new(0.0, 0.0, -0.4),
            width: 1.0,
        };
        a.cognition.waypoint_index = 1;
        cognition(&mut a, &mut rng(), &ctx).unwrap();
        assert!(a.should_despawn);
        assert_eq!(a.cognition.lane, LaneId(5));
    }

    #[test]
    fn missing_successor_counts_as_dead_end() {
        let graph = fork_graph();
        let snap = TrafficSnapshot::new();
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap);
        let mut a = vehicle(4, Vec3::new(100.0, 0.0, 10.0), 0.0, Vec3::new(100.0, 0.0, 10.0));
        a.cognition.waypoint_index = 1;
        cognition(&mut a, &mut rng(), &ctx).unwrap();
        assert!(a.should_despawn);
    }

    #[test]
    fn missing_current_lane_is_error() {
        let graph = fork_graph();
        let snap = TrafficSnapshot::new();
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap);
        let mut a = vehicle(42, Vec3::ZERO, 0.0, Vec3::ZERO);
        let err = cognition(&mut a, &mut rng(), &ctx).unwrap_err();
        assert!(matches!(err, BehaviorError::Lane(npc_lane::LaneError::LaneNotFound(LaneId(42)))));
    }
}

// ── Decision ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod decision {
    use glam::Vec3;

    use npc_agent::{SpeedMode, VehicleAgent, VehicleConfig, VehicleStore, YieldPhase};
    use npc_core::{Tick, UNBOUNDED, VehicleId};
    use npc_lane::LaneGraph;

    use super::{fork_graph, vehicle};
    use crate::decision::{decision, front_vehicle_distance, yield_distance};
    use crate::{
        StoppingDistances, TickContext, TrafficSignal, TrafficSnapshot, YieldPhaseSource,
        stopping_distance,
    };

    #[test]
    fn stopping_distance_formula() {
        assert_eq!(stopping_distance(10.0, 2.0), 25.0);
        assert_eq!(stopping_distance(0.0, 2.0), 0.0);
        assert_eq!(stopping_distance(10.0, 0.0), UNBOUNDED);
        assert_eq!(stopping_distance(10.0, -1.0), UNBOUNDED);
        assert_eq!(stopping_distance(10.0, f32::NAN), UNBOUNDED);
        assert_eq!(stopping_distance(f32::MAX, 1e-30), UNBOUNDED);
    }

    #[test]
    fn thresholds_are_ordered() {
        let cfg = VehicleConfig::default();
        for speed in [0.0, 1.0, 5.0, 13.9, 30.0] {
            let d = StoppingDistances::new(speed, &cfg);
            assert!(d.absolute <= d.sudden, "speed {speed}");
            assert!(d.sudden <= d.normal, "speed {speed}");
            assert!(d.normal <= d.slow, "speed {speed}");
        }
        let d = StoppingDistances::new(0.0, &cfg);
        assert_eq!((d.absolute, d.sudden, d.normal, d.slow), (1.0, 2.0, 3.0, 7.0));
    }

    #[test]
    fn unbounded_thresholds_stay_unbounded() {
        let cfg = VehicleConfig { deceleration: 0.0, ..VehicleConfig::default() };
        let d = StoppingDistances::new(5.0, &cfg);
        assert_eq!(d.normal, UNBOUNDED);
        assert_eq!(d.slow, UNBOUNDED);
        assert!(d.slow.is_finite());
    }

    #[test]
    fn mode_bands() {
        let d = StoppingDistances::new(0.0, &VehicleConfig::default());
        assert_eq!(d.select(0.5, false), SpeedMode::AbsoluteStop);
        assert_eq!(d.select(1.5, false), SpeedMode::SuddenStop);
        assert_eq!(d.select(2.5, false), SpeedMode::Stop);
        assert_eq!(d.select(5.0, false), SpeedMode::Slow);
        assert_eq!(d.select(50.0, false), SpeedMode::Normal);
        assert_eq!(d.select(UNBOUNDED, true), SpeedMode::Slow);
        assert_eq!(d.select(0.5, true), SpeedMode::AbsoluteStop);
    }

    /// Store holding `me` at the origin facing +z and `other`.
    fn pair(other: VehicleAgent) -> (VehicleStore, VehicleId, VehicleId) {
        let mut store = VehicleStore::new();
        let me = store.spawn(vehicle(1, Vec3::ZERO, 0.0, Vec3::new(0.0, 0.0, 50.0)));
        let them = store.spawn(other);
        (store, me, them)
    }

    fn front_of(store: &VehicleStore, graph: &LaneGraph, me: VehicleId) -> f32 {
        let snap = TrafficSnapshot::capture(store);
        let ctx = TickContext::new(Tick(0), 0.1, graph, &snap);
        front_vehicle_distance(me, store.get(me).unwrap(), &ctx).unwrap()
    }

    #[test]
    fn close_front_vehicle_is_absolute_stop() {
        // Front bumper at z=2, other's back bumper at z=5: clearance 3.
        let graph = fork_graph();
        let (store, me, _) = pair(vehicle(1, Vec3::new(0.0, 0.0, 7.0), 0.0, Vec3::new(0.0, 0.0, 50.0)));
        assert!((front_of(&store, &graph, me) - -1.0).abs() < 1e-4);

        let snap = TrafficSnapshot::capture(&store);
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap);
        let mut a = store.get(me).unwrap().clone();
        decision(me, &mut a, &ctx).unwrap();
        assert!((a.decision.front_vehicle_distance - -1.0).abs() < 1e-4);
        assert_ne!(a.decision.front_vehicle_distance, UNBOUNDED);
        assert!(a.decision.is_stopped_by_front_vehicle);
        assert_eq!(a.decision.speed_mode, SpeedMode::AbsoluteStop);
    }

    #[test]
    fn overlapping_vehicle_is_unbounded() {
        // Other's back bumper at z=1.5 lies behind our front bumper.
        let graph = fork_graph();
        let (store, me, _) = pair(vehicle(1, Vec3::new(0.0, 0.0, 3.5), 0.0, Vec3::new(0.0, 0.0, 50.0)));
        assert_eq!(front_of(&store, &graph, me), UNBOUNDED);
    }

    #[test]
    fn overlapping_nearest_vehicle_masks_farther_ones() {
        let graph = fork_graph();
        let mut store = VehicleStore::new();
        let me = store.spawn(vehicle(1, Vec3::ZERO, 0.0, Vec3::new(0.0, 0.0, 50.0)));
        store.spawn(vehicle(1, Vec3::new(0.0, 0.0, 1.0), 0.0, Vec3::new(0.0, 0.0, 50.0)));
        store.spawn(vehicle(1, Vec3::new(0.0, 0.0, 20.0), 0.0, Vec3::new(0.0, 0.0, 50.0)));
        assert_eq!(front_of(&store, &graph, me), UNBOUNDED);
    }

    #[test]
    fn vehicle_behind_is_ignored() {
        let graph = fork_graph();
        let (store, me, _) = pair(vehicle(1, Vec3::new(0.0, 0.0, -10.0), 0.0, Vec3::ZERO));
        assert_eq!(front_of(&store, &graph, me), UNBOUNDED);
    }

    #[test]
    fn successor_lane_vehicle_counts() {
        let graph = fork_graph();
        let (store, me, _) = pair(vehicle(2, Vec3::new(0.0, 0.0, 20.0), 0.0, Vec3::new(0.0, 0.0, 150.0)));
        // Back bumper at z=18, front bumper at z=2.
        assert!((front_of(&store, &graph, me) - 12.0).abs() < 1e-4);
    }

    #[test]
    fn unrelated_lane_vehicle_is_ignored() {
        let graph = fork_graph();
        let (store, me, _) = pair(vehicle(4, Vec3::new(0.0, 0.0, 7.0), 0.0, Vec3::new(0.0, 0.0, 50.0)));
        assert_eq!(front_of(&store, &graph, me), UNBOUNDED);
    }

    #[test]
    fn nearest_of_several_wins() {
        let graph = fork_graph();
        let mut store = VehicleStore::new();
        let me = store.spawn(vehicle(1, Vec3::ZERO, 0.0, Vec3::new(0.0, 0.0, 50.0)));
        store.spawn(vehicle(1, Vec3::new(0.0, 0.0, 40.0), 0.0, Vec3::new(0.0, 0.0, 50.0)));
        store.spawn(vehicle(1, Vec3::new(0.0, 0.0, 20.0), 0.0, Vec3::new(0.0, 0.0, 50.0)));
        // Nearest back bumper at z=18.
        assert!((front_of(&store, &graph, me) - 12.0).abs() < 1e-4);
    }

    #[test]
    fn yield_distance_only_when_blocking() {
        let mut a = vehicle(1, Vec3::ZERO, 0.0, Vec3::new(0.0, 0.0, 50.0));
        a.decision.yield_point = Vec3::new(0.0, 0.0, 12.0);
        assert_eq!(yield_distance(&a), UNBOUNDED);
        a.decision.yield_phase = YieldPhase::AtIntersection;
        assert_eq!(yield_distance(&a), UNBOUNDED);
        a.decision.yield_phase = YieldPhase::IntersectionBlocked;
        assert!((yield_distance(&a) - 10.0).abs() < 1e-4);
        a.decision.yield_point = Vec3::new(0.0, 0.0, 1.0);
        assert!((yield_distance(&a) - -1.0).abs() < 1e-4, "passed yield point is negative");
    }

    struct HoldAt(f32);

    impl YieldPhaseSource for HoldAt {
        fn update(
            &self,
            _vehicle: VehicleId,
            _agent:   &VehicleAgent,
            _graph:   &LaneGraph,
        ) -> Option<(YieldPhase, Vec3)> {
            Some((YieldPhase::ForcingPriority, Vec3::new(0.0, 0.0, self.0)))
        }
    }

    #[test]
    fn yield_source_drives_mode() {
        let graph = fork_graph();
        let snap = TrafficSnapshot::new();
        let source = HoldAt(4.5);
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap).with_yielding(&source);
        let mut a = vehicle(1, Vec3::ZERO, 0.0, Vec3::new(0.0, 0.0, 50.0));
        decision(VehicleId::new(0, 0), &mut a, &ctx).unwrap();
        assert_eq!(a.decision.yield_phase, YieldPhase::ForcingPriority);
        // Yield point 2.5 ahead of the front bumper: inside the STOP band.
        assert_eq!(a.decision.speed_mode, SpeedMode::Stop);
        assert_eq!(a.decision.front_vehicle_distance, UNBOUNDED);
        assert!(!a.decision.is_stopped_by_front_vehicle);
    }

    struct RedAhead(f32);

    impl TrafficSignal for RedAhead {
        fn stop_distance(&self, _vehicle: VehicleId, _agent: &VehicleAgent, _graph: &LaneGraph) -> f32 {
            self.0
        }
    }

    #[test]
    fn signal_participates_in_binding_distance() {
        let graph = fork_graph();
        let snap = TrafficSnapshot::new();
        let red = RedAhead(1.5);
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap).with_signal(&red);
        let mut a = vehicle(1, Vec3::ZERO, 0.0, Vec3::new(0.0, 0.0, 50.0));
        decision(VehicleId::new(0, 0), &mut a, &ctx).unwrap();
        assert_eq!(a.decision.speed_mode, SpeedMode::SuddenStop);
    }

    #[test]
    fn open_road_is_normal_unless_turning() {
        let graph = fork_graph();
        let snap = TrafficSnapshot::new();
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap);
        let mut a = vehicle(1, Vec3::ZERO, 0.0, Vec3::new(0.0, 0.0, 50.0));
        decision(VehicleId::new(0, 0), &mut a, &ctx).unwrap();
        assert_eq!(a.decision.speed_mode, SpeedMode::Normal);

        a.cognition.is_turning = true;
        decision(VehicleId::new(0, 0), &mut a, &ctx).unwrap();
        assert_eq!(a.decision.speed_mode, SpeedMode::Slow);
    }
}

// ── Control ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod control {
    use glam::Vec3;

    use npc_agent::{SpeedMode, VehicleConfig};
    use npc_core::Tick;

    use super::{fork_graph, vehicle};
    use crate::control::{control, move_towards, speed_target};
    use crate::{TickContext, TrafficSnapshot};

    #[test]
    fn move_towards_clamps() {
        assert_eq!(move_towards(0.0, 10.0, 3.0), 3.0);
        assert_eq!(move_towards(9.0, 10.0, 3.0), 10.0);
        assert_eq!(move_towards(10.0, 0.0, 4.0), 6.0);
        assert_eq!(move_towards(1.0, 0.0, 4.0), 0.0);
    }

    #[test]
    fn targets_per_mode() {
        let cfg = VehicleConfig::default();
        assert_eq!(speed_target(SpeedMode::Normal, &cfg, 12.0), (12.0, cfg.acceleration));
        assert_eq!(speed_target(SpeedMode::Slow, &cfg, 12.0), (cfg.slow_speed, cfg.deceleration));
        assert_eq!(speed_target(SpeedMode::Slow, &cfg, 2.0), (2.0, cfg.deceleration));
        assert_eq!(speed_target(SpeedMode::Stop, &cfg, 12.0), (0.0, cfg.deceleration));
        assert_eq!(speed_target(SpeedMode::SuddenStop, &cfg, 12.0).1, cfg.sudden_deceleration);
        assert_eq!(speed_target(SpeedMode::AbsoluteStop, &cfg, 12.0).1, cfg.absolute_deceleration);
    }

    #[test]
    fn speed_ramps_to_limit_without_overshoot() {
        let graph = fork_graph();
        let snap = TrafficSnapshot::new();
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap);
        let mut a = vehicle(1, Vec3::ZERO, 0.0, Vec3::new(0.0, 0.0, 1000.0));
        let mut last = 0.0;
        for _ in 0..100 {
            control(&mut a, &ctx).unwrap();
            assert!(a.control.speed >= last);
            assert!(a.control.speed <= 10.0);
            last = a.control.speed;
        }
        assert_eq!(a.control.speed, 10.0);
        assert!(a.control.position.z > 0.0);
    }

    #[test]
    fn stop_ramps_down_to_zero() {
        let graph = fork_graph();
        let snap = TrafficSnapshot::new();
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap);
        let mut a = vehicle(1, Vec3::ZERO, 0.0, Vec3::new(0.0, 0.0, 1000.0));
        a.control.speed = 10.0;
        a.decision.speed_mode = SpeedMode::Stop;
        for _ in 0..100 {
            control(&mut a, &ctx).unwrap();
            assert!(a.control.speed >= 0.0);
        }
        assert_eq!(a.control.speed, 0.0);
    }

    #[test]
    fn steers_toward_target() {
        let graph = fork_graph();
        let snap = TrafficSnapshot::new();
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap);
        // Facing +z, target ahead and to the +x side: yaw must increase.
        let mut a = vehicle(1, Vec3::ZERO, 0.0, Vec3::new(10.0, 0.0, 10.0));
        a.control.speed = 5.0;
        control(&mut a, &ctx).unwrap();
        assert!(a.control.yaw_rate > 0.0);
        assert!(a.control.yaw > 0.0 && a.control.yaw < 90.0);
    }

    #[test]
    fn height_follows_target() {
        let graph = fork_graph();
        let snap = TrafficSnapshot::new();
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap);
        let mut a = vehicle(1, Vec3::ZERO, 0.0, Vec3::new(0.0, 3.0, 50.0));
        control(&mut a, &ctx).unwrap();
        assert_eq!(a.control.position.y, 3.0);
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pipeline {
    use glam::Vec3;

    use npc_agent::Pose;
    use npc_core::{AgentRng, Tick, VehicleId};

    use super::{fork_graph, vehicle};
    use crate::{TickContext, TrafficSnapshot, run_pipeline};

    #[test]
    fn despawning_vehicle_is_frozen() {
        let graph = fork_graph();
        let snap = TrafficSnapshot::new();
        let ctx = TickContext::new(Tick(0), 0.1, &graph, &snap);
        let mut a = vehicle(1, Vec3::ZERO, 0.0, Vec3::ZERO);
        a.control.speed = 5.0;
        a.should_despawn = true;
        let before = a.clone();
        let mut pose = Pose::default();
        let id = VehicleId::new(0, 0);
        let mut rng = AgentRng::new(0, id);
        for _ in 0..3 {
            run_pipeline(id, &mut a, &mut pose, &mut rng, &ctx).unwrap();
        }
        assert!(a.should_despawn);
        assert_eq!(a.control, before.control);
        assert_eq!(a.cognition, before.cognition);
        assert_eq!(pose, Pose::default());
    }

    #[test]
    fn pose_published_after_control() {
        let graph = fork_graph();
        let snap = TrafficSnapshot::new();
        let ctx = TickContext::new(Tick(0), 0.5, &graph, &snap);
        let mut a = vehicle(1, Vec3::ZERO, 0.0, Vec3::new(0.0, 0.0, 50.0));
        a.control.speed = 4.0;
        let mut pose = Pose::default();
        let id = VehicleId::new(0, 0);
        run_pipeline(id, &mut a, &mut pose, &mut AgentRng::new(0, id), &ctx).unwrap();
        assert_eq!(pose.position, a.control.position);
        assert!(pose.position.z > 0.0);
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot {
    use glam::Vec3;

    use npc_agent::VehicleStore;
    use npc_core::LaneId;

    use super::vehicle;
    use crate::TrafficSnapshot;

    #[test]
    fn buckets_by_lane() {
        let mut store = VehicleStore::new();
        store.spawn(vehicle(1, Vec3::ZERO, 0.0, Vec3::Z));
        store.spawn(vehicle(2, Vec3::X, 0.0, Vec3::Z));
        store.spawn(vehicle(1, Vec3::Z, 0.0, Vec3::Z));
        let mut snap = TrafficSnapshot::capture(&store);
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.on_lane(LaneId(1)).count(), 2);
        assert_eq!(snap.on_lane(LaneId(2)).count(), 1);
        assert_eq!(snap.on_lane(LaneId(9)).count(), 0);

        let first = store.ids().next().unwrap();
        store.despawn(first).unwrap();
        snap.refresh(&store);
        assert_eq!(snap.on_lane(LaneId(1)).count(), 1);
        let back = snap.on_lane(LaneId(1)).next().unwrap().back_bumper;
        assert!((back - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    }
}
