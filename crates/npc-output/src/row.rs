//! Plain data row types written by output backends.

use npc_agent::VehicleAgent;
use npc_core::{Tick, VehicleId};

/// One vehicle's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshotRow {
    pub tick:           u64,
    pub slot:           u32,
    pub generation:     u32,
    pub lane:           u32,
    pub waypoint_index: u32,
    pub x:              f32,
    pub y:              f32,
    pub z:              f32,
    /// Degrees in `[0, 360)`.
    pub yaw:            f32,
    pub speed:          f32,
    pub speed_mode:     &'static str,
    pub yield_phase:    &'static str,
}

impl VehicleSnapshotRow {
    pub fn new(tick: Tick, id: VehicleId, agent: &VehicleAgent) -> Self {
        let p = agent.control.position;
        Self {
            tick:           tick.0,
            slot:           id.slot,
            generation:     id.generation,
            lane:           agent.cognition.lane.0,
            waypoint_index: agent.cognition.waypoint_index as u32,
            x:              p.x,
            y:              p.y,
            z:              p.z,
            yaw:            agent.control.yaw,
            speed:          agent.control.speed,
            speed_mode:     agent.decision.speed_mode.as_str(),
            yield_phase:    agent.decision.yield_phase.as_str(),
        }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    /// Simulated seconds at the end of the tick.
    pub elapsed_secs:  f64,
    pub live:          u64,
    pub spawned:       u64,
    pub despawned:     u64,
    pub faults:        u64,
    pub spawn_blocked: bool,
}
