//! Traffic-signal collaborator.

use npc_agent::VehicleAgent;
use npc_core::{UNBOUNDED, VehicleId};
use npc_lane::LaneGraph;

/// Source of the stopping constraint imposed by traffic lights.
///
/// Called once per vehicle per tick during decision, possibly from several
/// threads at once.
pub trait TrafficSignal: Send + Sync {
    /// Distance from the vehicle's front bumper to the point where it must
    /// stop for a signal, or [`UNBOUNDED`] if no signal constrains it.
    fn stop_distance(&self, vehicle: VehicleId, agent: &VehicleAgent, graph: &LaneGraph) -> f32;
}

/// A [`TrafficSignal`] for a world without traffic lights.
pub struct NoTrafficLight;

impl TrafficSignal for NoTrafficLight {
    fn stop_distance(&self, _vehicle: VehicleId, _agent: &VehicleAgent, _graph: &LaneGraph) -> f32 {
        UNBOUNDED
    }
}
