//! Right-of-way collaborator.

use glam::Vec3;

use npc_agent::{VehicleAgent, YieldPhase};
use npc_core::VehicleId;
use npc_lane::LaneGraph;

/// Producer of yield-phase transitions.
///
/// The pipeline consumes the phase and yield point; deciding when a vehicle
/// enters or leaves a phase is up to the implementation.
pub trait YieldPhaseSource: Send + Sync {
    /// New `(phase, yield point)` for this tick, or `None` to keep the
    /// vehicle's current values.
    fn update(
        &self,
        vehicle: VehicleId,
        agent:   &VehicleAgent,
        graph:   &LaneGraph,
    ) -> Option<(YieldPhase, Vec3)>;
}

/// A [`YieldPhaseSource`] that never changes anything.  Vehicles spawned
/// with `YieldPhase::None` keep it for their whole life.
pub struct NoYielding;

impl YieldPhaseSource for NoYielding {
    fn update(
        &self,
        _vehicle: VehicleId,
        _agent:   &VehicleAgent,
        _graph:   &LaneGraph,
    ) -> Option<(YieldPhase, Vec3)> {
        None
    }
}
