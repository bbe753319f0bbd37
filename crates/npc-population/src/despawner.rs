//! Despawner: removes vehicles the pipeline flagged.

use tracing::debug;

use npc_agent::{VehicleAgent, VehicleStore};
use npc_core::VehicleId;

use crate::PopulationResult;

/// Destroy every vehicle with `should_despawn` set and return them with their
/// final state, in slot order.
pub fn despawn_flagged(store: &mut VehicleStore) -> PopulationResult<Vec<(VehicleId, VehicleAgent)>> {
    let flagged: Vec<VehicleId> = store
        .iter()
        .filter(|(_, a)| a.should_despawn)
        .map(|(id, _)| id)
        .collect();

    let mut removed = Vec::with_capacity(flagged.len());
    for id in flagged {
        let agent = store.despawn(id)?;
        debug!(vehicle = %id, lane = %agent.cognition.lane, "despawned");
        removed.push((id, agent));
    }
    Ok(removed)
}
