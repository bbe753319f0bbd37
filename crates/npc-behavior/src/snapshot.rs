//! Tick-start snapshot of every live vehicle.
//!
//! All cross-vehicle reads during the pipeline go through this snapshot, so
//! a vehicle's update never observes another vehicle's same-tick writes and
//! the result is independent of update order.

use glam::Vec3;
use rustc_hash::FxHashMap;

use npc_agent::VehicleStore;
use npc_core::{LaneId, VehicleId};

/// What other vehicles may know about one vehicle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnapshotEntry {
    pub id: VehicleId,
    pub lane: LaneId,
    pub position: Vec3,
    pub forward: Vec3,
    pub back_bumper: Vec3,
}

/// Read-only copy of every live vehicle's lane and pose, bucketed by lane.
#[derive(Default)]
pub struct TrafficSnapshot {
    entries: Vec<SnapshotEntry>,
    by_lane: FxHashMap<LaneId, Vec<u32>>,
}

impl TrafficSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current state of `store`.
    pub fn capture(store: &VehicleStore) -> Self {
        let mut snap = Self::new();
        snap.refresh(store);
        snap
    }

    /// Re-capture `store`, reusing allocations.
    pub fn refresh(&mut self, store: &VehicleStore) {
        self.entries.clear();
        for bucket in self.by_lane.values_mut() {
            bucket.clear();
        }
        for (id, agent) in store.iter() {
            let i = self.entries.len() as u32;
            self.entries.push(SnapshotEntry {
                id,
                lane: agent.cognition.lane,
                position: agent.control.position,
                forward: agent.forward(),
                back_bumper: agent.back_bumper(),
            });
            self.by_lane.entry(agent.cognition.lane).or_default().push(i);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    /// Vehicles whose current lane is `lane`.
    pub fn on_lane(&self, lane: LaneId) -> impl Iterator<Item = &SnapshotEntry> + '_ {
        self.by_lane
            .get(&lane)
            .into_iter()
            .flatten()
            .map(|&i| &self.entries[i as usize])
    }
}
