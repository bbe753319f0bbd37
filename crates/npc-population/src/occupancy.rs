//! Spawn-clearance oracle.
//!
//! The spawner asks whether a spawn point is free before placing a vehicle.
//! The default implementation is a distance proxy over vehicle centres,
//! indexed with an R-tree in the ground plane.

use glam::Vec3;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use npc_agent::VehicleStore;

/// Answers "is there room for a vehicle here?".
pub trait OccupancyOracle {
    /// `true` if no occupant lies within `radius` planar units of `center`.
    fn is_clear(&self, center: Vec3, radius: f32) -> bool;

    /// Record a new occupant at `center`.  Called by the spawner right after
    /// placing a vehicle so later spawns in the same tick see it.
    fn occupy(&mut self, center: Vec3);
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// `[x, z]` position of one vehicle centre.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Occupant {
    point: [f32; 2],
}

impl RTreeObject for Occupant {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for Occupant {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dz = self.point[1] - point[1];
        dx * dx + dz * dz
    }
}

#[inline]
fn planar(v: Vec3) -> [f32; 2] {
    [v.x, v.z]
}

// ── RTreeOccupancy ────────────────────────────────────────────────────────────

/// [`OccupancyOracle`] over the centres of every live vehicle.
#[derive(Default)]
pub struct RTreeOccupancy {
    tree: RTree<Occupant>,
}

impl RTreeOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the published positions of every vehicle in `store`.
    pub fn from_store(store: &VehicleStore) -> Self {
        let entries = store
            .iter()
            .map(|(_, a)| Occupant { point: planar(a.control.position) })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl OccupancyOracle for RTreeOccupancy {
    fn is_clear(&self, center: Vec3, radius: f32) -> bool {
        self.tree
            .locate_within_distance(planar(center), radius * radius)
            .next()
            .is_none()
    }

    fn occupy(&mut self, center: Vec3) {
        self.tree.insert(Occupant { point: planar(center) });
    }
}
