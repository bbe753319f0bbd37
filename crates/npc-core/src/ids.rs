//! Strongly typed identifier wrappers.
//!
//! `LaneId` and `ProfileId` are plain integer newtypes; the integer comes
//! from the scenario and is stable across the run.  `VehicleId` is a
//! generational handle into the vehicle arena: the slot index is reused after
//! a despawn, the generation is not, so stale handles never alias a newer
//! vehicle.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identifier of a lane in the lane graph.  Assigned by the scenario.
    pub struct LaneId(u32);
}

typed_id! {
    /// Index of a vehicle profile (prefab bounds + dynamics) in the spawner's
    /// profile list.
    pub struct ProfileId(u16);
}

// ── VehicleId ─────────────────────────────────────────────────────────────────

/// Generational handle to a live vehicle in the arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId {
    pub slot:       u32,
    pub generation: u32,
}

impl VehicleId {
    #[inline]
    pub fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Slot index into the arena's parallel arrays.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.slot as usize
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VehicleId({}v{})", self.slot, self.generation)
    }
}
