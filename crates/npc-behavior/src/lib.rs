//! `npc-behavior` — the per-vehicle behavior pipeline.
//!
//! Each tick every live vehicle runs four steps, each seeing the previous
//! step's output:
//!
//! 1. [`cognition`]: advance the waypoint cursor, change lanes, flag despawn.
//! 2. [`decision`]: reduce obstructions to a binding distance and pick a
//!    `SpeedMode`.
//! 3. [`control`]: ramp speed, smooth yaw rate, integrate the pose.
//! 4. [`pipeline::apply_pose`]: publish position and rotation.
//!
//! Cross-vehicle reads go through the tick-start [`TrafficSnapshot`] carried
//! in the [`TickContext`], so vehicles can be updated in any order or in
//! parallel with identical results.
//!
//! Traffic lights and yield-phase transitions are collaborators behind the
//! [`TrafficSignal`] and [`YieldPhaseSource`] traits; [`NoTrafficLight`] and
//! [`NoYielding`] are the defaults.

pub mod cognition;
pub mod context;
pub mod control;
pub mod decision;
pub mod error;
pub mod pipeline;
pub mod signal;
pub mod snapshot;
pub mod yielding;

#[cfg(test)]
mod tests;

pub use context::TickContext;
pub use decision::{FRONT_VEHICLE_GAP, StoppingDistances, stopping_distance};
pub use error::{BehaviorError, BehaviorResult};
pub use pipeline::{apply_pose, run_pipeline};
pub use signal::{NoTrafficLight, TrafficSignal};
pub use snapshot::{SnapshotEntry, TrafficSnapshot};
pub use yielding::{NoYielding, YieldPhaseSource};
