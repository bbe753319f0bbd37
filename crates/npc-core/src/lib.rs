//! `npc-core` — foundational types for the NPC traffic workspace.
//!
//! This crate is a dependency of every other `npc-*` crate.  It has no
//! `npc-*` dependencies and only a small external set (`glam`, `rand`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`ids`]       | `LaneId`, `ProfileId`, generational `VehicleId`           |
//! | [`geom`]      | planar distance, yaw/forward conversion, signed angles    |
//! | [`time`]      | `Tick`, `SimClock`, `SimConfig`                           |
//! | [`rng`]       | `AgentRng` (per-vehicle), `SimRng` (global), `LaneSelection` |
//! | [`error`]     | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and config types.    |

pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geom::UNBOUNDED;
pub use glam::{Quat, Vec3};
pub use ids::{LaneId, ProfileId, VehicleId};
pub use rng::{AgentRng, LaneSelection, SimRng};
pub use time::{SimClock, SimConfig, Tick};
