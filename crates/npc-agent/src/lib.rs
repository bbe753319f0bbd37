//! `npc-agent` — vehicle state and storage for the NPC traffic workspace.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`vehicle`]  | `VehicleConfig` (dynamics), `VehicleBounds` (body extents)  |
//! | [`state`]    | `VehicleAgent`, per-step state structs, `SpeedMode`, `YieldPhase`, `Pose` |
//! | [`store`]    | `VehicleStore` (generational arena), `VehicleRngs`          |
//! | [`error`]    | `AgentError`, `AgentResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on config and state types. |

pub mod error;
pub mod state;
pub mod store;
pub mod vehicle;


pub use error::{AgentError, AgentResult};
pub use state::{
    CognitionState, ControlState, DecisionState, Pose, SpeedMode, VehicleAgent, YieldPhase,
};
pub use store::{VehicleRngs, VehicleStore};
pub use vehicle::{VehicleBounds, VehicleConfig};
