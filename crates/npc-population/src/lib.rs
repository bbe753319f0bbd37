//! `npc-population` — keeps the NPC vehicle population bounded.
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`config`]    | `SpawnerConfig`, `VehicleProfile`                        |
//! | [`spawner`]   | `Spawner`, `SpawnOutcome`                                |
//! | [`despawner`] | `despawn_flagged`                                        |
//! | [`occupancy`] | `OccupancyOracle` trait, `RTreeOccupancy` (rstar)        |
//! | [`error`]     | `PopulationError`, `PopulationResult<T>`                 |
//!
//! Both halves run in the single-threaded tail of a tick, despawner first,
//! so the live count has exactly one writer at a time.

pub mod config;
pub mod despawner;
pub mod error;
pub mod occupancy;
pub mod spawner;


pub use config::{SpawnerConfig, VehicleProfile};
pub use despawner::despawn_flagged;
pub use error::{PopulationError, PopulationResult};
pub use occupancy::{OccupancyOracle, RTreeOccupancy};
pub use spawner::{SPAWN_CLEARANCE, SpawnOutcome, Spawner};
