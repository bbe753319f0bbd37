//! `npc-sim` — tick loop orchestrator for the NPC traffic workspace.
//!
//! # Tick loop
//!
//! ```text
//! every tick (fixed dt from config, or caller dt via TrafficSim::step):
//!   ① Snapshot  — copy every live vehicle's lane, position, forward and
//!                 back bumper into the TrafficSnapshot.
//!   ② Pipeline  — cognition → decision → control → pose apply for each
//!                 live vehicle (parallel with the `parallel` feature).
//!                 Failures go to SimObserver::on_agent_fault.
//!   ③ Despawn   — remove every vehicle flagged should_despawn.
//!   ④ Spawn     — top the population up toward its target; an occupied
//!                 spawn point ends spawning for this tick.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the pipeline phase on Rayon's thread pool.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! use npc_sim::{NoopObserver, scenario::load_scenario_json};
//!
//! let mut sim = load_scenario_json(Path::new("town.json"))?
//!     .into_builder()
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod scenario;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use scenario::{Scenario, load_scenario_json, parse_scenario_json};
pub use sim::TrafficSim;
