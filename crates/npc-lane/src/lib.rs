//! `npc-lane` — the static lane graph NPC vehicles drive on.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`lane`]   | `Lane`, `TurnDirection`                                      |
//! | [`graph`]  | `LaneGraph` (dense lanes + id index), `LaneGraphBuilder`     |
//! | [`naming`] | `parse_lane_id` for authored `<prefix>.<int>` lane names     |
//! | [`error`]  | `LaneError`, `LaneResult<T>`                                 |
//!
//! The graph is built once from scenario data and is read-only afterwards.
//! It is `Send + Sync` and shared by reference with every pipeline worker.

pub mod error;
pub mod graph;
pub mod lane;
pub mod naming;

#[cfg(test)]
mod tests;

pub use error::{LaneError, LaneResult};
pub use graph::{LaneGraph, LaneGraphBuilder};
pub use lane::{Lane, TurnDirection};
pub use naming::parse_lane_id;
