//! Lane-graph error type.

use thiserror::Error;

use npc_core::LaneId;

/// Errors produced by `npc-lane`.
#[derive(Debug, Error)]
pub enum LaneError {
    /// A lookup named a lane the scenario never defined.  Indicates a corrupt
    /// or incomplete scenario; never silently defaulted.
    #[error("lane {0} not found in graph")]
    LaneNotFound(LaneId),

    #[error("lane {0} defined more than once")]
    DuplicateLane(LaneId),

    #[error("lane {id} has {count} waypoints; at least 2 are required")]
    TooFewWaypoints { id: LaneId, count: usize },

    #[error("lane {id} has invalid speed limit {limit}")]
    InvalidSpeedLimit { id: LaneId, limit: f32 },
}

pub type LaneResult<T> = Result<T, LaneError>;
