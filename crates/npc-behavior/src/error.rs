use thiserror::Error;

use npc_lane::LaneError;

#[derive(Debug, Error)]
pub enum BehaviorError {
    /// The vehicle's current lane is missing from the graph.
    #[error(transparent)]
    Lane(#[from] LaneError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
