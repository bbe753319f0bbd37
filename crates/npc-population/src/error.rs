use thiserror::Error;

use npc_agent::AgentError;
use npc_lane::LaneError;

#[derive(Debug, Error)]
pub enum PopulationError {
    #[error("spawner configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Lane(#[from] LaneError),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

pub type PopulationResult<T> = Result<T, PopulationError>;
