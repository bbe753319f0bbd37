use thiserror::Error;

use npc_core::CoreError;
use npc_lane::LaneError;
use npc_population::PopulationError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Lane(#[from] LaneError),

    #[error(transparent)]
    Population(#[from] PopulationError),

    #[error("scenario error: {0}")]
    Scenario(String),

    #[error("scenario JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
