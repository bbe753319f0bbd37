//! Vehicle-arena error type.

use thiserror::Error;

use npc_core::VehicleId;

/// Errors produced by `npc-agent`.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The handle's slot is empty or has been reused by a newer vehicle.
    #[error("{0} is not a live vehicle")]
    StaleHandle(VehicleId),
}

pub type AgentResult<T> = Result<T, AgentError>;
