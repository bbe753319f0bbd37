//! Workspace base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where configuration validation can fail.

use thiserror::Error;

/// Errors raised by `npc-core` validation helpers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `npc-core`.
pub type CoreResult<T> = Result<T, CoreError>;
