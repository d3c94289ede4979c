//! Cross-cutting error types.
//!
//! Crate-specific errors (`ExtractError`, `DatabaseError`, `ConfigError`) live
//! in their own crates. The CLI converges them into `anyhow` at the edge.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (weights, enum names, ranges).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
