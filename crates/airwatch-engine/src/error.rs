//! Engine error types.

use airwatch_domain::DomainError;

/// Errors surfaced to feed and viewer callers of the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The submitted aircraft report failed boundary validation and was
    /// refused before entering the tick pipeline.
    #[error("aircraft report rejected: {0}")]
    Rejected(#[from] DomainError),

    /// The engine task has stopped; no further commands are accepted.
    #[error("engine is not running")]
    Stopped,
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
