//! Engine-level error type for orchestrated operations.

use sprintpilot_core::error::CoreError;
use sprintpilot_core::types::DbId;

/// Error type for engine operations.
///
/// Wraps [`CoreError`] for domain errors and adds infrastructure variants.
/// AI provider failures never appear here — the gate converts them to
/// fallback values at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A domain-level error from `sprintpilot_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request DTO validation failed.
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Convenience type alias for engine operation results.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Shorthand for a missing-entity domain error.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::Core(CoreError::NotFound { entity, id })
    }
}
