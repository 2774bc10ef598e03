//! Error types for the migration system.

use sqlkit_core::DialectError;

/// Errors that can occur while running migrations or seeds.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// SQL generation failed.
    #[error("SQL generation error: {0}")]
    Dialect(#[from] DialectError),

    /// Database error during execution.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error (reading schema files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No migration is registered under this version.
    #[error("Migration not found: version {0}")]
    MigrationNotFound(i64),

    /// No seed is registered under this name.
    #[error("Seed not found: {0}")]
    SeedNotFound(String),

    /// Two migrations were registered with the same version.
    #[error("Migration version {0} is registered twice")]
    DuplicateVersion(i64),

    /// A migration has no `down` step.
    #[error("Migration '{0}' is not reversible")]
    NotReversible(String),

    /// Invalid migration state.
    #[error("Invalid migration state: {0}")]
    InvalidState(String),
}

/// Result type for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
