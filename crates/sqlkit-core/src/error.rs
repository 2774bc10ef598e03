//! Error types for SQL generation.

use crate::schema::DbType;

/// Errors raised while generating SQL.
///
/// Generation is pure, so none of these are transient: the same input
/// always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialectError {
    /// The caller supplied a missing or inconsistent argument.
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// Columns and values were given with different lengths.
    #[error("Columns and values length must be the same ({columns} columns, {values} values)")]
    ArgumentMismatch {
        /// Number of columns.
        columns: usize,
        /// Number of values.
        values: usize,
    },

    /// The vendor has no type for this portable type and precision.
    #[error("The type {db_type:?} with precision {precision} is not available for {dialect}")]
    UnsupportedType {
        /// The portable type.
        db_type: DbType,
        /// The requested precision.
        precision: i32,
        /// Name of the dialect.
        dialect: &'static str,
    },

    /// A filter operator is unknown or rejected by the vendor.
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// The vendor has no syntax for this operation.
    #[error("{operation} is not supported by {dialect}")]
    NotSupported {
        /// The operation that was requested.
        operation: &'static str,
        /// Name of the dialect.
        dialect: &'static str,
    },
}

/// Result type for SQL generation.
pub type Result<T> = std::result::Result<T, DialectError>;
