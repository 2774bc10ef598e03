//! Portable type to vendor type mapping helpers.
//!
//! The string-like types share one set of precision bands across every
//! vendor; only the type names differ:
//!
//! | precision            | result                    |
//! |----------------------|---------------------------|
//! | `<= 0`               | sized type, width 255     |
//! | `1..=255`            | sized type, exact width   |
//! | `256..=65535`        | text type                 |
//! | `65536..=16777215`   | medium text type          |
//! | `> 16777215`         | unsupported               |

use crate::error::DialectError;
use crate::schema::DbType;

/// Width used for string columns declared without a size.
pub const DEFAULT_STRING_LENGTH: i32 = 255;

/// Largest precision that still maps to a sized string type.
pub const MAX_SIZED_STRING_LENGTH: i32 = 255;

/// Largest precision that maps to the text type.
pub const MAX_TEXT_LENGTH: i32 = 65_535;

/// Largest precision that maps to the medium text type.
pub const MAX_MEDIUM_TEXT_LENGTH: i32 = 16_777_215;

/// Total precision used for every decimal column.
pub const DECIMAL_PRECISION: i32 = 19;

/// Scale used for decimal columns declared without a size.
pub const DEFAULT_DECIMAL_SCALE: i32 = 5;

/// Vendor type names for the string bands.
#[derive(Debug, Clone, Copy)]
pub struct StringTypeNames {
    /// Fixed-length sized type, e.g. `CHAR`.
    pub fixed: &'static str,
    /// Variable-length sized type, e.g. `VARCHAR`.
    pub variable: &'static str,
    /// Type used from 256 up to 65535.
    pub text: &'static str,
    /// Type used from 65536 up to 16777215.
    pub medium_text: &'static str,
}

/// Maps a string-like type through the precision bands.
///
/// Returns `None` when `db_type` is not a string type or `precision` is past
/// the medium text band.
#[must_use]
pub fn string_type(db_type: DbType, precision: i32, names: &StringTypeNames) -> Option<String> {
    if !db_type.is_string() {
        return None;
    }
    let sized = if db_type.is_fixed_length() {
        names.fixed
    } else {
        names.variable
    };

    match precision {
        p if p <= 0 => Some(format!("{sized}({DEFAULT_STRING_LENGTH})")),
        1..=MAX_SIZED_STRING_LENGTH => Some(format!("{sized}({precision})")),
        256..=MAX_TEXT_LENGTH => Some(names.text.to_string()),
        65_536..=MAX_MEDIUM_TEXT_LENGTH => Some(names.medium_text.to_string()),
        _ => None,
    }
}

/// Maps a decimal column. Only the scale follows the precision argument;
/// the total precision stays at [`DECIMAL_PRECISION`].
#[must_use]
pub fn decimal_type(name: &str, precision: i32) -> String {
    let scale = if precision <= 0 {
        DEFAULT_DECIMAL_SCALE
    } else {
        precision
    };
    format!("{name}({DECIMAL_PRECISION},{scale})")
}

/// Builds the error for a type the dialect cannot map.
#[must_use]
pub const fn unsupported(db_type: DbType, precision: i32, dialect: &'static str) -> DialectError {
    DialectError::UnsupportedType {
        db_type,
        precision,
        dialect,
    }
}
