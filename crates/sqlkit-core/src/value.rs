//! SQL values and parameter handling.
//!
//! User data always travels as a [`NamedParameter`] next to the SQL text.
//! The only place a value is rendered into SQL is a column default, see
//! [`crate::format`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A native value bound to a parameter or used as a column default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 16-bit integer.
    Int16(i16),
    /// 32-bit integer.
    Int32(i32),
    /// 64-bit integer.
    Int64(i64),
    /// Single precision float.
    Single(f32),
    /// Double precision float.
    Double(f64),
    /// Exact decimal.
    Decimal(Decimal),
    /// Date and time without offset.
    DateTime(NaiveDateTime),
    /// Date only.
    Date(NaiveDate),
    /// Time only.
    Time(NaiveTime),
    /// GUID / UUID.
    Guid(Uuid),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Returns true for [`SqlValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

macro_rules! impl_to_sql_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::$variant(self)
                }
            }
        )*
    };
}

impl_to_sql_value! {
    bool => Bool,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Single,
    f64 => Double,
    Decimal => Decimal,
    NaiveDateTime => DateTime,
    NaiveDate => Date,
    NaiveTime => Time,
    Uuid => Guid,
    String => Text,
    Vec<u8> => Blob,
}

impl ToSqlValue for u8 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int16(i16::from(self))
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self.to_vec())
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

/// Builds a `Vec<SqlValue>` from heterogeneous values.
///
/// ```rust
/// use sqlkit_core::{values, SqlValue};
///
/// let row = values!["dog", 4_i32, true];
/// assert_eq!(row[1], SqlValue::Int32(4));
/// ```
#[macro_export]
macro_rules! values {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::value::ToSqlValue::to_sql_value($value)),*]
    };
}

/// A parameter placeholder name paired with the value to bind to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedParameter {
    /// Placeholder name as it appears in the SQL text.
    pub name: String,
    /// Value to bind.
    pub value: SqlValue,
}

impl NamedParameter {
    /// Creates a new named parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: SqlValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
