//! Schema representation types.
//!
//! A [`Table`] owns an ordered list of [`Column`]s. The order is
//! significant: it decides the column order of the generated DDL.

use serde::{Deserialize, Serialize};

use crate::error::{DialectError, Result};
use crate::value::{SqlValue, ToSqlValue};

/// Portable, vendor-neutral column types.
///
/// Each dialect maps these to its own type names; a type without a
/// mapping fails with [`DialectError::UnsupportedType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DbType {
    /// Fixed-length non-unicode string.
    AnsiStringFixedLength,
    /// Variable-length non-unicode string.
    AnsiString,
    /// Binary data.
    Binary,
    /// Boolean.
    Boolean,
    /// Unsigned 8-bit integer.
    Byte,
    /// Monetary value.
    Currency,
    /// Date only.
    Date,
    /// Date and time.
    DateTime,
    /// Exact numeric.
    Decimal,
    /// Double precision float.
    Double,
    /// Globally unique identifier.
    Guid,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Single precision float.
    Single,
    /// Time only.
    Time,
    /// Fixed-length unicode string.
    StringFixedLength,
    /// Variable-length unicode string.
    String,
    /// Signed 8-bit integer.
    SByte,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Unsigned 64-bit integer.
    UInt64,
    /// Date and time with a UTC offset.
    DateTimeOffset,
    /// XML document.
    Xml,
    /// Untyped value.
    Object,
}

impl DbType {
    /// Returns true for the four string-like types that follow the
    /// precision band rules.
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(
            self,
            Self::AnsiStringFixedLength | Self::AnsiString | Self::StringFixedLength | Self::String
        )
    }

    /// Returns true for fixed-length string types.
    #[must_use]
    pub const fn is_fixed_length(self) -> bool {
        matches!(self, Self::AnsiStringFixedLength | Self::StringFixedLength)
    }
}

/// Action taken on referencing rows when the referenced row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OnDelete {
    /// Delete the referencing rows.
    Cascade,
    /// Set the referencing column to NULL.
    SetNull,
    /// Reject the delete.
    NoAction,
    /// Leave it to the database default.
    #[default]
    Unspecified,
}

impl OnDelete {
    /// Returns the clause text, or `None` for [`OnDelete::Unspecified`].
    #[must_use]
    pub const fn to_sql(self) -> Option<&'static str> {
        match self {
            Self::Cascade => Some("on delete cascade"),
            Self::SetNull => Some("on delete set null"),
            Self::NoAction => Some("on delete no action"),
            Self::Unspecified => None,
        }
    }
}

/// Schema definition for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Portable type.
    pub db_type: DbType,
    /// Size or precision; its meaning depends on the type.
    #[serde(default)]
    pub size: i32,
    /// Whether the column allows NULL values.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Whether this column is part of the primary key.
    #[serde(default)]
    pub primary_key: bool,
    /// Whether the database generates the value.
    #[serde(default)]
    pub auto_increment: bool,
    /// Default value, kept as a native value rather than SQL text.
    #[serde(default)]
    pub default_value: Option<SqlValue>,
}

const fn default_nullable() -> bool {
    true
}

impl Column {
    /// Creates a new nullable column.
    #[must_use]
    pub fn new(name: impl Into<String>, db_type: DbType) -> Self {
        Self {
            name: name.into(),
            db_type,
            size: 0,
            nullable: true,
            primary_key: false,
            auto_increment: false,
            default_value: None,
        }
    }

    /// Variable-length unicode string column.
    #[must_use]
    pub fn string(name: impl Into<String>, size: i32) -> Self {
        Self::new(name, DbType::String).size(size)
    }

    /// 16-bit integer column.
    #[must_use]
    pub fn int16(name: impl Into<String>) -> Self {
        Self::new(name, DbType::Int16)
    }

    /// 32-bit integer column.
    #[must_use]
    pub fn int32(name: impl Into<String>) -> Self {
        Self::new(name, DbType::Int32)
    }

    /// 64-bit integer column.
    #[must_use]
    pub fn int64(name: impl Into<String>) -> Self {
        Self::new(name, DbType::Int64)
    }

    /// Boolean column.
    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, DbType::Boolean)
    }

    /// Date and time column.
    #[must_use]
    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, DbType::DateTime)
    }

    /// Decimal column; `scale` ends up as the scale of the vendor type.
    #[must_use]
    pub fn decimal(name: impl Into<String>, scale: i32) -> Self {
        Self::new(name, DbType::Decimal).size(scale)
    }

    /// Sets the size or precision.
    #[must_use]
    pub const fn size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the column as nullable.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the column as part of the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false; // Primary keys are always NOT NULL
        self
    }

    /// Sets the column to auto-increment.
    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl ToSqlValue) -> Self {
        self.default_value = Some(value.to_sql_value());
        self
    }
}

/// Schema definition for a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Column definitions in declaration order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Creates a new table with no columns.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Adds a column to the table.
    ///
    /// Duplicate names are not checked here; [`Table::add_column`] and the
    /// dialects reject them.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds a column, failing if the name is already taken.
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if self.get_column(&column.name).is_some() {
            return Err(DialectError::Argument(format!(
                "Column {} already exists in table {}",
                column.name, self.name
            )));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Gets a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary key column names in declaration order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.as_str())
    }

    /// Checks the column-name uniqueness invariant.
    pub fn validate(&self) -> Result<()> {
        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.name == column.name) {
                return Err(DialectError::Argument(format!(
                    "Column {} is declared twice in table {}",
                    column.name, self.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_builder() {
        let col = Column::int32("id").primary_key().auto_increment();

        assert_eq!(col.name, "id");
        assert_eq!(col.db_type, DbType::Int32);
        assert!(col.primary_key);
        assert!(col.auto_increment);
        assert!(!col.nullable);
    }

    #[test]
    fn test_table_builder_keeps_order() {
        let table = Table::new("Animal")
            .column(Column::int32("id").primary_key())
            .column(Column::string("Description", 50))
            .column(Column::boolean("Wild").default_value(false));

        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "Description", "Wild"]);
        assert_eq!(table.primary_key_columns().collect::<Vec<_>>(), vec!["id"]);
        assert_eq!(
            table.get_column("Wild").unwrap().default_value,
            Some(SqlValue::Bool(false))
        );
    }

    #[test]
    fn test_add_column_rejects_duplicate() {
        let mut table = Table::new("Animal");
        table.add_column(Column::int32("id")).unwrap();
        let err = table.add_column(Column::int64("id")).unwrap_err();
        assert!(matches!(err, DialectError::Argument(_)));
        assert_eq!(table.columns.len(), 1);
    }

    #[test]
    fn test_validate_detects_duplicate_from_builder() {
        let table = Table::new("Animal")
            .column(Column::int32("id"))
            .column(Column::int32("id"));
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_on_delete_clause() {
        assert_eq!(OnDelete::Cascade.to_sql(), Some("on delete cascade"));
        assert_eq!(OnDelete::SetNull.to_sql(), Some("on delete set null"));
        assert_eq!(OnDelete::NoAction.to_sql(), Some("on delete no action"));
        assert_eq!(OnDelete::Unspecified.to_sql(), None);
    }

    #[test]
    fn test_table_from_json() {
        let json = r#"{
            "name": "Animal",
            "columns": [
                {"name": "id", "db_type": "Int32", "nullable": false, "primary_key": true},
                {"name": "Description", "db_type": "String", "size": 80}
            ]
        }"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.columns.len(), 2);
        assert!(table.columns[0].primary_key);
        assert!(table.columns[1].nullable);
        assert_eq!(table.columns[1].size, 80);
    }
}
