//! SQLite dialect.
//!
//! SQLite has no `ALTER TABLE ... ADD CONSTRAINT`, so primary keys are
//! always declared inside CREATE TABLE and foreign key changes after the
//! fact are rejected. Unique keys become unique indexes.

use super::{
    column_parts, create_table_statement, default_clause, primary_key_name, Dialect, DialectKind,
};
use crate::error::{DialectError, Result};
use crate::format;
use crate::schema::{Column, DbType, OnDelete, Table};
use crate::types::{self, StringTypeNames};
use crate::value::SqlValue;

const STRING_TYPES: StringTypeNames = StringTypeNames {
    fixed: "CHAR",
    variable: "VARCHAR",
    text: "TEXT",
    medium_text: "TEXT",
};

/// SQLite dialect (3.35 or later for `returning` and `drop column`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Sqlite
    }

    fn parameter_prefix(&self) -> &'static str {
        "@"
    }

    fn auto_increment_sql(&self) -> &'static str {
        "autoincrement"
    }

    fn inline_primary_key(&self, _table: &Table) -> bool {
        true
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        format::numeric_bool(value)
    }

    fn db_type_string(&self, db_type: DbType, precision: i32) -> Result<String> {
        if db_type.is_string() {
            return types::string_type(db_type, precision, &STRING_TYPES)
                .ok_or_else(|| types::unsupported(db_type, precision, self.name()));
        }
        let name = match db_type {
            DbType::Binary => "BLOB",
            DbType::Boolean => "BOOLEAN",
            DbType::Byte | DbType::SByte | DbType::Int16 => "SMALLINT",
            DbType::Int32 | DbType::UInt16 | DbType::UInt32 => "INTEGER",
            DbType::Int64 => "BIGINT",
            DbType::Currency => "NUMERIC",
            DbType::Decimal => return Ok(types::decimal_type("NUMERIC", precision)),
            DbType::Date => "DATE",
            DbType::DateTime => "DATETIME",
            DbType::Double => "DOUBLE",
            DbType::Single => "REAL",
            DbType::Guid => "CHAR(36)",
            DbType::Time => "TIME",
            _ => return Err(types::unsupported(db_type, precision, self.name())),
        };
        Ok(name.to_string())
    }

    /// An auto-increment column is SQLite's rowid alias and must be
    /// declared `INTEGER PRIMARY KEY AUTOINCREMENT`.
    fn column_to_sql_when_create(&self, column: &Column) -> Result<String> {
        if !column.auto_increment {
            let sql_type = self.db_type_string(column.db_type, column.size)?;
            let mut parts = column_parts(self, column, sql_type);
            parts.extend(default_clause(self, column)?);
            return Ok(parts.join(" "));
        }

        if !column.primary_key {
            return Err(DialectError::Argument(format!(
                "Auto-increment column {} must be the primary key in {}",
                column.name,
                self.name()
            )));
        }
        Ok(format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", column.name))
    }

    fn create_table_sqls(&self, table: &Table) -> Result<Vec<String>> {
        let primary_key: Vec<&str> = table.primary_key_columns().collect();
        let has_identity = table.columns.iter().any(|c| c.auto_increment);

        if has_identity && primary_key.len() > 1 {
            return Err(DialectError::Argument(format!(
                "Table {} combines an auto-increment column with a composite primary key",
                table.name
            )));
        }

        // The identity column already carries the key.
        let constraint = (!has_identity && !primary_key.is_empty()).then(|| {
            format!(
                "constraint {} primary key ({})",
                primary_key_name(&table.name),
                primary_key.join(", ")
            )
        });
        Ok(vec![create_table_statement(
            self,
            table,
            constraint.as_deref(),
        )?])
    }

    fn primary_key_sql(&self, _pk_name: &str, _table: &str, _columns: &[&str]) -> Result<String> {
        Err(self.not_supported("add primary key"))
    }

    fn drop_primary_key_sql(&self, _pk_name: &str, _table: &str) -> Result<String> {
        Err(self.not_supported("drop primary key"))
    }

    fn foreign_key_sql(
        &self,
        _fk_name: &str,
        _table: &str,
        _column: &str,
        _referencing_table: &str,
        _referencing_column: &str,
        _on_delete: OnDelete,
    ) -> Result<String> {
        Err(self.not_supported("add foreign key"))
    }

    fn drop_foreign_key_sql(&self, _fk_name: &str, _table: &str) -> Result<String> {
        Err(self.not_supported("drop foreign key"))
    }

    fn unique_key_sql(&self, uk_name: &str, table: &str, columns: &[&str]) -> Result<String> {
        if columns.is_empty() {
            return Err(DialectError::Argument(
                "No columns specified for unique key".to_string(),
            ));
        }
        Ok(format!(
            "create unique index {uk_name} on {table} ({})",
            columns.join(", ")
        ))
    }

    fn drop_unique_key_sql(&self, uk_name: &str, _table: &str) -> Result<String> {
        Ok(format!("drop index {uk_name}"))
    }

    fn insert_returning_column_sql(
        &self,
        table: &str,
        columns: &[&str],
        values: Option<&[SqlValue]>,
        returning_column: &str,
        _returning_parameter: &str,
    ) -> Result<String> {
        let insert = self.insert_sql(table, columns, values)?;
        Ok(format!("{insert} returning {returning_column}"))
    }

    fn table_exists_sql(&self, table: &str) -> String {
        format!(
            "select count(*) from sqlite_master where type = 'table' and name = {}",
            format::quote(table)
        )
    }

    fn wrap_select_sql_with_pagination(&self, sql: &str, skip: u64, take: u64) -> Result<String> {
        Ok(format!("{sql} limit {take} offset {skip}"))
    }
}
