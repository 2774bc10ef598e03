//! MySQL / MariaDB dialect.

use super::{Dialect, DialectKind};
use crate::error::Result;
use crate::format;
use crate::schema::{DbType, Table};
use crate::types::{self, StringTypeNames};
use crate::value::SqlValue;

const STRING_TYPES: StringTypeNames = StringTypeNames {
    fixed: "CHAR",
    variable: "VARCHAR",
    text: "TEXT",
    medium_text: "MEDIUMTEXT",
};

/// MySQL dialect.
///
/// An `auto_increment` column must be a key when the table is created, so
/// tables with one declare their primary key inside CREATE TABLE.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::MySql
    }

    fn parameter_prefix(&self) -> &'static str {
        "?"
    }

    fn auto_increment_sql(&self) -> &'static str {
        "auto_increment"
    }

    fn inline_primary_key(&self, table: &Table) -> bool {
        table.columns.iter().any(|c| c.auto_increment)
    }

    fn db_type_string(&self, db_type: DbType, precision: i32) -> Result<String> {
        if db_type.is_string() {
            return types::string_type(db_type, precision, &STRING_TYPES)
                .ok_or_else(|| types::unsupported(db_type, precision, self.name()));
        }
        let name = match db_type {
            DbType::Binary => "BLOB",
            DbType::Boolean => "BOOLEAN",
            DbType::Byte => "TINYINT UNSIGNED",
            DbType::SByte => "TINYINT",
            DbType::Currency => "DECIMAL(19,4)",
            DbType::Date => "DATE",
            DbType::DateTime => "DATETIME",
            DbType::Decimal => return Ok(types::decimal_type("DECIMAL", precision)),
            DbType::Double => "DOUBLE",
            DbType::Single => "FLOAT",
            DbType::Guid => "CHAR(36)",
            DbType::Int16 => "SMALLINT",
            DbType::Int32 => "INTEGER",
            DbType::Int64 => "BIGINT",
            DbType::UInt16 => "SMALLINT UNSIGNED",
            DbType::UInt32 => "INTEGER UNSIGNED",
            DbType::UInt64 => "BIGINT UNSIGNED",
            DbType::Time => "TIME",
            _ => return Err(types::unsupported(db_type, precision, self.name())),
        };
        Ok(name.to_string())
    }

    fn drop_primary_key_sql(&self, _pk_name: &str, table: &str) -> Result<String> {
        Ok(format!("alter table {table} drop primary key"))
    }

    fn drop_foreign_key_sql(&self, fk_name: &str, table: &str) -> Result<String> {
        Ok(format!("alter table {table} drop foreign key {fk_name}"))
    }

    fn drop_unique_key_sql(&self, uk_name: &str, table: &str) -> Result<String> {
        Ok(format!("alter table {table} drop index {uk_name}"))
    }

    fn insert_returning_column_sql(
        &self,
        table: &str,
        columns: &[&str],
        values: Option<&[SqlValue]>,
        _returning_column: &str,
        returning_parameter: &str,
    ) -> Result<String> {
        let insert = self.insert_sql(table, columns, values)?;
        Ok(format!(
            "{insert}; select last_insert_id() into @{returning_parameter}"
        ))
    }

    fn table_exists_sql(&self, table: &str) -> String {
        format!(
            "select count(*) from information_schema.tables \
             where table_schema = database() and table_name = {}",
            format::quote(table)
        )
    }

    fn wrap_select_sql_with_pagination(&self, sql: &str, skip: u64, take: u64) -> Result<String> {
        Ok(format!("{sql} limit {skip}, {take}"))
    }
}
