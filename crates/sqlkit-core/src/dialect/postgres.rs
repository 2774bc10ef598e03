//! PostgreSQL dialect.

use super::{column_parts, default_clause, Dialect, DialectKind};
use crate::error::{DialectError, Result};
use crate::format;
use crate::schema::{Column, DbType};
use crate::types::{self, StringTypeNames};
use crate::value::SqlValue;

const STRING_TYPES: StringTypeNames = StringTypeNames {
    fixed: "CHAR",
    variable: "VARCHAR",
    text: "TEXT",
    medium_text: "TEXT",
};

/// PostgreSQL dialect.
///
/// Generated integer keys are declared with the serial pseudo-types rather
/// than a column clause.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn serial_type(&self, column: &Column) -> Result<&'static str> {
        match column.db_type {
            DbType::Int16 => Ok("SMALLSERIAL"),
            DbType::Int32 => Ok("SERIAL"),
            DbType::Int64 => Ok("BIGSERIAL"),
            other => Err(types::unsupported(other, column.size, self.name())),
        }
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::PostgreSql
    }

    fn parameter_prefix(&self) -> &'static str {
        ":"
    }

    fn auto_increment_sql(&self) -> &'static str {
        ""
    }

    fn db_type_string(&self, db_type: DbType, precision: i32) -> Result<String> {
        if db_type.is_string() {
            return types::string_type(db_type, precision, &STRING_TYPES)
                .ok_or_else(|| types::unsupported(db_type, precision, self.name()));
        }
        let name = match db_type {
            DbType::Binary => "BYTEA",
            DbType::Boolean => "BOOLEAN",
            DbType::Byte | DbType::SByte | DbType::Int16 => "SMALLINT",
            DbType::Currency => "MONEY",
            DbType::Date => "DATE",
            DbType::DateTime => "TIMESTAMP",
            DbType::DateTimeOffset => "TIMESTAMPTZ",
            DbType::Decimal => return Ok(types::decimal_type("NUMERIC", precision)),
            DbType::Double => "DOUBLE PRECISION",
            DbType::Guid => "UUID",
            DbType::Int32 | DbType::UInt16 => "INTEGER",
            DbType::Int64 | DbType::UInt32 => "BIGINT",
            DbType::UInt64 => "NUMERIC(20,0)",
            DbType::Single => "REAL",
            DbType::Time => "TIME",
            DbType::Xml => "XML",
            _ => return Err(types::unsupported(db_type, precision, self.name())),
        };
        Ok(name.to_string())
    }

    fn db_type(&self, sql_type: &str, precision: i32) -> Result<DbType> {
        let lowered = sql_type.trim().to_ascii_lowercase();
        let base = lowered
            .split_once('(')
            .map_or(lowered.as_str(), |(name, _)| name)
            .trim();

        let db_type = match base {
            "bit" if precision == 1 => DbType::Boolean,
            "bit" | "bytea" => DbType::Binary,
            "boolean" | "bool" => DbType::Boolean,
            "char" | "character" => DbType::StringFixedLength,
            "varchar" | "character varying" | "text" => DbType::String,
            "smallint" | "int2" | "smallserial" => DbType::Int16,
            "integer" | "int" | "int4" | "serial" => DbType::Int32,
            "bigint" | "int8" | "bigserial" => DbType::Int64,
            "real" | "float4" => DbType::Single,
            "double precision" | "float8" => DbType::Double,
            "numeric" | "decimal" => DbType::Decimal,
            "money" => DbType::Currency,
            "date" => DbType::Date,
            "timestamp" | "timestamp without time zone" => DbType::DateTime,
            "timestamptz" | "timestamp with time zone" => DbType::DateTimeOffset,
            "time" | "time without time zone" => DbType::Time,
            "uuid" => DbType::Guid,
            "xml" => DbType::Xml,
            _ => {
                return Err(DialectError::Argument(format!(
                    "Unknown {} type: {sql_type}",
                    self.name()
                )))
            }
        };
        Ok(db_type)
    }

    fn column_to_sql_when_create(&self, column: &Column) -> Result<String> {
        let sql_type = if column.auto_increment {
            self.serial_type(column)?.to_string()
        } else {
            self.db_type_string(column.db_type, column.size)?
        };
        let mut parts = column_parts(self, column, sql_type);
        parts.extend(default_clause(self, column)?);
        Ok(parts.join(" "))
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
        // Unquoted identifiers are folded to lower case.
        format!(
            "select count(*) from information_schema.tables \
             where table_schema = current_schema() and table_name = {}",
            format::quote(&table.to_lowercase())
        )
    }

    fn wrap_select_sql_with_pagination(&self, sql: &str, skip: u64, take: u64) -> Result<String> {
        Ok(format!("{sql} limit {take} offset {skip}"))
    }
}
