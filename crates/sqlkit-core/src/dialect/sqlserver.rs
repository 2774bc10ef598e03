//! Microsoft SQL Server dialect.

use super::{column_parts, default_literal, insert_lists, Dialect, DialectKind};
use crate::error::Result;
use crate::format;
use crate::schema::{Column, DbType};
use crate::types::{self, StringTypeNames};
use crate::value::SqlValue;

const STRING_TYPES: StringTypeNames = StringTypeNames {
    fixed: "CHAR",
    variable: "VARCHAR",
    text: "TEXT",
    medium_text: "MEDIUMTEXT",
};

/// SQL Server dialect.
///
/// Identity columns use `identity(1,1)`; generated keys are read back
/// through an `output` clause into a table variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn default_constraint_name(table: &str, column: &str) -> String {
        format!("DF_{table}_{column}")
    }
}

impl Dialect for SqlServerDialect {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::SqlServer
    }

    fn parameter_prefix(&self) -> &'static str {
        "@"
    }

    fn auto_increment_sql(&self) -> &'static str {
        "identity(1,1)"
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
            DbType::Binary => "BINARY",
            DbType::Boolean => "BIT",
            DbType::Byte => "TINYINT UNSIGNED",
            DbType::Currency => "MONEY",
            DbType::Date | DbType::DateTime => "DATETIME",
            DbType::Decimal => return Ok(types::decimal_type("NUMERIC", precision)),
            DbType::Double | DbType::Single => "FLOAT",
            DbType::Guid => "VARCHAR(40)",
            DbType::Int16 => "SMALLINT",
            DbType::Int32 => "INTEGER",
            DbType::Int64 => "BIGINT",
            DbType::Time => "TIME",
            _ => return Err(types::unsupported(db_type, precision, self.name())),
        };
        Ok(name.to_string())
    }

    /// Defaults become named constraints so a later column drop can
    /// remove them.
    fn column_definition_sql(&self, table: &str, column: &Column) -> Result<String> {
        let sql_type = self.db_type_string(column.db_type, column.size)?;
        let mut parts = column_parts(self, column, sql_type);
        if let Some(ref default) = column.default_value {
            parts.push(format!(
                "constraint {} default ({})",
                Self::default_constraint_name(table, &column.name),
                default_literal(self, column, default)?
            ));
        }
        if column.auto_increment {
            parts.push(self.auto_increment_sql().to_string());
        }
        Ok(parts.join(" "))
    }

    fn drop_column_sql(&self, table: &str, column: &str) -> Vec<String> {
        let constraint = Self::default_constraint_name(table, column);
        vec![
            format!(
                "if object_id('{constraint}', 'D') is not null \
                 alter table {table} drop constraint {constraint}"
            ),
            format!("alter table {table} drop column {column}"),
        ]
    }

    fn insert_returning_column_sql(
        &self,
        table: &str,
        columns: &[&str],
        values: Option<&[SqlValue]>,
        returning_column: &str,
        returning_parameter: &str,
    ) -> Result<String> {
        let (column_list, placeholders) = insert_lists(self, columns, values)?;
        Ok(format!(
            "declare @tempTable TABLE (id int); \
             insert into {table} ( {column_list} ) output Inserted.{returning_column} into @tempTable \
             values ( {placeholders} ); \
             select @{returning_parameter} = id from @tempTable"
        ))
    }

    fn table_exists_sql(&self, table: &str) -> String {
        format!(
            "SELECT count(*) FROM INFORMATION_SCHEMA.TABLES WHERE TABLE_NAME = {}",
            format::quote(table)
        )
    }

    fn wrap_select_sql_with_pagination(&self, sql: &str, skip: u64, take: u64) -> Result<String> {
        // OFFSET/FETCH is only valid after an ORDER BY.
        let order = if has_order_by(sql) {
            ""
        } else {
            " order by (select null)"
        };
        Ok(format!(
            "{sql}{order} offset {skip} rows fetch next {take} rows only"
        ))
    }
}

/// Whether `sql` has an `order by`, whatever whitespace or case separates
/// the two words.
fn has_order_by(sql: &str) -> bool {
    let words: Vec<&str> = sql.split_whitespace().collect();
    words
        .windows(2)
        .any(|w| w[0].eq_ignore_ascii_case("order") && w[1].eq_ignore_ascii_case("by"))
}
