//! Database dialect implementations.
//!
//! [`Dialect`] carries the whole SQL-generation contract. The default
//! methods produce the statements whose syntax is shared by every vendor;
//! each vendor module overrides the parts that differ (type names,
//! identity columns, generated-key retrieval, pagination, constraint DDL).
//!
//! Dialects hold no state. The [`DialectKind`] singletons can be shared
//! freely across threads.

mod mysql;
mod postgres;
mod sqlite;
mod sqlserver;

pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;
pub use sqlserver::SqlServerDialect;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DialectError, Result};
use crate::filter::{CompareOperator, Filter, LogicOperator, WhereBuilder, WhereClause};
use crate::format;
use crate::schema::{Column, DbType, OnDelete, Table};
use crate::value::{NamedParameter, SqlValue};

/// SQL text plus the parameters to bind to its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Statement text.
    pub sql: String,
    /// Parameters in placeholder order.
    pub parameters: Vec<NamedParameter>,
}

impl Statement {
    /// A statement without parameters.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            parameters: Vec::new(),
        }
    }

    /// A statement with parameters.
    #[must_use]
    pub fn with_parameters(sql: impl Into<String>, parameters: Vec<NamedParameter>) -> Self {
        Self {
            sql: sql.into(),
            parameters,
        }
    }
}

/// The supported database products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialectKind {
    /// Microsoft SQL Server.
    SqlServer,
    /// MySQL / MariaDB.
    MySql,
    /// PostgreSQL.
    PostgreSql,
    /// SQLite 3.35+.
    Sqlite,
}

impl DialectKind {
    /// Every supported kind.
    pub const ALL: [Self; 4] = [Self::SqlServer, Self::MySql, Self::PostgreSql, Self::Sqlite];

    /// Returns the shared dialect instance for this kind.
    #[must_use]
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            Self::SqlServer => &SqlServerDialect,
            Self::MySql => &MySqlDialect,
            Self::PostgreSql => &PostgresDialect,
            Self::Sqlite => &SqliteDialect,
        }
    }

    /// Returns the dialect name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SqlServer => "sqlserver",
            Self::MySql => "mysql",
            Self::PostgreSql => "postgresql",
            Self::Sqlite => "sqlite",
        }
    }

    /// Infers the kind from a connection URL scheme.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        let scheme = url.split(':').next()?.to_ascii_lowercase();
        match scheme.as_str() {
            "sqlite" => Some(Self::Sqlite),
            "postgres" | "postgresql" => Some(Self::PostgreSql),
            "mysql" | "mariadb" => Some(Self::MySql),
            "mssql" | "sqlserver" => Some(Self::SqlServer),
            _ => None,
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DialectKind {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgresql" | "postgres" | "pg" => Ok(Self::PostgreSql),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(DialectError::Argument(format!("Unknown dialect: {other}"))),
        }
    }
}

/// Trait for database-specific SQL generation.
///
/// Every method is a pure function of its arguments.
pub trait Dialect: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Returns the dialect kind.
    fn kind(&self) -> DialectKind;

    /// Prefix put in front of generated parameter names, e.g. `@`.
    fn parameter_prefix(&self) -> &'static str;

    /// Keyword for nullable columns.
    fn word_null(&self) -> &'static str {
        "NULL"
    }

    /// Keyword for non-nullable columns.
    fn word_not_null(&self) -> &'static str {
        "NOT NULL"
    }

    /// Keyword introducing a where clause.
    fn word_where(&self) -> &'static str {
        "where"
    }

    /// Returns the vendor type for a portable type and precision.
    fn db_type_string(&self, db_type: DbType, precision: i32) -> Result<String>;

    /// Maps a vendor type name back to a portable type.
    fn db_type(&self, sql_type: &str, precision: i32) -> Result<DbType> {
        let _ = (sql_type, precision);
        Err(self.not_supported("db type lookup"))
    }

    /// Column clause for database-generated values.
    fn auto_increment_sql(&self) -> &'static str;

    /// Vendors that require the primary key of `table` inside CREATE TABLE
    /// return true; the table is then produced as a single statement.
    fn inline_primary_key(&self, table: &Table) -> bool {
        let _ = table;
        false
    }

    /// Spelling of a boolean literal in a default clause.
    fn bool_literal(&self, value: bool) -> &'static str {
        format::word_bool(value)
    }

    /// Renders a native value as a default-clause literal.
    fn column_value_to_sql(&self, value: &SqlValue) -> String {
        format::literal(value, |b| self.bool_literal(b))
    }

    /// Renders a column for CREATE TABLE / ADD COLUMN:
    /// name, type, nullability, default, auto-increment.
    fn column_to_sql_when_create(&self, column: &Column) -> Result<String> {
        let sql_type = self.db_type_string(column.db_type, column.size)?;
        let mut parts = column_parts(self, column, sql_type);
        parts.extend(default_clause(self, column)?);
        if column.auto_increment && !self.auto_increment_sql().is_empty() {
            parts.push(self.auto_increment_sql().to_string());
        }
        Ok(parts.join(" "))
    }

    /// Renders a column in the context of its table. Vendors that name
    /// per-column constraints after the table override this.
    fn column_definition_sql(&self, table: &str, column: &Column) -> Result<String> {
        let _ = table;
        self.column_to_sql_when_create(column)
    }

    /// Generates the statements creating `table` and its primary key.
    fn create_table_sqls(&self, table: &Table) -> Result<Vec<String>> {
        let primary_key: Vec<&str> = table.primary_key_columns().collect();
        let pk_name = primary_key_name(&table.name);

        if self.inline_primary_key(table) && !primary_key.is_empty() {
            let constraint = format!(
                "constraint {pk_name} primary key ({})",
                primary_key.join(", ")
            );
            return Ok(vec![create_table_statement(self, table, Some(&constraint))?]);
        }

        let mut sqls = vec![create_table_statement(self, table, None)?];
        if !primary_key.is_empty() {
            sqls.push(self.primary_key_sql(&pk_name, &table.name, &primary_key)?);
        }
        Ok(sqls)
    }

    /// Generates the statements dropping `table`.
    fn drop_table_sqls(&self, table: &str) -> Vec<String> {
        vec![format!("drop table {table}")]
    }

    /// Generates ALTER TABLE ... ADD for one column.
    fn add_column_sql(&self, table: &str, column: &Column) -> Result<String> {
        Ok(format!(
            "alter table {table} add {}",
            self.column_definition_sql(table, column)?
        ))
    }

    /// Generates the statements dropping one column.
    fn drop_column_sql(&self, table: &str, column: &str) -> Vec<String> {
        vec![format!("alter table {table} drop column {column}")]
    }

    /// Generates a named primary key constraint.
    fn primary_key_sql(&self, pk_name: &str, table: &str, columns: &[&str]) -> Result<String> {
        if columns.is_empty() {
            return Err(DialectError::Argument(
                "No columns specified for primary key".to_string(),
            ));
        }
        Ok(format!(
            "alter table {table} add constraint {pk_name} primary key ({})",
            columns.join(", ")
        ))
    }

    /// Drops a named primary key constraint.
    fn drop_primary_key_sql(&self, pk_name: &str, table: &str) -> Result<String> {
        Ok(format!("alter table {table} drop constraint {pk_name}"))
    }

    /// Generates a single-column foreign key constraint.
    fn foreign_key_sql(
        &self,
        fk_name: &str,
        table: &str,
        column: &str,
        referencing_table: &str,
        referencing_column: &str,
        on_delete: OnDelete,
    ) -> Result<String> {
        let mut sql = format!(
            "alter table {table} add constraint {fk_name} foreign key ({column}) \
             references {referencing_table}({referencing_column})"
        );
        if let Some(clause) = on_delete.to_sql() {
            sql.push(' ');
            sql.push_str(clause);
        }
        Ok(sql)
    }

    /// Drops a named foreign key constraint.
    fn drop_foreign_key_sql(&self, fk_name: &str, table: &str) -> Result<String> {
        Ok(format!("alter table {table} drop constraint {fk_name}"))
    }

    /// Generates a named unique constraint.
    fn unique_key_sql(&self, uk_name: &str, table: &str, columns: &[&str]) -> Result<String> {
        if columns.is_empty() {
            return Err(DialectError::Argument(
                "No columns specified for unique key".to_string(),
            ));
        }
        Ok(format!(
            "alter table {table} add constraint {uk_name} unique ({})",
            columns.join(", ")
        ))
    }

    /// Drops a named unique constraint.
    fn drop_unique_key_sql(&self, uk_name: &str, table: &str) -> Result<String> {
        Ok(format!("alter table {table} drop constraint {uk_name}"))
    }

    /// Generates an INSERT template.
    ///
    /// `None` values produce a template whose placeholders are bound later;
    /// otherwise `values` must have one entry per column.
    fn insert_sql(&self, table: &str, columns: &[&str], values: Option<&[SqlValue]>) -> Result<String> {
        let (column_list, placeholders) = insert_lists(self, columns, values)?;
        Ok(format!(
            "insert into {table} ( {column_list} ) values ( {placeholders} )"
        ))
    }

    /// Generates an INSERT that also hands back the generated value of
    /// `returning_column` under `returning_parameter`.
    fn insert_returning_column_sql(
        &self,
        table: &str,
        columns: &[&str],
        values: Option<&[SqlValue]>,
        returning_column: &str,
        returning_parameter: &str,
    ) -> Result<String> {
        let _ = (table, columns, values, returning_column, returning_parameter);
        Err(self.not_supported("insert returning column"))
    }

    /// Generates an UPDATE ... SET template without the where clause.
    fn update_sql(&self, table: &str, columns: &[&str], values: &[SqlValue]) -> Result<String> {
        check_lengths(columns, values.len())?;
        let assignments: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = {}", self.parameter_name(i)))
            .collect();
        Ok(format!("update {table} set {}", assignments.join(", ")))
    }

    /// Generates a DELETE without the where clause.
    fn delete_sql(&self, table: &str) -> String {
        format!("delete from {table}")
    }

    /// Generates a SELECT without the where clause. No columns selects `*`.
    fn select_sql(&self, table: &str, columns: &[&str]) -> String {
        let columns = if columns.is_empty() {
            "*".to_string()
        } else {
            columns.join(", ")
        };
        format!("select {columns} from {table}")
    }

    /// Compiles a filter into a where clause whose first parameter is
    /// numbered `start_index`.
    fn where_sql(&self, filter: Option<&Filter>, start_index: usize) -> Result<WhereClause> {
        WhereBuilder::new(self, start_index).build(filter)
    }

    /// Name of the parameter at `order`.
    fn parameter_name(&self, order: usize) -> String {
        format!("{}par{order}", self.parameter_prefix())
    }

    /// Pairs `values` with parameter names starting at `start_index`.
    fn convert_to_named_parameters(&self, start_index: usize, values: &[SqlValue]) -> Vec<NamedParameter> {
        values
            .iter()
            .enumerate()
            .map(|(i, value)| NamedParameter::new(self.parameter_name(start_index + i), value.clone()))
            .collect()
    }

    /// Keyword for a logic operator.
    fn logic_operator_sql(&self, op: LogicOperator) -> Result<&'static str> {
        Ok(op.keyword())
    }

    /// Symbol for a comparison operator.
    fn compare_operator_sql(&self, op: CompareOperator) -> Result<&'static str> {
        Ok(op.symbol())
    }

    /// Query returning the number of tables called `table` (0 or 1).
    fn table_exists_sql(&self, table: &str) -> String;

    /// Restricts a select to `take` rows after skipping `skip`.
    fn wrap_select_sql_with_pagination(&self, sql: &str, skip: u64, take: u64) -> Result<String> {
        let _ = (sql, skip, take);
        Err(self.not_supported("pagination"))
    }

    /// Builds an INSERT with its parameters.
    fn insert_statement(&self, table: &str, columns: &[&str], values: &[SqlValue]) -> Result<Statement> {
        let sql = self.insert_sql(table, columns, Some(values))?;
        Ok(Statement::with_parameters(
            sql,
            self.convert_to_named_parameters(0, values),
        ))
    }

    /// Builds an UPDATE with its parameters; filter parameters follow the
    /// SET parameters.
    fn update_statement(
        &self,
        table: &str,
        columns: &[&str],
        values: &[SqlValue],
        filter: Option<&Filter>,
    ) -> Result<Statement> {
        let sql = self.update_sql(table, columns, values)?;
        let clause = self.where_sql(filter, values.len())?;
        let mut parameters = self.convert_to_named_parameters(0, values);
        parameters.extend(clause.parameters.iter().cloned());
        Ok(Statement::with_parameters(
            clause.append_to(&sql, self.word_where()),
            parameters,
        ))
    }

    /// Builds a DELETE with its parameters.
    fn delete_statement(&self, table: &str, filter: Option<&Filter>) -> Result<Statement> {
        let clause = self.where_sql(filter, 0)?;
        let sql = clause.append_to(&self.delete_sql(table), self.word_where());
        Ok(Statement::with_parameters(sql, clause.parameters))
    }

    /// Builds a SELECT with its parameters.
    fn select_statement(&self, table: &str, columns: &[&str], filter: Option<&Filter>) -> Result<Statement> {
        let clause = self.where_sql(filter, 0)?;
        let sql = clause.append_to(&self.select_sql(table, columns), self.word_where());
        Ok(Statement::with_parameters(sql, clause.parameters))
    }

    /// Error for an operation this vendor has no syntax for.
    fn not_supported(&self, operation: &'static str) -> DialectError {
        DialectError::NotSupported {
            operation,
            dialect: self.name(),
        }
    }
}

/// Name of the primary key constraint created with a table.
#[must_use]
pub fn primary_key_name(table: &str) -> String {
    format!("pk_{table}")
}

pub(crate) fn nullability<D: Dialect + ?Sized>(dialect: &D, column: &Column) -> &'static str {
    if column.nullable {
        dialect.word_null()
    } else {
        dialect.word_not_null()
    }
}

/// Leading parts of a column definition: name, `sql_type`, nullability.
pub(crate) fn column_parts<D: Dialect + ?Sized>(
    dialect: &D,
    column: &Column,
    sql_type: String,
) -> Vec<String> {
    vec![
        column.name.clone(),
        sql_type,
        nullability(dialect, column).to_string(),
    ]
}

/// Literal for a column default. NaN and infinite floats have no SQL
/// spelling and are rejected.
pub(crate) fn default_literal<D: Dialect + ?Sized>(
    dialect: &D,
    column: &Column,
    value: &SqlValue,
) -> Result<String> {
    if !format::has_literal(value) {
        return Err(DialectError::Argument(format!(
            "Default value {value:?} of column {} has no SQL literal",
            column.name
        )));
    }
    Ok(dialect.column_value_to_sql(value))
}

/// `default (<literal>)` when the column has a default value.
pub(crate) fn default_clause<D: Dialect + ?Sized>(
    dialect: &D,
    column: &Column,
) -> Result<Option<String>> {
    match column.default_value {
        Some(ref value) => Ok(Some(format!(
            "default ({})",
            default_literal(dialect, column, value)?
        ))),
        None => Ok(None),
    }
}

fn check_lengths(columns: &[&str], values: usize) -> Result<()> {
    if columns.is_empty() {
        return Err(DialectError::Argument("No columns specified".to_string()));
    }
    if columns.len() != values {
        return Err(DialectError::ArgumentMismatch {
            columns: columns.len(),
            values,
        });
    }
    Ok(())
}

/// Column list and placeholder list of an INSERT, index-aligned.
pub(crate) fn insert_lists<D: Dialect + ?Sized>(
    dialect: &D,
    columns: &[&str],
    values: Option<&[SqlValue]>,
) -> Result<(String, String)> {
    check_lengths(columns, values.map_or(columns.len(), <[SqlValue]>::len))?;
    let placeholders: Vec<String> = (0..columns.len())
        .map(|i| dialect.parameter_name(i))
        .collect();
    Ok((columns.join(", "), placeholders.join(", ")))
}

/// `create table T ( col, col[, extra] )` after checking column names.
pub(crate) fn create_table_statement<D: Dialect + ?Sized>(
    dialect: &D,
    table: &Table,
    extra: Option<&str>,
) -> Result<String> {
    table.validate()?;
    if table.columns.is_empty() {
        return Err(DialectError::Argument(format!(
            "Table {} has no columns",
            table.name
        )));
    }
    let mut parts = table
        .columns
        .iter()
        .map(|c| dialect.column_definition_sql(&table.name, c))
        .collect::<Result<Vec<_>>>()?;
    if let Some(extra) = extra {
        parts.push(extra.to_string());
    }
    Ok(format!("create table {} ( {} )", table.name, parts.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;
    use pretty_assertions::assert_eq;

    fn animal() -> Table {
        Table::new("Animal")
            .column(Column::int32("id").primary_key().auto_increment())
            .column(Column::string("Description", 50).not_null())
            .column(Column::boolean("Wild").default_value(true))
    }

    #[test]
    fn test_kind_from_str_and_url() {
        assert_eq!("MSSQL".parse::<DialectKind>().unwrap(), DialectKind::SqlServer);
        assert_eq!("pg".parse::<DialectKind>().unwrap(), DialectKind::PostgreSql);
        assert!("oracle".parse::<DialectKind>().is_err());
        assert_eq!(DialectKind::from_url("sqlite::memory:"), Some(DialectKind::Sqlite));
        assert_eq!(
            DialectKind::from_url("postgres://localhost/db"),
            Some(DialectKind::PostgreSql)
        );
        assert_eq!(DialectKind::from_url("redis://x"), None);
    }

    #[test]
    fn test_singletons_report_their_kind() {
        for kind in DialectKind::ALL {
            assert_eq!(kind.dialect().kind(), kind);
            assert_eq!(kind.dialect().name(), kind.name());
        }
    }

    #[test]
    fn test_parameter_names_follow_order_only() {
        for kind in DialectKind::ALL {
            let d = kind.dialect();
            let prefix = d.parameter_prefix();
            assert_eq!(d.parameter_name(0), format!("{prefix}par0"));
            assert_eq!(d.parameter_name(12), format!("{prefix}par12"));
        }
    }

    #[test]
    fn test_simple_insert() {
        for kind in DialectKind::ALL {
            let d = kind.dialect();
            let p = d.parameter_prefix();
            let stmt = d
                .insert_statement("Animal", &["Description"], &values!["dog"])
                .unwrap();
            assert_eq!(
                stmt.sql,
                format!("insert into Animal ( Description ) values ( {p}par0 )")
            );
            assert_eq!(
                stmt.parameters,
                vec![NamedParameter::new(format!("{p}par0"), SqlValue::Text("dog".into()))]
            );
        }
    }

    #[test]
    fn test_insert_template_without_values() {
        let sql = SqlServerDialect
            .insert_sql("Animal", &["Description", "Wild"], None)
            .unwrap();
        assert_eq!(sql, "insert into Animal ( Description, Wild ) values ( @par0, @par1 )");
    }

    #[test]
    fn test_insert_update_length_guard() {
        let d = SqlServerDialect;
        let err = d
            .insert_sql("Animal", &["Description", "Wild"], Some(values!["dog"].as_slice()))
            .unwrap_err();
        assert_eq!(err, DialectError::ArgumentMismatch { columns: 2, values: 1 });

        let err = d.update_sql("Animal", &["Description"], &values!["dog", true]).unwrap_err();
        assert_eq!(err, DialectError::ArgumentMismatch { columns: 1, values: 2 });

        assert!(matches!(
            d.insert_sql("Animal", &[], None),
            Err(DialectError::Argument(_))
        ));
    }

    #[test]
    fn test_update_statement_continues_numbering() {
        let filter = Filter::eq("id", 7);
        let stmt = SqlServerDialect
            .update_statement("Animal", &["Description", "Wild"], &values!["cat", false], Some(&filter))
            .unwrap();
        assert_eq!(
            stmt.sql,
            "update Animal set Description = @par0, Wild = @par1 where id = @par2"
        );
        let names: Vec<&str> = stmt.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["@par0", "@par1", "@par2"]);
    }

    #[test]
    fn test_delete_and_select_statements() {
        let d = PostgresDialect;
        let stmt = d.delete_statement("Animal", Some(&Filter::lt("id", 3))).unwrap();
        assert_eq!(stmt.sql, "delete from Animal where id < :par0");

        let stmt = d.select_statement("Animal", &["id", "Description"], None).unwrap();
        assert_eq!(stmt.sql, "select id, Description from Animal");
        assert!(stmt.parameters.is_empty());
        assert_eq!(d.select_sql("Animal", &[]), "select * from Animal");
    }

    #[test]
    fn test_create_table_zero_pk_is_single_statement() {
        let table = Table::new("Log").column(Column::string("Message", 0));
        for kind in DialectKind::ALL {
            let sqls = kind.dialect().create_table_sqls(&table).unwrap();
            assert_eq!(sqls.len(), 1, "{kind}");
        }
    }

    #[test]
    fn test_create_table_rejects_duplicate_columns() {
        let table = Table::new("Animal")
            .column(Column::int32("id"))
            .column(Column::string("id", 10));
        for kind in DialectKind::ALL {
            assert!(matches!(
                kind.dialect().create_table_sqls(&table),
                Err(DialectError::Argument(_))
            ));
        }
    }

    #[test]
    fn test_non_finite_default_is_rejected() {
        let table = Table::new("Reading")
            .column(Column::new("Ratio", DbType::Double).default_value(f64::NAN))
            .column(Column::new("Peak", DbType::Single).default_value(f32::INFINITY));
        for kind in DialectKind::ALL {
            let d = kind.dialect();
            assert!(
                matches!(d.create_table_sqls(&table), Err(DialectError::Argument(_))),
                "{kind}"
            );
            let column = Column::new("Ratio", DbType::Double).default_value(0.5_f64);
            assert!(d.add_column_sql("Reading", &column).unwrap().contains("default (0.5)"));
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        for kind in DialectKind::ALL {
            let d = kind.dialect();
            assert_eq!(
                d.create_table_sqls(&animal()).unwrap(),
                d.create_table_sqls(&animal()).unwrap()
            );
        }
    }

    #[test]
    fn test_primary_key_requires_columns() {
        let err = SqlServerDialect.primary_key_sql("pk_Animal", "Animal", &[]).unwrap_err();
        assert!(matches!(err, DialectError::Argument(_)));
        assert!(SqlServerDialect.unique_key_sql("uk", "Animal", &[]).is_err());
    }

    #[test]
    fn test_foreign_key_on_delete() {
        let d = SqlServerDialect;
        let sql = d
            .foreign_key_sql("fk_a", "A", "b_id", "B", "id", OnDelete::Cascade)
            .unwrap();
        assert_eq!(
            sql,
            "alter table A add constraint fk_a foreign key (b_id) references B(id) on delete cascade"
        );
        let sql = d
            .foreign_key_sql("fk_a", "A", "b_id", "B", "id", OnDelete::Unspecified)
            .unwrap();
        assert!(sql.ends_with("references B(id)"));
        assert!(d
            .foreign_key_sql("fk_a", "A", "b_id", "B", "id", OnDelete::SetNull)
            .unwrap()
            .contains("on delete set null"));
    }

    #[test]
    fn test_base_unsupported_operations() {
        struct Minimal;
        impl Dialect for Minimal {
            fn name(&self) -> &'static str {
                "minimal"
            }
            fn kind(&self) -> DialectKind {
                DialectKind::SqlServer
            }
            fn parameter_prefix(&self) -> &'static str {
                "$"
            }
            fn db_type_string(&self, db_type: DbType, precision: i32) -> Result<String> {
                Err(crate::types::unsupported(db_type, precision, self.name()))
            }
            fn auto_increment_sql(&self) -> &'static str {
                ""
            }
            fn table_exists_sql(&self, table: &str) -> String {
                format!("select 1 from {table}")
            }
        }

        let d = Minimal;
        assert_eq!(
            d.wrap_select_sql_with_pagination("select * from A", 0, 10),
            Err(DialectError::NotSupported {
                operation: "pagination",
                dialect: "minimal"
            })
        );
        assert!(matches!(
            d.insert_returning_column_sql("A", &["x"], None, "id", "id"),
            Err(DialectError::NotSupported { .. })
        ));
        assert!(matches!(
            d.db_type("int", 0),
            Err(DialectError::NotSupported { .. })
        ));
        assert_eq!(d.parameter_name(3), "$par3");
    }
}
