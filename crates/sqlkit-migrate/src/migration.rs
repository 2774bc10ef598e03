//! Migration and seed definitions.
//!
//! Migrations do not talk to the database. They describe their changes
//! through a [`MigrationContext`], which turns each operation into dialect
//! specific [`Statement`]s. The runner executes the recorded statements.

use sqlkit_core::{Column, Dialect, Filter, OnDelete, SqlValue, Statement, Table};

use crate::error::{MigrateError, Result};

/// A versioned schema change.
pub trait Migration: Send + Sync {
    /// Applies the change.
    fn up(&self, ctx: &mut MigrationContext<'_>) -> Result<()>;

    /// Reverts the change. Irreversible by default.
    fn down(&self, ctx: &mut MigrationContext<'_>) -> Result<()> {
        Err(MigrateError::NotReversible(ctx.name().to_string()))
    }
}

/// A named data load, optionally parameterised.
pub trait Seed: Send + Sync {
    /// Loads the data.
    fn up(&self, ctx: &mut MigrationContext<'_>, param: Option<&str>) -> Result<()>;
}

/// Records the statements a migration or seed produces.
pub struct MigrationContext<'a> {
    dialect: &'a dyn Dialect,
    name: String,
    statements: Vec<Statement>,
}

impl<'a> MigrationContext<'a> {
    /// Creates an empty context for the migration or seed called `name`.
    pub fn new(dialect: &'a dyn Dialect, name: impl Into<String>) -> Self {
        Self {
            dialect,
            name: name.into(),
            statements: Vec::new(),
        }
    }

    /// The dialect statements are generated with.
    #[must_use]
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Name of the migration or seed being recorded.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Statements recorded so far.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Consumes the context, returning the recorded statements.
    #[must_use]
    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }

    fn push_all(&mut self, sqls: Vec<String>) {
        self.statements.extend(sqls.into_iter().map(Statement::new));
    }

    /// Creates a table and its primary key.
    pub fn create_table(&mut self, table: &Table) -> Result<()> {
        let sqls = self.dialect.create_table_sqls(table)?;
        self.push_all(sqls);
        Ok(())
    }

    /// Drops a table.
    pub fn drop_table(&mut self, table: &str) -> Result<()> {
        let sqls = self.dialect.drop_table_sqls(table);
        self.push_all(sqls);
        Ok(())
    }

    /// Adds a column to an existing table.
    pub fn add_column(&mut self, table: &str, column: &Column) -> Result<()> {
        let sql = self.dialect.add_column_sql(table, column)?;
        self.statements.push(Statement::new(sql));
        Ok(())
    }

    /// Drops a column.
    pub fn drop_column(&mut self, table: &str, column: &str) -> Result<()> {
        let sqls = self.dialect.drop_column_sql(table, column);
        self.push_all(sqls);
        Ok(())
    }

    /// Adds a named primary key.
    pub fn add_primary_key(&mut self, pk_name: &str, table: &str, columns: &[&str]) -> Result<()> {
        let sql = self.dialect.primary_key_sql(pk_name, table, columns)?;
        self.statements.push(Statement::new(sql));
        Ok(())
    }

    /// Adds a single-column foreign key.
    pub fn add_foreign_key(
        &mut self,
        fk_name: &str,
        table: &str,
        column: &str,
        referencing_table: &str,
        referencing_column: &str,
        on_delete: OnDelete,
    ) -> Result<()> {
        let sql = self.dialect.foreign_key_sql(
            fk_name,
            table,
            column,
            referencing_table,
            referencing_column,
            on_delete,
        )?;
        self.statements.push(Statement::new(sql));
        Ok(())
    }

    /// Drops a foreign key.
    pub fn drop_foreign_key(&mut self, fk_name: &str, table: &str) -> Result<()> {
        let sql = self.dialect.drop_foreign_key_sql(fk_name, table)?;
        self.statements.push(Statement::new(sql));
        Ok(())
    }

    /// Adds a unique key.
    pub fn add_unique_key(&mut self, uk_name: &str, table: &str, columns: &[&str]) -> Result<()> {
        let sql = self.dialect.unique_key_sql(uk_name, table, columns)?;
        self.statements.push(Statement::new(sql));
        Ok(())
    }

    /// Drops a unique key.
    pub fn drop_unique_key(&mut self, uk_name: &str, table: &str) -> Result<()> {
        let sql = self.dialect.drop_unique_key_sql(uk_name, table)?;
        self.statements.push(Statement::new(sql));
        Ok(())
    }

    /// Inserts one row.
    pub fn insert(&mut self, table: &str, columns: &[&str], values: &[SqlValue]) -> Result<()> {
        let statement = self.dialect.insert_statement(table, columns, values)?;
        self.statements.push(statement);
        Ok(())
    }

    /// Updates the rows matching `filter`, or every row when it is `None`.
    pub fn update(
        &mut self,
        table: &str,
        columns: &[&str],
        values: &[SqlValue],
        filter: Option<&Filter>,
    ) -> Result<()> {
        let statement = self.dialect.update_statement(table, columns, values, filter)?;
        self.statements.push(statement);
        Ok(())
    }

    /// Deletes the rows matching `filter`, or every row when it is `None`.
    pub fn delete(&mut self, table: &str, filter: Option<&Filter>) -> Result<()> {
        let statement = self.dialect.delete_statement(table, filter)?;
        self.statements.push(statement);
        Ok(())
    }

    /// Records raw SQL. `values` bind to the dialect's parameter names in
    /// order, so the text refers to them as `parameter_name(0)`, `(1)`, ...
    pub fn execute_sql(&mut self, sql: impl Into<String>, values: &[SqlValue]) {
        let parameters = self.dialect.convert_to_named_parameters(0, values);
        self.statements
            .push(Statement::with_parameters(sql, parameters));
    }
}
