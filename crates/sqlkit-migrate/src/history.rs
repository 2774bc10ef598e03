//! Applied-version tracking.
//!
//! This module manages the `sqlkit_schema_version` table. One row is kept
//! per applied migration and group; the table is created through the
//! client's dialect so it works on every supported database.

use chrono::Utc;
use sqlkit_core::{Column, Filter, SqlValue, Statement, Table};

use crate::client::DataClient;
use crate::error::Result;

/// Name of the version table.
pub const VERSION_TABLE: &str = "sqlkit_schema_version";

/// Group used when none is configured.
pub const DEFAULT_GROUP: &str = "default";

/// Schema of the version table.
#[must_use]
pub fn version_table() -> Table {
    Table::new(VERSION_TABLE)
        .column(Column::int64("version").not_null())
        .column(Column::string("migration_group", 100).not_null())
        .column(Column::datetime("applied_at").not_null())
}

/// Reads and writes the applied versions of one migration group.
pub struct VersionHistory<'a, C: DataClient> {
    client: &'a C,
    group: String,
}

impl<'a, C: DataClient> VersionHistory<'a, C> {
    /// Creates a history for `group`.
    pub fn new(client: &'a C, group: impl Into<String>) -> Self {
        Self {
            client,
            group: group.into(),
        }
    }

    /// The migration group.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns whether the version table exists.
    pub async fn exists(&self) -> Result<bool> {
        let sql = self.client.dialect().table_exists_sql(VERSION_TABLE);
        let count = self.client.query_scalar_i64(&Statement::new(sql)).await?;
        Ok(count.unwrap_or(0) > 0)
    }

    /// Creates the version table if missing. Returns true when it was
    /// created.
    pub async fn ensure_table(&self) -> Result<bool> {
        if self.exists().await? {
            return Ok(false);
        }
        for sql in self.client.dialect().create_table_sqls(&version_table())? {
            self.client.execute(&Statement::new(sql)).await?;
        }
        self.client.commit().await?;
        Ok(true)
    }

    /// Applied versions of this group, ascending.
    pub async fn applied_versions(&self) -> Result<Vec<i64>> {
        let statement = self.client.dialect().select_statement(
            VERSION_TABLE,
            &["version"],
            Some(&self.group_filter()),
        )?;
        let mut versions = self.client.query_rows_i64(&statement).await?;
        versions.sort_unstable();
        versions.dedup();
        Ok(versions)
    }

    /// Highest applied version, or 0 when nothing is applied.
    pub async fn current_version(&self) -> Result<i64> {
        Ok(self
            .applied_versions()
            .await?
            .last()
            .copied()
            .unwrap_or(0))
    }

    /// Statement recording `version` as applied now.
    pub fn record_applied(&self, version: i64) -> Result<Statement> {
        Ok(self.client.dialect().insert_statement(
            VERSION_TABLE,
            &["version", "migration_group", "applied_at"],
            &[
                SqlValue::Int64(version),
                SqlValue::Text(self.group.clone()),
                SqlValue::DateTime(Utc::now().naive_utc()),
            ],
        )?)
    }

    /// Statement removing `version` from the group.
    pub fn record_removed(&self, version: i64) -> Result<Statement> {
        let filter = Filter::eq("version", version).and(self.group_filter());
        Ok(self
            .client
            .dialect()
            .delete_statement(VERSION_TABLE, Some(&filter))?)
    }

    fn group_filter(&self) -> Filter {
        Filter::eq("migration_group", self.group.as_str())
    }
}
