//! Migration runner.
//!
//! This module applies and reverts registered migrations against a
//! [`DataClient`], tracking progress in the version table. Each migration
//! runs in its own transaction together with its version row.

use sqlkit_core::Statement;
use tracing::{debug, error, info, warn};

use crate::client::DataClient;
use crate::error::{MigrateError, Result};
use crate::history::{VersionHistory, DEFAULT_GROUP};
use crate::migration::MigrationContext;
use crate::registry::{MigrationRegistry, RegisteredMigration};

/// Which way a migration is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Apply with `up`.
    Up,
    /// Revert with `down`.
    Down,
}

/// Outcome of [`MigrationRunner::run`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Version before the run.
    pub from: i64,
    /// Version after the run.
    pub to: i64,
    /// Versions applied or reverted, in execution order.
    pub versions: Vec<i64>,
    /// Every statement executed (or printed in dry-run mode).
    pub statements: Vec<Statement>,
}

/// Applied state of one registered migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Migration version.
    pub version: i64,
    /// Migration name.
    pub name: String,
    /// Whether the version is recorded for the group.
    pub applied: bool,
}

/// Runs migrations from a registry against a database.
pub struct MigrationRunner<'a, C: DataClient> {
    client: &'a C,
    registry: &'a MigrationRegistry,
    group: String,
    dry_run: bool,
}

impl<'a, C: DataClient> MigrationRunner<'a, C> {
    /// Creates a runner for the default group.
    pub fn new(client: &'a C, registry: &'a MigrationRegistry) -> Self {
        Self {
            client,
            registry,
            group: DEFAULT_GROUP.to_string(),
            dry_run: false,
        }
    }

    /// Sets the migration group versions are recorded under.
    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Enables dry-run mode (SQL is printed but not executed).
    #[must_use]
    pub const fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    fn history(&self) -> VersionHistory<'a, C> {
        VersionHistory::new(self.client, self.group.clone())
    }

    /// Applied versions, without creating the version table.
    async fn applied_versions(&self) -> Result<Vec<i64>> {
        let history = self.history();
        let versions = if history.exists().await? {
            history.applied_versions().await?
        } else {
            Vec::new()
        };
        self.client.commit().await?;
        Ok(versions)
    }

    /// Highest applied version of the group, or 0.
    pub async fn current_version(&self) -> Result<i64> {
        Ok(self.applied_versions().await?.last().copied().unwrap_or(0))
    }

    /// Applied state of every registered migration.
    pub async fn status(&self) -> Result<Vec<MigrationStatus>> {
        let applied = self.applied_versions().await?;
        Ok(self
            .registry
            .migrations()
            .map(|m| MigrationStatus {
                version: m.version,
                name: m.name.clone(),
                applied: applied.contains(&m.version),
            })
            .collect())
    }

    /// Migrates to `target`, or to the latest registered version.
    ///
    /// Pending migrations up to the target run ascending; applied versions
    /// above it are reverted descending. The first failure rolls back the
    /// failing migration and stops the run.
    pub async fn run(&self, target: Option<i64>) -> Result<RunReport> {
        let history = self.history();
        if !self.dry_run {
            history.ensure_table().await?;
        }
        let applied = self.applied_versions().await?;
        let current = applied.last().copied().unwrap_or(0);

        let target = target.unwrap_or_else(|| self.registry.latest_version());
        if target < 0 {
            return Err(MigrateError::InvalidState(format!(
                "Target version must not be negative, got {target}"
            )));
        }
        if target != 0 {
            self.registry.get(target)?;
        }

        let mut report = RunReport {
            from: current,
            to: current,
            ..RunReport::default()
        };

        if self.dry_run {
            info!("Dry run mode - SQL will be printed but not executed.");
        }

        if target >= current {
            let pending: Vec<&RegisteredMigration> = self
                .registry
                .migrations()
                .filter(|m| m.version <= target && !applied.contains(&m.version))
                .collect();
            info!(
                group = %self.group,
                from = current,
                to = target,
                pending = pending.len(),
                "Migrating up"
            );
            for migration in pending {
                self.apply(migration, Direction::Up, &history, &mut report)
                    .await?;
            }
        } else {
            info!(group = %self.group, from = current, to = target, "Migrating down");
            for version in applied.iter().rev().filter(|v| **v > target) {
                let migration = self.registry.get(*version)?;
                self.apply(migration, Direction::Down, &history, &mut report)
                    .await?;
            }
        }

        report.to = target;
        info!(group = %self.group, version = report.to, "Migration complete");
        Ok(report)
    }

    async fn apply(
        &self,
        migration: &RegisteredMigration,
        direction: Direction,
        history: &VersionHistory<'a, C>,
        report: &mut RunReport,
    ) -> Result<()> {
        info!(
            group = %self.group,
            version = migration.version,
            name = %migration.name,
            direction = ?direction,
            "Applying migration"
        );

        let instance = migration.instantiate();
        let mut ctx = MigrationContext::new(self.client.dialect(), migration.name.clone());
        let mut statements = match direction {
            Direction::Up => {
                instance.up(&mut ctx)?;
                let mut statements = ctx.into_statements();
                statements.push(history.record_applied(migration.version)?);
                statements
            }
            Direction::Down => {
                instance.down(&mut ctx)?;
                let mut statements = ctx.into_statements();
                statements.push(history.record_removed(migration.version)?);
                statements
            }
        };

        if self.dry_run {
            for statement in &statements {
                println!("{};", statement.sql);
            }
        } else {
            execute_in_transaction(self.client, &statements).await?;
        }

        report.versions.push(migration.version);
        report.statements.append(&mut statements);
        Ok(())
    }
}

/// Executes `statements` and commits, or rolls back on the first failure.
pub(crate) async fn execute_in_transaction<C: DataClient>(
    client: &C,
    statements: &[Statement],
) -> Result<()> {
    for statement in statements {
        debug!(sql = %statement.sql, "Executing SQL");
        if let Err(err) = client.execute(statement).await {
            error!(sql = %statement.sql, error = %err, "Statement failed, rolling back");
            if let Err(rollback) = client.rollback().await {
                warn!(error = %rollback, "Rollback failed");
            }
            return Err(err);
        }
    }
    client.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SqliteDataClient;
    use crate::migration::Migration;
    use pretty_assertions::assert_eq;
    use sqlkit_core::{Column, Table};

    struct CreateAnimal;

    impl Migration for CreateAnimal {
        fn up(&self, ctx: &mut MigrationContext<'_>) -> Result<()> {
            ctx.create_table(
                &Table::new("Animal")
                    .column(Column::int32("id").primary_key().auto_increment())
                    .column(Column::string("Description", 50).not_null()),
            )
        }

        fn down(&self, ctx: &mut MigrationContext<'_>) -> Result<()> {
            ctx.drop_table("Animal")
        }
    }

    struct Broken;

    impl Migration for Broken {
        fn up(&self, ctx: &mut MigrationContext<'_>) -> Result<()> {
            ctx.execute_sql("create table Food ( id INTEGER NULL )", &[]);
            ctx.execute_sql("insert into Missing ( id ) values ( 1 )", &[]);
            Ok(())
        }
    }

    async fn create_test_client() -> SqliteDataClient {
        SqliteDataClient::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory SQLite client")
    }

    async fn table_count(client: &SqliteDataClient, table: &str) -> i64 {
        let sql = client.dialect().table_exists_sql(table);
        let count = client
            .query_scalar_i64(&Statement::new(sql))
            .await
            .unwrap()
            .unwrap_or(0);
        client.commit().await.unwrap();
        count
    }

    #[tokio::test]
    async fn test_run_applies_and_records() {
        let client = create_test_client().await;
        let mut registry = MigrationRegistry::new();
        registry.migration(1, "create_animal", || CreateAnimal).unwrap();

        let report = MigrationRunner::new(&client, &registry).run(None).await.unwrap();
        assert_eq!((report.from, report.to), (0, 1));
        assert_eq!(report.versions, vec![1]);
        assert_eq!(table_count(&client, "Animal").await, 1);

        // Nothing left to do
        let report = MigrationRunner::new(&client, &registry).run(None).await.unwrap();
        assert!(report.versions.is_empty());
    }

    #[tokio::test]
    async fn test_failure_rolls_back_and_stops() {
        let client = create_test_client().await;
        let mut registry = MigrationRegistry::new();
        registry
            .migration(1, "create_animal", || CreateAnimal)
            .unwrap()
            .migration(2, "broken", || Broken)
            .unwrap();

        let runner = MigrationRunner::new(&client, &registry);
        let err = runner.run(None).await.unwrap_err();
        assert!(matches!(err, MigrateError::Database(_)));

        assert_eq!(runner.current_version().await.unwrap(), 1);
        assert_eq!(table_count(&client, "Animal").await, 1);
        assert_eq!(table_count(&client, "Food").await, 0);
    }

    #[tokio::test]
    async fn test_dry_run_executes_nothing() {
        let client = create_test_client().await;
        let mut registry = MigrationRegistry::new();
        registry.migration(1, "create_animal", || CreateAnimal).unwrap();

        let report = MigrationRunner::new(&client, &registry)
            .dry_run(true)
            .run(None)
            .await
            .unwrap();
        assert_eq!(report.versions, vec![1]);
        assert_eq!(report.statements.len(), 2);
        assert_eq!(table_count(&client, "Animal").await, 0);
        assert_eq!(table_count(&client, crate::history::VERSION_TABLE).await, 0);
    }

    #[tokio::test]
    async fn test_unknown_target_fails() {
        let client = create_test_client().await;
        let registry = MigrationRegistry::new();
        let err = MigrationRunner::new(&client, &registry)
            .run(Some(7))
            .await
            .unwrap_err();
        assert!(matches!(err, MigrateError::MigrationNotFound(7)));
    }
}
