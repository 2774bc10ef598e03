//! Seed runner.

use sqlkit_core::Statement;
use tracing::info;

use crate::client::DataClient;
use crate::error::Result;
use crate::migration::MigrationContext;
use crate::registry::MigrationRegistry;
use crate::runner::execute_in_transaction;

/// Runs named seeds. Seeds are not versioned and may run any number of
/// times.
pub struct SeedRunner<'a, C: DataClient> {
    client: &'a C,
    registry: &'a MigrationRegistry,
    dry_run: bool,
}

impl<'a, C: DataClient> SeedRunner<'a, C> {
    /// Creates a new seed runner.
    pub const fn new(client: &'a C, registry: &'a MigrationRegistry) -> Self {
        Self {
            client,
            registry,
            dry_run: false,
        }
    }

    /// Enables dry-run mode (SQL is printed but not executed).
    #[must_use]
    pub const fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Runs the seed called `name` with an optional parameter and commits.
    pub async fn run(&self, name: &str, param: Option<&str>) -> Result<Vec<Statement>> {
        let seed = self.registry.instantiate_seed(name)?;
        info!(seed = %name, param = ?param, "Applying seed");

        let mut ctx = MigrationContext::new(self.client.dialect(), name);
        seed.up(&mut ctx, param)?;
        let statements = ctx.into_statements();

        if self.dry_run {
            for statement in &statements {
                println!("{};", statement.sql);
            }
        } else {
            execute_in_transaction(self.client, &statements).await?;
        }

        info!(seed = %name, statements = statements.len(), "Seed applied successfully");
        Ok(statements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SqliteDataClient;
    use crate::error::MigrateError;
    use crate::migration::Seed;
    use sqlkit_core::values;

    struct Animals;

    impl Seed for Animals {
        fn up(&self, ctx: &mut MigrationContext<'_>, param: Option<&str>) -> Result<()> {
            let name = param.unwrap_or("dog");
            ctx.insert("Animal", &["Description"], &values![name])
        }
    }

    #[tokio::test]
    async fn test_seed_inserts_with_param() {
        let client = SqliteDataClient::connect("sqlite::memory:").await.unwrap();
        client
            .execute(&Statement::new("create table Animal ( Description TEXT NOT NULL )"))
            .await
            .unwrap();
        client.commit().await.unwrap();

        let mut registry = MigrationRegistry::new();
        registry.seed("animals", || Animals);
        let runner = SeedRunner::new(&client, &registry);
        runner.run("animals", None).await.unwrap();
        runner.run("animals", Some("cat")).await.unwrap();

        let count = client
            .query_scalar_i64(&Statement::new(
                "select count(*) from Animal where Description in ('dog', 'cat')",
            ))
            .await
            .unwrap();
        assert_eq!(count, Some(2));
    }

    #[tokio::test]
    async fn test_missing_seed() {
        let client = SqliteDataClient::connect("sqlite::memory:").await.unwrap();
        let registry = MigrationRegistry::new();
        let err = SeedRunner::new(&client, &registry)
            .run("plants", None)
            .await
            .unwrap_err();
        assert!(matches!(err, MigrateError::SeedNotFound(name) if name == "plants"));
    }
}
