//! Versioned migrations and seeds for Rust.
//!
//! `sqlkit-migrate` runs schema changes written against the portable
//! `sqlkit-core` model:
//! - Migrations are plain structs registered under a version
//! - Each migration records its statements through the dialect, so the same
//!   migration produces the right SQL for every supported database
//! - Applied versions are tracked per group in `sqlkit_schema_version`
//!
//! # Example
//!
//! ```rust,no_run
//! use sqlkit_migrate::prelude::*;
//!
//! struct CreateAnimal;
//!
//! impl Migration for CreateAnimal {
//!     fn up(&self, ctx: &mut MigrationContext<'_>) -> Result<()> {
//!         ctx.create_table(
//!             &Table::new("Animal")
//!                 .column(Column::int32("id").primary_key().auto_increment())
//!                 .column(Column::string("Description", 50).not_null()),
//!         )
//!     }
//!
//!     fn down(&self, ctx: &mut MigrationContext<'_>) -> Result<()> {
//!         ctx.drop_table("Animal")
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let mut registry = MigrationRegistry::new();
//! registry.migration(1, "create_animal", || CreateAnimal)?;
//!
//! let client = SqliteDataClient::connect("sqlite:zoo.db").await?;
//! MigrationRunner::new(&client, &registry).run(None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Print DDL for a JSON schema
//! sqlkit-migrate --dialect postgresql ddl --schema schema.json
//!
//! # Apply pending migrations
//! sqlkit-migrate migrate
//!
//! # Revert everything
//! sqlkit-migrate migrate --to 0
//! ```

pub mod cli;
pub mod client;
pub mod error;
pub mod history;
pub mod migration;
pub mod registry;
pub mod runner;
pub mod seed;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::client::{DataClient, SqliteDataClient};
    pub use crate::error::{MigrateError, Result};
    pub use crate::history::{VersionHistory, DEFAULT_GROUP, VERSION_TABLE};
    pub use crate::migration::{Migration, MigrationContext, Seed};
    pub use crate::registry::{MigrationRegistry, RegisteredMigration};
    pub use crate::runner::{Direction, MigrationRunner, MigrationStatus, RunReport};
    pub use crate::seed::SeedRunner;
    pub use sqlkit_core::{
        values, Column, DbType, Dialect, DialectKind, Filter, OnDelete, SqlValue, Statement, Table,
    };
}
