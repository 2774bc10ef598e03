//! Explicit registry of migrations and seeds.
//!
//! Migrations are registered as factories keyed by a positive version;
//! seeds are keyed by name. Nothing is discovered at runtime.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{MigrateError, Result};
use crate::migration::{Migration, Seed};

type MigrationFactory = Box<dyn Fn() -> Box<dyn Migration> + Send + Sync>;
type SeedFactory = Box<dyn Fn() -> Box<dyn Seed> + Send + Sync>;

/// A migration registered under a version.
pub struct RegisteredMigration {
    /// Version, unique within the registry.
    pub version: i64,
    /// Human readable name.
    pub name: String,
    factory: MigrationFactory,
}

impl RegisteredMigration {
    /// Creates a fresh instance of the migration.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn Migration> {
        (self.factory)()
    }

    /// Returns the full migration identifier.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}/{}", self.version, self.name)
    }
}

impl fmt::Debug for RegisteredMigration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredMigration")
            .field("version", &self.version)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered set of migrations plus named seeds.
#[derive(Default)]
pub struct MigrationRegistry {
    migrations: BTreeMap<i64, RegisteredMigration>,
    seeds: BTreeMap<String, SeedFactory>,
}

impl fmt::Debug for MigrationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationRegistry")
            .field("migrations", &self.migrations)
            .field("seeds", &self.seeds.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MigrationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a migration factory under `version`.
    pub fn migration<M, F>(&mut self, version: i64, name: impl Into<String>, factory: F) -> Result<&mut Self>
    where
        M: Migration + 'static,
        F: Fn() -> M + Send + Sync + 'static,
    {
        if version <= 0 {
            return Err(MigrateError::InvalidState(format!(
                "Migration version must be positive, got {version}"
            )));
        }
        if self.migrations.contains_key(&version) {
            return Err(MigrateError::DuplicateVersion(version));
        }
        self.migrations.insert(
            version,
            RegisteredMigration {
                version,
                name: name.into(),
                factory: Box::new(move || Box::new(factory()) as Box<dyn Migration>),
            },
        );
        Ok(self)
    }

    /// Registers a seed factory under `name`, replacing any earlier one.
    pub fn seed<S, F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        S: Seed + 'static,
        F: Fn() -> S + Send + Sync + 'static,
    {
        self.seeds
            .insert(name.into(), Box::new(move || Box::new(factory()) as Box<dyn Seed>));
        self
    }

    /// Migrations in ascending version order.
    pub fn migrations(&self) -> impl DoubleEndedIterator<Item = &RegisteredMigration> {
        self.migrations.values()
    }

    /// Looks up a migration by version.
    pub fn get(&self, version: i64) -> Result<&RegisteredMigration> {
        self.migrations
            .get(&version)
            .ok_or(MigrateError::MigrationNotFound(version))
    }

    /// Highest registered version, or 0 when empty.
    #[must_use]
    pub fn latest_version(&self) -> i64 {
        self.migrations.keys().next_back().copied().unwrap_or(0)
    }

    /// Creates a fresh instance of the seed called `name`.
    pub fn instantiate_seed(&self, name: &str) -> Result<Box<dyn Seed>> {
        self.seeds
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| MigrateError::SeedNotFound(name.to_string()))
    }

    /// Registered seed names in order.
    pub fn seed_names(&self) -> impl Iterator<Item = &str> {
        self.seeds.keys().map(String::as_str)
    }

    /// Number of registered migrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    /// Returns true when no migration is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }
}
