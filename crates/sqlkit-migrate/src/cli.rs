//! Command-line interface.
//!
//! Applications embed their migrations by building a [`MigrationRegistry`]
//! and handing it to [`run`] together with the parsed [`Cli`].

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use sqlkit_core::{Dialect, DialectKind, Table};
use tracing::info;

use crate::client::SqliteDataClient;
use crate::error::{MigrateError, Result};
use crate::history::{VersionHistory, DEFAULT_GROUP};
use crate::registry::MigrationRegistry;
use crate::runner::MigrationRunner;
use crate::seed::SeedRunner;

/// Versioned migrations and seeds for sqlkit dialects.
#[derive(Parser, Debug)]
#[command(name = "sqlkit-migrate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database URL (SQLite path or connection string).
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:db.sqlite3")]
    pub database: String,

    /// SQL dialect (inferred from the database URL if not specified).
    #[arg(long, env = "SQLKIT_DIALECT")]
    pub dialect: Option<DialectKind>,

    /// Migration group versions are recorded under.
    #[arg(short, long, default_value = DEFAULT_GROUP)]
    pub group: String,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the DDL for a JSON schema file without connecting.
    Ddl {
        /// JSON file holding one table or an array of tables.
        #[arg(short, long)]
        schema: PathBuf,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Initialize the migrations system (create the version table).
    Init,

    /// Show migration status.
    Status,

    /// Apply or revert migrations.
    Migrate {
        /// Target version (latest if not specified, 0 reverts everything).
        #[arg(long)]
        to: Option<i64>,

        /// Show SQL without executing (dry run).
        #[arg(long)]
        dry_run: bool,
    },

    /// Run a named seed.
    Seed {
        /// Seed name.
        name: String,

        /// Parameter passed to the seed.
        #[arg(short, long)]
        param: Option<String>,

        /// Show SQL without executing (dry run).
        #[arg(long)]
        dry_run: bool,
    },
}

/// Output format of the `ddl` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Statements terminated by `;`.
    Text,
    /// JSON array of `{ table, statements }`.
    Json,
}

impl Cli {
    /// The explicit dialect, or the one implied by the database URL.
    pub fn dialect_kind(&self) -> Result<DialectKind> {
        self.dialect
            .or_else(|| DialectKind::from_url(&self.database))
            .ok_or_else(|| {
                MigrateError::InvalidState(format!(
                    "Cannot infer a dialect from '{}', pass --dialect",
                    self.database
                ))
            })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaFile {
    Many(Vec<Table>),
    One(Table),
}

#[derive(Debug, Serialize)]
struct TableDdl<'a> {
    table: &'a str,
    statements: Vec<String>,
}

/// Reads a schema file holding one table or an array of tables.
pub fn load_schema(path: &Path) -> Result<Vec<Table>> {
    let content = std::fs::read_to_string(path)?;
    let tables = match serde_json::from_str::<SchemaFile>(&content)? {
        SchemaFile::Many(tables) => tables,
        SchemaFile::One(table) => vec![table],
    };
    Ok(tables)
}

/// Renders the CREATE TABLE statements for `tables`.
pub fn render_ddl(dialect: &dyn Dialect, tables: &[Table], format: OutputFormat) -> Result<String> {
    let ddl = tables
        .iter()
        .map(|table| {
            Ok(TableDdl {
                table: &table.name,
                statements: dialect.create_table_sqls(table)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ddl)?),
        OutputFormat::Text => {
            let mut out = String::new();
            for table in &ddl {
                out.push_str(&format!("-- {}\n", table.table));
                for sql in &table.statements {
                    out.push_str(sql);
                    out.push_str(";\n");
                }
            }
            Ok(out)
        }
    }
}

/// Executes a parsed command line against `registry`.
pub async fn run(cli: Cli, registry: &MigrationRegistry) -> anyhow::Result<()> {
    let kind = cli.dialect_kind()?;

    if let Commands::Ddl { schema, format } = &cli.command {
        let tables = load_schema(schema)?;
        print!("{}", render_ddl(kind.dialect(), &tables, *format)?);
        return Ok(());
    }

    if kind != DialectKind::Sqlite {
        anyhow::bail!("Only SQLite databases can be migrated by this binary, got {kind}");
    }
    let client = SqliteDataClient::connect(&cli.database).await?;

    match cli.command {
        Commands::Ddl { .. } => {}

        Commands::Init => {
            info!("Initializing migrations system...");
            let created = VersionHistory::new(&client, cli.group.as_str())
                .ensure_table()
                .await?;
            if created {
                info!("Version table created successfully.");
            } else {
                info!("Version table already exists.");
            }
        }

        Commands::Status => {
            let runner = MigrationRunner::new(&client, registry).group(cli.group.as_str());
            let statuses = runner.status().await?;

            if statuses.is_empty() {
                info!("No migrations are registered.");
            } else {
                println!("\nMigrations ({}):", cli.group);
                println!("{:-<60}", "");
                for status in &statuses {
                    let mark = if status.applied { "X" } else { " " };
                    println!(" [{mark}] {:>6} {}", status.version, status.name);
                }
                println!();
            }
            let version = runner.current_version().await?;
            info!(version, "Current version");
        }

        Commands::Migrate { to, dry_run } => {
            let report = MigrationRunner::new(&client, registry)
                .group(cli.group.as_str())
                .dry_run(dry_run)
                .run(to)
                .await?;
            info!(
                from = report.from,
                to = report.to,
                migrations = report.versions.len(),
                "Done"
            );
        }

        Commands::Seed {
            name,
            param,
            dry_run,
        } => {
            SeedRunner::new(&client, registry)
                .dry_run(dry_run)
                .run(&name, param.as_deref())
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sqlkit_core::{Column, SqliteDialect};
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sqlkit-migrate").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_migrate() {
        let cli = parse(&["--database", "sqlite::memory:", "migrate", "--to", "3", "--dry-run"]);
        assert!(matches!(
            cli.command,
            Commands::Migrate {
                to: Some(3),
                dry_run: true
            }
        ));
        assert_eq!(cli.group, DEFAULT_GROUP);
        assert_eq!(cli.dialect_kind().unwrap(), DialectKind::Sqlite);
    }

    #[test]
    fn test_explicit_dialect_wins() {
        let cli = parse(&[
            "--database",
            "sqlite::memory:",
            "--dialect",
            "mssql",
            "ddl",
            "--schema",
            "schema.json",
        ]);
        assert_eq!(cli.dialect_kind().unwrap(), DialectKind::SqlServer);

        let cli = parse(&["--database", "odbc:thing", "status"]);
        assert!(cli.dialect_kind().is_err());
    }

    #[test]
    fn test_render_ddl_text() {
        let tables = vec![Table::new("Animal")
            .column(Column::int32("id").primary_key().auto_increment())
            .column(Column::string("Description", 0))];
        let out = render_ddl(&SqliteDialect, &tables, OutputFormat::Text).unwrap();
        assert_eq!(
            out,
            "-- Animal\n\
             create table Animal ( id INTEGER PRIMARY KEY AUTOINCREMENT, Description VARCHAR(255) NULL );\n"
        );
    }

    #[test]
    fn test_render_ddl_json() {
        let tables = vec![Table::new("Log").column(Column::string("Message", 1000))];
        let out = render_ddl(DialectKind::PostgreSql.dialect(), &tables, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["table"], "Log");
        assert_eq!(
            value[0]["statements"][0],
            "create table Log ( Message TEXT NULL )"
        );
    }

    #[test]
    fn test_load_schema_single_and_many() {
        let dir = tempfile::tempdir().unwrap();

        let one = dir.path().join("one.json");
        std::fs::File::create(&one)
            .unwrap()
            .write_all(br#"{ "name": "A", "columns": [ { "name": "id", "db_type": "Int32" } ] }"#)
            .unwrap();
        assert_eq!(load_schema(&one).unwrap().len(), 1);

        let many = dir.path().join("many.json");
        std::fs::write(
            &many,
            r#"[ { "name": "A", "columns": [] }, { "name": "B", "columns": [] } ]"#,
        )
        .unwrap();
        let tables = load_schema(&many).unwrap();
        assert_eq!(tables.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), vec!["A", "B"]);

        assert!(matches!(
            load_schema(&dir.path().join("missing.json")),
            Err(MigrateError::Io(_))
        ));
    }
}
