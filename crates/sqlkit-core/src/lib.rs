//! # sqlkit-core
//!
//! Vendor-neutral schema description and dialect-aware SQL generation.
//!
//! This crate provides:
//! - A portable schema model ([`Table`], [`Column`], [`DbType`])
//! - A [`Dialect`] trait with SQL Server, MySQL, PostgreSQL and SQLite
//!   implementations
//! - A filter expression tree compiled into parameterised where clauses
//!
//! ## Schema DDL
//!
//! ```rust
//! use sqlkit_core::{Column, Dialect, SqlServerDialect, Table};
//!
//! let table = Table::new("Animal")
//!     .column(Column::int32("id").primary_key().auto_increment())
//!     .column(Column::string("Description", 50));
//!
//! let sqls = SqlServerDialect.create_table_sqls(&table).unwrap();
//! assert_eq!(sqls.len(), 2);
//! assert_eq!(sqls[1], "alter table Animal add constraint pk_Animal primary key (id)");
//! ```
//!
//! ## Parameterised DML
//!
//! Values never appear in generated DML text. Each one is paired with the
//! generated placeholder name:
//!
//! ```rust
//! use sqlkit_core::{values, Dialect, DialectKind, Filter};
//!
//! let dialect = DialectKind::PostgreSql.dialect();
//! let stmt = dialect
//!     .update_statement(
//!         "Animal",
//!         &["Description"],
//!         &values!["'; drop table Animal; --"],
//!         Some(&Filter::eq("id", 3)),
//!     )
//!     .unwrap();
//!
//! assert_eq!(stmt.sql, "update Animal set Description = :par0 where id = :par1");
//! assert_eq!(stmt.parameters.len(), 2);
//! ```

pub mod dialect;
pub mod error;
pub mod filter;
pub mod format;
pub mod schema;
pub mod types;
pub mod value;

pub use dialect::{
    Dialect, DialectKind, MySqlDialect, PostgresDialect, SqlServerDialect, SqliteDialect,
    Statement,
};
pub use error::{DialectError, Result};
pub use filter::{CompareOperator, Filter, LogicOperator, WhereBuilder, WhereClause};
pub use schema::{Column, DbType, OnDelete, Table};
pub use value::{NamedParameter, SqlValue, ToSqlValue};
