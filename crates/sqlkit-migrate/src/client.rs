//! Database access used by the runners.
//!
//! A [`DataClient`] executes generated [`Statement`]s inside one open
//! transaction at a time. The first statement after a commit or rollback
//! opens the next transaction.

use std::collections::HashMap;
use std::str::FromStr;

use sqlkit_core::{Dialect, SqlValue, SqliteDialect, Statement};
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Arguments, Sqlite, Transaction};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Result;

/// Executes statements produced by a dialect.
#[allow(async_fn_in_trait)]
pub trait DataClient {
    /// The dialect statements must be generated with.
    fn dialect(&self) -> &dyn Dialect;

    /// Executes a statement, returning the number of affected rows.
    async fn execute(&self, statement: &Statement) -> Result<u64>;

    /// Runs a query and returns the first column of the first row.
    async fn query_scalar_i64(&self, statement: &Statement) -> Result<Option<i64>>;

    /// Runs a query and returns the first column of every row.
    async fn query_rows_i64(&self, statement: &Statement) -> Result<Vec<i64>>;

    /// Commits the open transaction, if any.
    async fn commit(&self) -> Result<()>;

    /// Rolls back the open transaction, if any.
    async fn rollback(&self) -> Result<()>;
}

/// [`DataClient`] backed by an sqlx SQLite pool.
pub struct SqliteDataClient {
    pool: SqlitePool,
    dialect: SqliteDialect,
    transaction: Mutex<Option<Transaction<'static, Sqlite>>>,
}

impl SqliteDataClient {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            dialect: SqliteDialect::new(),
            transaction: Mutex::new(None),
        }
    }

    /// Opens a single-connection pool for `url`, creating the file if needed.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl DataClient for SqliteDataClient {
    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    async fn execute(&self, statement: &Statement) -> Result<u64> {
        let (sql, values) = positional(statement);
        debug!(sql = %sql, parameters = values.len(), "Executing SQL");

        let mut guard = self.transaction.lock().await;
        let tx = match guard.take() {
            Some(tx) => tx,
            None => self.pool.begin().await?,
        };
        let tx = guard.insert(tx);
        let result = sqlx::query_with(&sql, arguments(&values)?)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn query_scalar_i64(&self, statement: &Statement) -> Result<Option<i64>> {
        let (sql, values) = positional(statement);
        debug!(sql = %sql, "Querying scalar");

        let mut guard = self.transaction.lock().await;
        let tx = match guard.take() {
            Some(tx) => tx,
            None => self.pool.begin().await?,
        };
        let tx = guard.insert(tx);
        let value = sqlx::query_scalar_with::<Sqlite, i64, _>(&sql, arguments(&values)?)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(value)
    }

    async fn query_rows_i64(&self, statement: &Statement) -> Result<Vec<i64>> {
        let (sql, values) = positional(statement);
        debug!(sql = %sql, "Querying rows");

        let mut guard = self.transaction.lock().await;
        let tx = match guard.take() {
            Some(tx) => tx,
            None => self.pool.begin().await?,
        };
        let tx = guard.insert(tx);
        let rows = sqlx::query_scalar_with::<Sqlite, i64, _>(&sql, arguments(&values)?)
            .fetch_all(&mut **tx)
            .await?;
        Ok(rows)
    }

    async fn commit(&self) -> Result<()> {
        if let Some(tx) = self.transaction.lock().await.take() {
            tx.commit().await?;
        }
        Ok(())
    }

    async fn rollback(&self) -> Result<()> {
        if let Some(tx) = self.transaction.lock().await.take() {
            tx.rollback().await?;
        }
        Ok(())
    }
}

/// Rewrites named placeholders to SQLite's numbered `?N` form.
///
/// Numbers follow first appearance in the text, so the returned values are
/// exactly the ones the text references. Quoted literals are left alone.
fn positional(statement: &Statement) -> (String, Vec<&SqlValue>) {
    let by_name: HashMap<&str, &SqlValue> = statement
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), &p.value))
        .collect();
    let mut numbers: HashMap<&str, usize> = HashMap::new();
    let mut values = Vec::new();
    let mut sql = String::with_capacity(statement.sql.len());

    let text = statement.sql.as_str();
    let mut in_literal = false;
    let mut chars = text.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c == '\'' {
            in_literal = !in_literal;
        }
        if in_literal || !matches!(c, '@' | ':' | '$') {
            sql.push(c);
            continue;
        }

        let mut end = start + c.len_utf8();
        while let Some(&(i, next)) = chars.peek() {
            if next.is_ascii_alphanumeric() || next == '_' {
                end = i + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let token = &text[start..end];
        match by_name.get(token) {
            Some(value) => {
                let number = *numbers.entry(token).or_insert_with(|| {
                    values.push(*value);
                    values.len()
                });
                sql.push('?');
                sql.push_str(&number.to_string());
            }
            None => sql.push_str(token),
        }
    }
    (sql, values)
}

fn arguments<'q>(values: &[&SqlValue]) -> Result<SqliteArguments<'q>> {
    let mut args = SqliteArguments::default();
    for value in values {
        let added = match value {
            SqlValue::Null => args.add(None::<i64>),
            SqlValue::Bool(b) => args.add(*b),
            SqlValue::Int16(n) => args.add(*n),
            SqlValue::Int32(n) => args.add(*n),
            SqlValue::Int64(n) => args.add(*n),
            SqlValue::Single(f) => args.add(*f),
            SqlValue::Double(f) => args.add(*f),
            // SQLite has no decimal or uuid storage class.
            SqlValue::Decimal(d) => args.add(d.to_string()),
            SqlValue::Guid(g) => args.add(g.to_string()),
            SqlValue::DateTime(dt) => args.add(*dt),
            SqlValue::Date(d) => args.add(*d),
            SqlValue::Time(t) => args.add(*t),
            SqlValue::Text(s) => args.add(s.clone()),
            SqlValue::Blob(b) => args.add(b.clone()),
        };
        added.map_err(sqlx::Error::Encode)?;
    }
    Ok(args)
}
