//! Shared helpers for the integration tests.

#![allow(dead_code)]

use sqlkit_core::{Column, Dialect, DialectKind, Filter, Table};

/// Every dialect as a trait object, in a fixed order.
pub fn dialects() -> impl Iterator<Item = &'static dyn Dialect> {
    DialectKind::ALL.into_iter().map(DialectKind::dialect)
}

/// The table used throughout the scenario tests.
pub fn animal_table() -> Table {
    Table::new("Animal")
        .column(Column::int32("id").primary_key().auto_increment())
        .column(Column::string("Description", 50).not_null())
        .column(Column::boolean("Wild").default_value(false))
}

/// Left-deep AND chain of `column = index` comparisons.
pub fn and_chain(columns: &[String]) -> Option<Filter> {
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| Filter::eq(c, i as i64))
        .reduce(Filter::and)
}

/// Placeholders in text order, found by scanning for the dialect's
/// parameter prefix followed by `par`.
pub fn placeholders(dialect: &dyn Dialect, sql: &str) -> Vec<String> {
    let marker = format!("{}par", dialect.parameter_prefix());
    let mut found = Vec::new();
    let mut rest = sql;
    while let Some(pos) = rest.find(&marker) {
        let after = &rest[pos + marker.len()..];
        let digits: String = after.chars().take_while(char::is_ascii_digit).collect();
        found.push(format!("{marker}{digits}"));
        rest = &after[digits.len()..];
    }
    found
}
