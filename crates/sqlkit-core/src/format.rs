//! Literal rendering for column defaults.
//!
//! Literals are only ever produced for `default (...)` clauses in DDL.
//! Values supplied for inserts, updates and filters are bound as
//! parameters and never pass through here.

use crate::value::SqlValue;

/// Sortable ISO-8601 layout used for date/time defaults.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Renders `value` as a SQL literal.
///
/// `bool_literal` supplies the vendor's boolean spelling. Numbers use
/// `.` as the decimal point and no grouping. Text is single-quoted with
/// embedded quotes doubled.
#[must_use]
pub fn literal<F>(value: &SqlValue, bool_literal: F) -> String
where
    F: Fn(bool) -> &'static str,
{
    match value {
        SqlValue::Null => String::from("NULL"),
        SqlValue::Bool(b) => bool_literal(*b).to_string(),
        SqlValue::Int16(n) => n.to_string(),
        SqlValue::Int32(n) => n.to_string(),
        SqlValue::Int64(n) => n.to_string(),
        SqlValue::Single(f) => f.to_string(),
        SqlValue::Double(f) => f.to_string(),
        SqlValue::Decimal(d) => d.to_string(),
        SqlValue::DateTime(dt) => format!("'{}'", dt.format(DATETIME_FORMAT)),
        SqlValue::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
        SqlValue::Time(t) => format!("'{}'", t.format("%H:%M:%S")),
        SqlValue::Guid(g) => format!("'{g}'"),
        SqlValue::Text(s) => quote(s),
        SqlValue::Blob(b) => {
            let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
            format!("X'{hex}'")
        }
    }
}

/// Returns false for NaN and infinite floats, which no vendor accepts as a
/// literal.
#[must_use]
pub fn has_literal(value: &SqlValue) -> bool {
    match value {
        SqlValue::Single(f) => f.is_finite(),
        SqlValue::Double(f) => f.is_finite(),
        _ => true,
    }
}

/// Single-quotes `text`, doubling embedded quotes.
#[must_use]
pub fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// `true`/`false` spelling.
#[must_use]
pub const fn word_bool(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

/// `1`/`0` spelling for vendors without a boolean literal.
#[must_use]
pub const fn numeric_bool(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;

    fn render(value: &SqlValue) -> String {
        literal(value, word_bool)
    }

    #[test]
    fn test_literal_bool() {
        assert_eq!(render(&SqlValue::Bool(true)), "true");
        assert_eq!(literal(&SqlValue::Bool(false), numeric_bool), "0");
    }

    #[test]
    fn test_literal_numbers_are_invariant() {
        assert_eq!(render(&SqlValue::Int32(-100)), "-100");
        assert_eq!(render(&SqlValue::Int64(1_000_000)), "1000000");
        assert_eq!(render(&SqlValue::Double(1234.5)), "1234.5");
        assert_eq!(render(&SqlValue::Single(0.25)), "0.25");
        assert_eq!(render(&SqlValue::Decimal(Decimal::new(123_456, 2))), "1234.56");
    }

    #[test]
    fn test_literal_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let time = NaiveTime::from_hms_opt(13, 45, 0).unwrap();
        assert_eq!(
            render(&SqlValue::DateTime(date.and_time(time))),
            "'2024-01-31T13:45:00'"
        );
        assert_eq!(render(&SqlValue::Date(date)), "'2024-01-31'");
        assert_eq!(render(&SqlValue::Time(time)), "'13:45:00'");
    }

    #[test]
    fn test_literal_text_escapes_quotes() {
        assert_eq!(render(&SqlValue::Text("dog".into())), "'dog'");
        assert_eq!(render(&SqlValue::Text("O'Brien".into())), "'O''Brien'");
    }

    #[test]
    fn test_non_finite_floats_have_no_literal() {
        assert!(!has_literal(&SqlValue::Double(f64::NAN)));
        assert!(!has_literal(&SqlValue::Single(f32::INFINITY)));
        assert!(!has_literal(&SqlValue::Double(f64::NEG_INFINITY)));
        assert!(has_literal(&SqlValue::Double(1.5)));
        assert!(has_literal(&SqlValue::Null));
    }

    #[test]
    fn test_literal_null_and_blob() {
        assert_eq!(render(&SqlValue::Null), "NULL");
        assert_eq!(render(&SqlValue::Blob(vec![0xDE, 0xAD])), "X'DEAD'");
    }
}
