//! Filter expressions and where-clause compilation.
//!
//! A [`Filter`] is a binary tree of comparisons joined with AND/OR. The
//! [`WhereBuilder`] walks it left to right, so the K-th placeholder in the
//! produced text always binds to the K-th parameter.
//!
//! ```rust
//! use sqlkit_core::dialect::{Dialect, SqlServerDialect};
//! use sqlkit_core::filter::Filter;
//!
//! let filter = Filter::gt("Age", 5).and(Filter::eq("Name", "Rex"));
//! let clause = SqlServerDialect.where_sql(Some(&filter), 0).unwrap();
//!
//! assert_eq!(clause.sql, "(Age > @par0) and (Name = @par1)");
//! assert_eq!(clause.parameters.len(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::error::{DialectError, Result};
use crate::value::{NamedParameter, SqlValue, ToSqlValue};

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOperator {
    /// Equal (=)
    Equals,
    /// Not equal (<>)
    NotEquals,
    /// Greater than or equal (>=)
    GreaterOrEqualThan,
    /// Greater than (>)
    GreaterThan,
    /// Less than or equal (<=)
    LessOrEqualThan,
    /// Less than (<)
    LessThan,
}

impl CompareOperator {
    /// Portable SQL symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "<>",
            Self::GreaterOrEqualThan => ">=",
            Self::GreaterThan => ">",
            Self::LessOrEqualThan => "<=",
            Self::LessThan => "<",
        }
    }
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CompareOperator {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "=" | "==" => Ok(Self::Equals),
            "<>" | "!=" => Ok(Self::NotEquals),
            ">=" => Ok(Self::GreaterOrEqualThan),
            ">" => Ok(Self::GreaterThan),
            "<=" => Ok(Self::LessOrEqualThan),
            "<" => Ok(Self::LessThan),
            other => Err(DialectError::UnsupportedOperator(other.to_string())),
        }
    }
}

/// Logic operators joining two filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicOperator {
    /// Both sides must hold.
    And,
    /// Either side must hold.
    Or,
}

impl LogicOperator {
    /// Portable SQL keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl FromStr for LogicOperator {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" | "&&" => Ok(Self::And),
            "or" | "||" => Ok(Self::Or),
            _ => Err(DialectError::UnsupportedOperator(s.to_string())),
        }
    }
}

/// A filter expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// `column op value`
    Compare {
        /// Column name.
        column: String,
        /// Comparison operator.
        op: CompareOperator,
        /// Value, always bound as a parameter.
        value: SqlValue,
    },
    /// `left op right`
    Logic {
        /// Logic operator.
        op: LogicOperator,
        /// Left operand, compiled first.
        left: Box<Filter>,
        /// Right operand.
        right: Box<Filter>,
    },
}

impl Filter {
    fn comparison<V: ToSqlValue>(column: &str, op: CompareOperator, value: V) -> Self {
        Self::Compare {
            column: column.to_string(),
            op,
            value: value.to_sql_value(),
        }
    }

    /// Creates a comparison from operator text such as `">="`.
    pub fn compare<V: ToSqlValue>(column: &str, op: &str, value: V) -> Result<Self> {
        Ok(Self::comparison(column, op.parse()?, value))
    }

    /// Creates an equality filter (column = value).
    pub fn eq<V: ToSqlValue>(column: &str, value: V) -> Self {
        Self::comparison(column, CompareOperator::Equals, value)
    }

    /// Creates an inequality filter (column <> value).
    pub fn ne<V: ToSqlValue>(column: &str, value: V) -> Self {
        Self::comparison(column, CompareOperator::NotEquals, value)
    }

    /// Creates a greater-than filter (column > value).
    pub fn gt<V: ToSqlValue>(column: &str, value: V) -> Self {
        Self::comparison(column, CompareOperator::GreaterThan, value)
    }

    /// Creates a greater-than-or-equal filter (column >= value).
    pub fn gte<V: ToSqlValue>(column: &str, value: V) -> Self {
        Self::comparison(column, CompareOperator::GreaterOrEqualThan, value)
    }

    /// Creates a less-than filter (column < value).
    pub fn lt<V: ToSqlValue>(column: &str, value: V) -> Self {
        Self::comparison(column, CompareOperator::LessThan, value)
    }

    /// Creates a less-than-or-equal filter (column <= value).
    pub fn lte<V: ToSqlValue>(column: &str, value: V) -> Self {
        Self::comparison(column, CompareOperator::LessOrEqualThan, value)
    }

    /// Combines with another filter using AND.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::Logic {
            op: LogicOperator::And,
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Combines with another filter using OR.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Logic {
            op: LogicOperator::Or,
            left: Box::new(self),
            right: Box::new(other),
        }
    }
}

/// A compiled where clause: text without the `where` keyword, plus the
/// parameters in placeholder order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    /// Condition text.
    pub sql: String,
    /// Parameters in left-to-right placeholder order.
    pub parameters: Vec<NamedParameter>,
}

impl WhereClause {
    /// Returns true when there is no condition.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Appends ` <where> <condition>` to `sql` when non-empty.
    #[must_use]
    pub fn append_to(&self, sql: &str, word_where: &str) -> String {
        if self.is_empty() {
            sql.to_string()
        } else {
            format!("{sql} {word_where} {}", self.sql)
        }
    }
}

/// Compiles a [`Filter`] against a dialect's parameter and operator rules.
pub struct WhereBuilder<'a, D: Dialect + ?Sized> {
    dialect: &'a D,
    next_index: usize,
    parameters: Vec<NamedParameter>,
}

impl<'a, D: Dialect + ?Sized> WhereBuilder<'a, D> {
    /// Creates a builder whose first parameter gets `start_index`.
    pub fn new(dialect: &'a D, start_index: usize) -> Self {
        Self {
            dialect,
            next_index: start_index,
            parameters: Vec::new(),
        }
    }

    /// Compiles `filter`. `None` yields an empty clause.
    pub fn build(mut self, filter: Option<&Filter>) -> Result<WhereClause> {
        let Some(filter) = filter else {
            return Ok(WhereClause::default());
        };
        let sql = self.visit(filter)?;
        Ok(WhereClause {
            sql,
            parameters: self.parameters,
        })
    }

    fn visit(&mut self, filter: &Filter) -> Result<String> {
        match filter {
            Filter::Compare { column, op, value } => self.comparison(column, *op, value),
            Filter::Logic { op, left, right } => {
                let keyword = self.dialect.logic_operator_sql(*op)?;
                // Left first: parameter order follows text order.
                let left = self.visit(left)?;
                let right = self.visit(right)?;
                Ok(format!("({left}) {keyword} ({right})"))
            }
        }
    }

    fn comparison(&mut self, column: &str, op: CompareOperator, value: &SqlValue) -> Result<String> {
        if value.is_null() {
            match op {
                CompareOperator::Equals => return Ok(format!("{column} is null")),
                CompareOperator::NotEquals => return Ok(format!("{column} is not null")),
                _ => {}
            }
        }

        let symbol = self.dialect.compare_operator_sql(op)?;
        let name = self.dialect.parameter_name(self.next_index);
        self.next_index += 1;
        let sql = format!("{column} {symbol} {name}");
        self.parameters.push(NamedParameter::new(name, value.clone()));
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{PostgresDialect, SqlServerDialect};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_comparison() {
        let clause = SqlServerDialect
            .where_sql(Some(&Filter::eq("Name", "Rex")), 0)
            .unwrap();
        assert_eq!(clause.sql, "Name = @par0");
        assert_eq!(
            clause.parameters,
            vec![NamedParameter::new("@par0", SqlValue::Text("Rex".into()))]
        );
    }

    #[test]
    fn test_compound_filter_order() {
        let filter = Filter::gt("Age", 5).and(Filter::eq("Name", "Rex"));
        let clause = SqlServerDialect.where_sql(Some(&filter), 0).unwrap();

        assert_eq!(clause.sql, "(Age > @par0) and (Name = @par1)");
        let values: Vec<&SqlValue> = clause.parameters.iter().map(|p| &p.value).collect();
        assert_eq!(
            values,
            vec![&SqlValue::Int32(5), &SqlValue::Text("Rex".into())]
        );
    }

    #[test]
    fn test_nested_filter_and_start_index() {
        let filter = Filter::eq("A", 1)
            .or(Filter::ne("B", 2))
            .and(Filter::lte("C", 3));
        let clause = PostgresDialect.where_sql(Some(&filter), 3).unwrap();

        assert_eq!(clause.sql, "((A = :par3) or (B <> :par4)) and (C <= :par5)");
        let names: Vec<&str> = clause.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec![":par3", ":par4", ":par5"]);
    }

    #[test]
    fn test_empty_filter() {
        let clause = SqlServerDialect.where_sql(None, 0).unwrap();
        assert!(clause.is_empty());
        assert!(clause.parameters.is_empty());
        assert_eq!(clause.append_to("delete from Animal", "where"), "delete from Animal");
    }

    #[test]
    fn test_null_comparison_binds_nothing() {
        let filter = Filter::eq("Owner", None::<i32>).and(Filter::gte("Age", 2));
        let clause = SqlServerDialect.where_sql(Some(&filter), 0).unwrap();
        assert_eq!(clause.sql, "(Owner is null) and (Age >= @par0)");
        assert_eq!(clause.parameters.len(), 1);
    }

    #[test]
    fn test_compare_from_text() {
        let filter = Filter::compare("Age", "!=", 4).unwrap();
        assert!(matches!(
            filter,
            Filter::Compare {
                op: CompareOperator::NotEquals,
                ..
            }
        ));

        let err = Filter::compare("Age", "~~", 4).unwrap_err();
        assert_eq!(err, DialectError::UnsupportedOperator("~~".to_string()));
        assert!("xor".parse::<LogicOperator>().is_err());
        assert_eq!("AND".parse::<LogicOperator>().unwrap(), LogicOperator::And);
    }

    #[test]
    fn test_user_data_never_in_text() {
        let filter = Filter::eq("Name", "'; drop table Animal; --");
        let clause = SqlServerDialect.where_sql(Some(&filter), 0).unwrap();
        assert!(!clause.sql.contains("drop table"));
    }
}
