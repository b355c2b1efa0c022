use std::fmt::{self, Display};

use chrono::{DateTime, FixedOffset, NaiveDate};
use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::parser::ast::DateLiteral;

/// A literal value on the right side of a condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ValueExpr {
    String(String),
    Number(NotNan<f64>),
    Boolean(bool),
    /// `YYYY-MM-DD`, kept as written
    Date(String),
    /// ISO-8601 datetime with `Z` or a `±hh:mm` offset, kept as written
    DateTime(String),
    DateLiteral(DateLiteral),
    BindVariable(String),
    Null,
}

impl ValueExpr {
    pub fn string(value: &str) -> Self {
        ValueExpr::String(value.to_string())
    }

    /// `None` for NaN.
    pub fn number(value: f64) -> Option<Self> {
        NotNan::new(value).ok().map(ValueExpr::Number)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ValueExpr::Number(value) => Some(value.into_inner()),
            _ => None,
        }
    }

    /// Calendar date of a `Date` value, `None` if it names no real day.
    pub fn as_naive_date(&self) -> Option<NaiveDate> {
        match self {
            ValueExpr::Date(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d").ok(),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            ValueExpr::DateTime(text) => DateTime::parse_from_rfc3339(text).ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ValueExpr::Null)
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("'")?;
    for ch in value.chars() {
        match ch {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            _ => write!(f, "{}", ch)?,
        }
    }
    f.write_str("'")
}

impl Display for ValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpr::String(value) => write_quoted(f, value),
            ValueExpr::Number(value) => write!(f, "{}", value.into_inner()),
            ValueExpr::Boolean(value) => write!(f, "{}", value),
            ValueExpr::Date(value) => write!(f, "{}", value),
            ValueExpr::DateTime(value) => write!(f, "{}", value),
            ValueExpr::DateLiteral(value) => write!(f, "{}", value),
            ValueExpr::BindVariable(name) => write!(f, ":{}", name),
            ValueExpr::Null => write!(f, "NULL"),
        }
    }
}
