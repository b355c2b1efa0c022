use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::{ParseError, QueryParser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    NotLike,
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOp::Eq => write!(f, "="),
            ComparisonOp::NotEq => write!(f, "!="),
            ComparisonOp::Lt => write!(f, "<"),
            ComparisonOp::LtEq => write!(f, "<="),
            ComparisonOp::Gt => write!(f, ">"),
            ComparisonOp::GtEq => write!(f, ">="),
            ComparisonOp::Like => write!(f, "LIKE"),
            ComparisonOp::NotLike => write!(f, "NLIKE"),
        }
    }
}

/// `IN` / `NIN`: right side is a value list or a subquery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetOp {
    In,
    NotIn,
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetOp::In => write!(f, "IN"),
            SetOp::NotIn => write!(f, "NIN"),
        }
    }
}

/// `INCLUDES` / `EXCLUDES` for multi-select picklists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MultiValueOp {
    Includes,
    Excludes,
}

impl fmt::Display for MultiValueOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultiValueOp::Includes => write!(f, "INCLUDES"),
            MultiValueOp::Excludes => write!(f, "EXCLUDES"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
        }
    }
}

/// Any operator that may follow the left side of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Comparison(ComparisonOp),
    Set(SetOp),
    MultiValue(MultiValueOp),
}

impl Operator {
    pub fn from_word(word: &str) -> Option<Self> {
        let op = match word.to_ascii_uppercase().as_str() {
            "=" => Operator::Comparison(ComparisonOp::Eq),
            "!=" => Operator::Comparison(ComparisonOp::NotEq),
            "<" => Operator::Comparison(ComparisonOp::Lt),
            "<=" => Operator::Comparison(ComparisonOp::LtEq),
            ">" => Operator::Comparison(ComparisonOp::Gt),
            ">=" => Operator::Comparison(ComparisonOp::GtEq),
            "LIKE" => Operator::Comparison(ComparisonOp::Like),
            "NLIKE" => Operator::Comparison(ComparisonOp::NotLike),
            "IN" => Operator::Set(SetOp::In),
            "NIN" => Operator::Set(SetOp::NotIn),
            "INCLUDES" => Operator::MultiValue(MultiValueOp::Includes),
            "EXCLUDES" => Operator::MultiValue(MultiValueOp::Excludes),
            _ => return None,
        };
        Some(op)
    }

    /// Symbolic operators are read as a run of `= ! < >`, so `A=1` needs no spaces.
    pub fn parse(parser: &mut QueryParser) -> Result<Self, ParseError> {
        parser.skip_whitespace()?;
        let pivot = parser.position();

        let word = match parser.current()? {
            Some(byte) if QueryParser::is_operator_byte(byte) => {
                parser.read_while(&QueryParser::is_operator_byte)?
            },
            Some(_) => parser.read_word()?,
            None => return ParseError::new("Expected operator, got end of input", pivot, parser).err(),
        };

        match Self::from_word(&word) {
            Some(op) => Ok(op),
            None => ParseError::new(&format!("Invalid operator: {}", word), pivot, parser).err(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Comparison(op) => write!(f, "{}", op),
            Operator::Set(op) => write!(f, "{}", op),
            Operator::MultiValue(op) => write!(f, "{}", op),
        }
    }
}
