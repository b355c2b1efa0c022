use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parser::{ast::FieldRef, Keyword, ParseError, QueryParser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NullsOrder {
    First,
    Last,
}

impl Display for NullsOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NullsOrder::First => write!(f, "NULLS FIRST"),
            NullsOrder::Last => write!(f, "NULLS LAST"),
        }
    }
}

/// One ORDER BY entry. `None` means the query did not say, which callers
/// should not read as ascending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderByField {
    pub field: FieldRef,
    pub direction: Option<SortDirection>,
    pub nulls: Option<NullsOrder>,
}

impl OrderByField {
    pub fn new(field: FieldRef) -> Self {
        Self { field, direction: None, nulls: None }
    }

    pub fn parse(parser: &mut QueryParser) -> Result<Self, ParseError> {
        let field = FieldRef::parse(parser)?;

        let direction = match parser.peek_keyword()? {
            Some(Keyword::Asc) => Some(SortDirection::Asc),
            Some(Keyword::Desc) => Some(SortDirection::Desc),
            _ => None,
        };
        if direction.is_some() {
            parser.read_word()?;
        }

        let mut nulls = None;
        if parser.accept_keyword(Keyword::Nulls)? {
            parser.skip_whitespace()?;
            let pivot = parser.position();
            let word = parser.read_word()?;
            nulls = if word.eq_ignore_ascii_case("FIRST") {
                Some(NullsOrder::First)
            } else if word.eq_ignore_ascii_case("LAST") {
                Some(NullsOrder::Last)
            } else {
                return ParseError::new("Expected FIRST or LAST after NULLS", pivot, parser).err();
            };
        }

        Ok(Self { field, direction, nulls })
    }
}

impl Display for OrderByField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field)?;
        if let Some(direction) = self.direction {
            write!(f, " {}", direction)?;
        }
        if let Some(nulls) = self.nulls {
            write!(f, " {}", nulls)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderByClause {
    pub fields: Vec<OrderByField>,
}

impl Display for OrderByClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self.fields.iter().map(ToString::to_string).collect();
        write!(f, "ORDER BY {}", fields.join(", "))
    }
}

pub struct OrderBy;

impl OrderBy {
    pub fn parse(parser: &mut QueryParser) -> Result<OrderByClause, ParseError> {
        parser.expect_keyword(Keyword::Order)?;
        parser.expect_keyword(Keyword::By)?;
        debug!(target: "soql_parser", position = parser.position(), "parsing ORDER BY");

        let mut fields = vec![OrderByField::parse(parser)?];
        while parser.next_is(b',')? {
            parser.next_byte()?;
            fields.push(OrderByField::parse(parser)?);
        }

        Ok(OrderByClause { fields })
    }
}
