use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::parser::{ast::{FieldRef, Query}, Keyword, ParseError, QueryParser};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectItem {
    Field { field: FieldRef, alias: Option<String> },
    Subquery { query: Box<Query> },
}

impl SelectItem {
    pub fn field(field: FieldRef) -> Self {
        SelectItem::Field { field, alias: None }
    }

    pub fn aliased(field: FieldRef, alias: &str) -> Self {
        SelectItem::Field { field, alias: Some(alias.to_string()) }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            SelectItem::Field { alias, .. } => alias.as_deref(),
            SelectItem::Subquery { .. } => None,
        }
    }

    pub fn parse(parser: &mut QueryParser) -> Result<Self, ParseError> {
        if parser.next_is(b'(')? {
            return parser.nested(|parser| {
                parser.next_byte()?;
                let query = Query::parse(parser)?;
                parser.skip_whitespace()?;
                parser.expect(b")")?;
                Ok(SelectItem::Subquery { query: Box::new(query) })
            });
        }

        let field = FieldRef::parse(parser)?;
        let alias = parser.read_alias()?;
        Ok(SelectItem::Field { field, alias })
    }
}

impl Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectItem::Field { field, alias: Some(alias) } => write!(f, "{} {}", field, alias),
            SelectItem::Field { field, alias: None } => write!(f, "{}", field),
            SelectItem::Subquery { query } => write!(f, "({})", query),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectClause {
    pub items: Vec<SelectItem>,
}

impl Display for SelectClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.items.iter().map(ToString::to_string).collect();
        write!(f, "SELECT {}", items.join(", "))
    }
}

pub struct SelectParser;

impl SelectParser {
    pub fn parse(parser: &mut QueryParser) -> Result<SelectClause, ParseError> {
        parser.expect_keyword(Keyword::Select)?;

        let mut items = vec![SelectItem::parse(parser)?];
        while parser.next_is(b',')? {
            parser.next_byte()?;
            items.push(SelectItem::parse(parser)?);
        }

        Ok(SelectClause { items })
    }
}
