use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::parser::{Keyword, ParseError, QueryParser};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FromItem {
    pub object: String,
    pub alias: Option<String>,
}

impl FromItem {
    pub fn new(object: &str, alias: Option<&str>) -> Self {
        Self { object: object.to_string(), alias: alias.map(str::to_string) }
    }

    pub fn parse(parser: &mut QueryParser) -> Result<Self, ParseError> {
        parser.skip_whitespace()?;
        let pivot = parser.position();
        let object = parser.read_name()?;

        if object.is_empty() {
            return ParseError::new("Expected object name", pivot, parser).err();
        }

        let alias = parser.read_alias()?;
        Ok(Self { object, alias })
    }
}

impl Display for FromItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} {}", self.object, alias),
            None => write!(f, "{}", self.object),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FromClause {
    pub items: Vec<FromItem>,
}

impl Display for FromClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.items.iter().map(ToString::to_string).collect();
        write!(f, "FROM {}", items.join(", "))
    }
}

pub struct FromParser;

impl FromParser {
    pub fn parse(parser: &mut QueryParser) -> Result<FromClause, ParseError> {
        parser.expect_keyword(Keyword::From)?;

        let mut items = vec![FromItem::parse(parser)?];
        while parser.next_is(b',')? {
            parser.next_byte()?;
            items.push(FromItem::parse(parser)?);
        }

        Ok(FromClause { items })
    }
}
