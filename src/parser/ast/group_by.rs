use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parser::{ast::FieldRef, Keyword, ParseError, QueryParser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupingFunction {
    Rollup,
    Cube,
}

impl Display for GroupingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingFunction::Rollup => write!(f, "ROLLUP"),
            GroupingFunction::Cube => write!(f, "CUBE"),
        }
    }
}

/// `GROUP BY a, b` or `GROUP BY ROLLUP(a, b)`. A grouping function always
/// comes with a parenthesised field list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupByClause {
    pub fields: Vec<FieldRef>,
    pub grouping: Option<GroupingFunction>,
}

impl Display for GroupByClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self.fields.iter().map(ToString::to_string).collect();
        match self.grouping {
            Some(grouping) => write!(f, "GROUP BY {}({})", grouping, fields.join(", ")),
            None => write!(f, "GROUP BY {}", fields.join(", ")),
        }
    }
}

pub struct GroupBy;

impl GroupBy {
    pub fn parse(parser: &mut QueryParser) -> Result<GroupByClause, ParseError> {
        parser.expect_keyword(Keyword::Group)?;
        parser.expect_keyword(Keyword::By)?;
        debug!(target: "soql_parser", position = parser.position(), "parsing GROUP BY");

        let grouping = match parser.peek_keyword()? {
            Some(Keyword::Rollup) => Some(GroupingFunction::Rollup),
            Some(Keyword::Cube) => Some(GroupingFunction::Cube),
            _ => None,
        };

        if grouping.is_some() {
            parser.read_word()?;
            parser.skip_whitespace()?;
            parser.expect(b"(")?;
        }

        let mut fields = vec![FieldRef::parse(parser)?];
        while parser.next_is(b',')? {
            parser.next_byte()?;
            fields.push(FieldRef::parse(parser)?);
        }

        if grouping.is_some() {
            parser.skip_whitespace()?;
            parser.expect(b")")?;
        }

        Ok(GroupByClause { fields, grouping })
    }
}
