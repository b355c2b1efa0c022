use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::parser::{
    ast::{
        BooleanExpr, FromClause, FromParser, GroupBy, GroupByClause, HavingParser, LimitAndOffsetParser, OrderBy,
        OrderByClause, SelectClause, SelectParser, WhereParser,
    },
    ParseError, Phase, QueryParser,
};

/// Root of the tree. SELECT and FROM are required; every other clause
/// appears at most once, in this order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub select: SelectClause,
    pub from: FromClause,
    pub where_clause: Option<BooleanExpr>,
    pub group_by: Option<GroupByClause>,
    pub having: Option<BooleanExpr>,
    pub order_by: Option<OrderByClause>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Query {
    pub fn new(select: SelectClause, from: FromClause) -> Self {
        Self {
            select,
            from,
            where_clause: None,
            group_by: None,
            having: None,
            order_by: None,
            limit: None,
            offset: None,
        }
    }

    /// Parses SELECT and FROM, then optional clauses for as long as the next
    /// word opens one. Any other word ends the query and is left unread.
    pub fn parse(parser: &mut QueryParser) -> Result<Self, ParseError> {
        let select = SelectParser::parse(parser)?;
        let from = FromParser::parse(parser)?;
        let mut query = Query::new(select, from);

        let mut phase = Phase::From;
        loop {
            parser.skip_whitespace()?;
            let pivot = parser.position();
            let Some(next) = parser.peek_keyword()?.and_then(Phase::from_keyword) else {
                break;
            };

            if next <= phase {
                parser.read_word()?;
                return ParseError::new(&format!("Unexpected {} clause", next), pivot, parser).err();
            }

            if next == Phase::Having && query.group_by.is_none() {
                parser.read_word()?;
                return ParseError::new("HAVING clause requires GROUP BY", pivot, parser).err();
            }

            trace!(target: "soql_parser", phase = %next, position = pivot, "entering clause");
            match next {
                Phase::Select | Phase::From => unreachable!("clauses before {} are rejected above", phase),
                Phase::Where => query.where_clause = Some(WhereParser::parse(parser)?),
                Phase::GroupBy => query.group_by = Some(GroupBy::parse(parser)?),
                Phase::Having => query.having = Some(HavingParser::parse(parser)?),
                Phase::OrderBy => query.order_by = Some(OrderBy::parse(parser)?),
                Phase::Limit => query.limit = Some(LimitAndOffsetParser::parse_limit(parser)?),
                Phase::Offset => query.offset = Some(LimitAndOffsetParser::parse_offset(parser)?),
            }
            phase = next;
        }

        Ok(query)
    }
}

impl TryFrom<&str> for Query {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        QueryParser::new(value).read()
    }
}

impl FromStr for Query {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.select, self.from)?;
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {}", where_clause)?;
        }
        if let Some(group_by) = &self.group_by {
            write!(f, " {}", group_by)?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {}", having)?;
        }
        if let Some(order_by) = &self.order_by {
            write!(f, " {}", order_by)?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {}", limit)?;
        }
        if let Some(offset) = self.offset {
            write!(f, " OFFSET {}", offset)?;
        }
        Ok(())
    }
}
