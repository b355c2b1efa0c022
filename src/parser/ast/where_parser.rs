use tracing::debug;

use crate::parser::{ast::BooleanExpr, Keyword, ParseError, QueryParser};

pub struct WhereParser;

impl WhereParser {
    pub fn parse(parser: &mut QueryParser) -> Result<BooleanExpr, ParseError> {
        parser.expect_keyword(Keyword::Where)?;
        debug!(target: "soql_parser", position = parser.position(), "parsing WHERE");

        BooleanExpr::parse(parser, false)
    }
}
