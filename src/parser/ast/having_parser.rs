use tracing::debug;

use crate::parser::{ast::BooleanExpr, Keyword, ParseError, QueryParser};

pub struct HavingParser;

impl HavingParser {
    pub fn parse(parser: &mut QueryParser) -> Result<BooleanExpr, ParseError> {
        parser.expect_keyword(Keyword::Having)?;
        debug!(target: "soql_parser", position = parser.position(), "parsing HAVING");

        BooleanExpr::parse(parser, true)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{ast::{BooleanExpr, ComparisonOp, FieldRef, HavingParser, LogicalOp}, QueryParser};

    #[test]
    pub fn test_having() {
        let mut parser = QueryParser::new("HAVING COUNT(Id) > 35");

        let result = HavingParser::parse(&mut parser).expect("Failed to parse having");

        match result {
            BooleanExpr::Comparison { left, op, .. } => {
                assert_eq!(ComparisonOp::Gt, op);
                assert!(left.is_aggregate());
            },
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_having_mixed() {
        let mut parser = QueryParser::new("HAVING Name != null OR MAX(Amount) >= 1000.5");

        let result = HavingParser::parse(&mut parser).expect("Failed to parse having");

        match result {
            BooleanExpr::Logical { op, left, .. } => {
                assert_eq!(op, LogicalOp::Or);
                match *left {
                    BooleanExpr::Comparison { left: FieldRef::Field { path }, .. } => assert_eq!(path.name(), "Name"),
                    _ => panic!(),
                }
            },
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_having_wrong() {
        let mut parser = QueryParser::new("HAVIN COUNT(Id) > 35");

        match HavingParser::parse(&mut parser) {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.message, "Expected HAVING keyword, got: HAVIN"),
        }
    }
}
