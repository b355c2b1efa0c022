use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::parser::{
    ast::{ComparisonOp, FieldRef, LiteralParser, LogicalOp, MultiValueOp, Operator, Query, SetOp, ValueExpr},
    Keyword, ParseError, QueryParser,
};

/// Right side of `IN` / `NIN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SetOperand {
    Values(Vec<ValueExpr>),
    Subquery(Box<Query>),
}

impl Display for SetOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetOperand::Values(values) => write_values(f, values),
            SetOperand::Subquery(query) => write!(f, "({})", query),
        }
    }
}

fn write_values(f: &mut fmt::Formatter<'_>, values: &[ValueExpr]) -> fmt::Result {
    let values: Vec<String> = values.iter().map(ToString::to_string).collect();
    write!(f, "({})", values.join(", "))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BooleanExpr {
    Logical { op: LogicalOp, left: Box<BooleanExpr>, right: Box<BooleanExpr> },
    Comparison { op: ComparisonOp, left: FieldRef, right: ValueExpr },
    SetMembership { op: SetOp, left: FieldRef, right: SetOperand },
    MultiValue { op: MultiValueOp, left: FieldRef, right: Vec<ValueExpr> },
    Paren { inner: Box<BooleanExpr> },
}

impl BooleanExpr {
    /// Joins two expressions in the shape the parser produces, wrapping an
    /// operand in `Paren` wherever it would otherwise re-parse differently.
    pub fn logical(op: LogicalOp, left: BooleanExpr, right: BooleanExpr) -> Self {
        let left = if Self::needs_paren_left(op, &left) { Self::paren(left) } else { left };
        let right = if Self::needs_paren_right(op, &right) { Self::paren(right) } else { right };
        BooleanExpr::Logical { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn and(left: BooleanExpr, right: BooleanExpr) -> Self {
        Self::logical(LogicalOp::And, left, right)
    }

    pub fn or(left: BooleanExpr, right: BooleanExpr) -> Self {
        Self::logical(LogicalOp::Or, left, right)
    }

    fn needs_paren_left(op: LogicalOp, left: &BooleanExpr) -> bool {
        op == LogicalOp::And && matches!(left, BooleanExpr::Logical { op: LogicalOp::Or, .. })
    }

    /// Both operators fold left, so a right operand only stays bare when it
    /// binds tighter than `op`.
    fn needs_paren_right(op: LogicalOp, right: &BooleanExpr) -> bool {
        match right {
            BooleanExpr::Logical { op: inner, .. } => op == LogicalOp::And || *inner == LogicalOp::Or,
            _ => false,
        }
    }

    pub fn paren(inner: BooleanExpr) -> Self {
        BooleanExpr::Paren { inner: Box::new(inner) }
    }

    /// `or := and (OR and)*`, `and := primary (AND primary)*`, both folded left.
    ///
    /// Aggregates on the left side of a condition are only accepted when
    /// `allow_aggregates` is set (HAVING).
    pub fn parse(parser: &mut QueryParser, allow_aggregates: bool) -> Result<Self, ParseError> {
        let mut left = Self::parse_and(parser, allow_aggregates)?;

        while parser.accept_keyword(Keyword::Or)? {
            let right = Self::parse_and(parser, allow_aggregates)?;
            left = Self::or(left, right);
        }

        Ok(left)
    }

    fn parse_and(parser: &mut QueryParser, allow_aggregates: bool) -> Result<Self, ParseError> {
        let mut left = Self::parse_primary(parser, allow_aggregates)?;

        while parser.accept_keyword(Keyword::And)? {
            let right = Self::parse_primary(parser, allow_aggregates)?;
            left = Self::and(left, right);
        }

        Ok(left)
    }

    fn parse_primary(parser: &mut QueryParser, allow_aggregates: bool) -> Result<Self, ParseError> {
        if !parser.next_is(b'(')? {
            return Self::parse_condition(parser, allow_aggregates);
        }

        parser.nested(|parser| {
            parser.next_byte()?;
            let inner = Self::parse(parser, allow_aggregates)?;
            parser.skip_whitespace()?;
            parser.expect(b")")?;
            Ok(Self::paren(inner))
        })
    }

    pub fn parse_condition(parser: &mut QueryParser, allow_aggregates: bool) -> Result<Self, ParseError> {
        parser.skip_whitespace()?;
        let pivot = parser.position();
        let left = FieldRef::parse(parser)?;

        if left.is_aggregate() && !allow_aggregates {
            return ParseError::new("Aggregate functions are not allowed in WHERE clause", pivot, parser).err();
        }

        match Operator::parse(parser)? {
            Operator::Comparison(op) => {
                let right = LiteralParser::parse(parser)?;
                Ok(BooleanExpr::Comparison { op, left, right })
            },
            Operator::Set(op) => {
                parser.skip_whitespace()?;
                parser.expect(b"(")?;

                let right = if parser.peek_keyword()? == Some(Keyword::Select) {
                    let query = parser.nested(Query::parse)?;
                    parser.skip_whitespace()?;
                    parser.expect(b")")?;
                    SetOperand::Subquery(Box::new(query))
                } else {
                    SetOperand::Values(LiteralParser::parse_list(parser)?)
                };

                Ok(BooleanExpr::SetMembership { op, left, right })
            },
            Operator::MultiValue(op) => {
                parser.skip_whitespace()?;
                parser.expect(b"(")?;
                let right = LiteralParser::parse_list(parser)?;
                Ok(BooleanExpr::MultiValue { op, left, right })
            },
        }
    }
}

impl Display for BooleanExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanExpr::Logical { op, left, right } => {
                if Self::needs_paren_left(*op, left) {
                    write!(f, "({}) {} ", left, op)?;
                } else {
                    write!(f, "{} {} ", left, op)?;
                }
                if Self::needs_paren_right(*op, right) {
                    write!(f, "({})", right)
                } else {
                    write!(f, "{}", right)
                }
            },
            BooleanExpr::Comparison { op, left, right } => write!(f, "{} {} {}", left, op, right),
            BooleanExpr::SetMembership { op, left, right } => write!(f, "{} {} {}", left, op, right),
            BooleanExpr::MultiValue { op, left, right } => {
                write!(f, "{} {} ", left, op)?;
                write_values(f, right)
            },
            BooleanExpr::Paren { inner } => write!(f, "({})", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{
        ast::{BooleanExpr, ComparisonOp, FieldPath, FieldRef, LogicalOp, MultiValueOp, SetOp, SetOperand, ValueExpr},
        ParseErrorKind, QueryParser,
    };

    fn parse(text: &str, allow_aggregates: bool) -> BooleanExpr {
        let mut parser = QueryParser::new(text);
        BooleanExpr::parse(&mut parser, allow_aggregates).expect("Failed to parse expression")
    }

    fn field_name(expr: &BooleanExpr) -> String {
        match expr {
            BooleanExpr::Comparison { left, .. } => left.to_string(),
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_single_comparison() {
        let result = parse("Amount >= 100", false);

        match result {
            BooleanExpr::Comparison { op, left, right } => {
                assert_eq!(op, ComparisonOp::GtEq);
                assert_eq!(left.to_string(), "Amount");
                assert_eq!(right, ValueExpr::number(100.0).unwrap());
            },
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_comparison_without_spaces() {
        let result = parse("A=1", false);

        match result {
            BooleanExpr::Comparison { op, .. } => assert_eq!(op, ComparisonOp::Eq),
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_and_binds_tighter_than_or() {
        let result = parse("A=1 AND B=2 OR C=3", false);

        match result {
            BooleanExpr::Logical { op: LogicalOp::Or, left, right } => {
                match *left {
                    BooleanExpr::Logical { op: LogicalOp::And, left, right } => {
                        assert_eq!(field_name(&left), "A");
                        assert_eq!(field_name(&right), "B");
                    },
                    _ => panic!(),
                }
                assert_eq!(field_name(&right), "C");
            },
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_or_is_left_associative() {
        let result = parse("A=1 OR B=2 OR C=3", false);

        match result {
            BooleanExpr::Logical { op: LogicalOp::Or, left, right } => {
                assert!(matches!(*left, BooleanExpr::Logical { op: LogicalOp::Or, .. }));
                assert_eq!(field_name(&right), "C");
            },
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_and_is_left_associative() {
        let result = parse("A=1 and B=2 and C=3", false);

        match result {
            BooleanExpr::Logical { op: LogicalOp::And, left, right } => {
                assert!(matches!(*left, BooleanExpr::Logical { op: LogicalOp::And, .. }));
                assert_eq!(field_name(&right), "C");
            },
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_parentheses_override() {
        let result = parse("A=1 AND (B=2 OR C=3)", false);

        match result {
            BooleanExpr::Logical { op: LogicalOp::And, right, .. } => match *right {
                BooleanExpr::Paren { inner } => {
                    assert!(matches!(*inner, BooleanExpr::Logical { op: LogicalOp::Or, .. }))
                },
                _ => panic!(),
            },
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_unbalanced_parentheses() {
        let mut parser = QueryParser::new("(A=1 AND B=2");

        match BooleanExpr::parse(&mut parser, false) {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.kind, ParseErrorKind::EndOfInput),
        }
    }

    #[test]
    pub fn test_in_values() {
        let result = parse("Id IN (1,2,3)", false);

        match result {
            BooleanExpr::SetMembership { op, right: SetOperand::Values(values), .. } => {
                assert_eq!(op, SetOp::In);
                assert_eq!(
                    values,
                    vec![
                        ValueExpr::number(1.0).unwrap(),
                        ValueExpr::number(2.0).unwrap(),
                        ValueExpr::number(3.0).unwrap()
                    ]
                );
            },
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_in_subquery() {
        let result = parse("AccountId NIN (select Id FROM Account WHERE Name LIKE 'A%')", false);

        match result {
            BooleanExpr::SetMembership { op, right: SetOperand::Subquery(query), .. } => {
                assert_eq!(op, SetOp::NotIn);
                assert_eq!(query.from.items[0].object, "Account");
                assert!(query.where_clause.is_some());
            },
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_includes() {
        let result = parse("Interests__c INCLUDES ('Golf', 'Tennis;Squash')", false);

        match result {
            BooleanExpr::MultiValue { op, right, .. } => {
                assert_eq!(op, MultiValueOp::Includes);
                assert_eq!(right.len(), 2);
            },
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_excludes_requires_list() {
        let mut parser = QueryParser::new("Interests__c EXCLUDES 'Golf'");

        match BooleanExpr::parse(&mut parser, false) {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.kind, ParseErrorKind::Syntax);
                assert_eq!(err.text, "'");
            },
        }
    }

    #[test]
    pub fn test_aggregate_rejected_in_where() {
        let mut parser = QueryParser::new("COUNT(Id) > 1");

        let result = BooleanExpr::parse(&mut parser, false);

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.message, "Aggregate functions are not allowed in WHERE clause");
                assert_eq!(err.text, "COUNT(Id)");
            },
        }
    }

    #[test]
    pub fn test_aggregate_allowed_in_having() {
        let result = parse("COUNT(Id) > 1", true);

        match result {
            BooleanExpr::Comparison { left: FieldRef::Aggregate { aggregate }, .. } => {
                assert_eq!(aggregate.function, "COUNT")
            },
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_invalid_operator() {
        let mut parser = QueryParser::new("Name IS NULL");

        match BooleanExpr::parse(&mut parser, false) {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.message, "Invalid operator: IS"),
        }
    }

    fn condition(name: &str, value: f64) -> BooleanExpr {
        BooleanExpr::Comparison {
            op: ComparisonOp::Eq,
            left: FieldRef::field(FieldPath::new([name]).unwrap()),
            right: ValueExpr::number(value).unwrap(),
        }
    }

    #[test]
    pub fn test_and_over_or_keeps_grouping() {
        let expr = BooleanExpr::and(BooleanExpr::or(condition("A", 1.0), condition("B", 2.0)), condition("C", 3.0));

        assert_eq!(expr.to_string(), "(A = 1 OR B = 2) AND C = 3");
        assert_eq!(parse(&expr.to_string(), false), expr);
    }

    #[test]
    pub fn test_right_nested_constructors_keep_grouping() {
        let or = BooleanExpr::or(condition("A", 1.0), BooleanExpr::or(condition("B", 2.0), condition("C", 3.0)));
        let and = BooleanExpr::and(condition("A", 1.0), BooleanExpr::and(condition("B", 2.0), condition("C", 3.0)));
        let mixed = BooleanExpr::or(condition("A", 1.0), BooleanExpr::and(condition("B", 2.0), condition("C", 3.0)));

        assert_eq!(or.to_string(), "A = 1 OR (B = 2 OR C = 3)");
        assert_eq!(and.to_string(), "A = 1 AND (B = 2 AND C = 3)");
        assert_eq!(mixed.to_string(), "A = 1 OR B = 2 AND C = 3");
        for expr in [or, and, mixed] {
            assert_eq!(parse(&expr.to_string(), false), expr);
        }
    }

    #[test]
    pub fn test_display_brackets_literal_trees() {
        let expr = BooleanExpr::Logical {
            op: LogicalOp::And,
            left: Box::new(BooleanExpr::Logical {
                op: LogicalOp::Or,
                left: Box::new(condition("A", 1.0)),
                right: Box::new(condition("B", 2.0)),
            }),
            right: Box::new(condition("C", 3.0)),
        };

        assert_eq!(expr.to_string(), "(A = 1 OR B = 2) AND C = 3");
    }

    #[test]
    pub fn test_display() {
        let text = "A = 1 AND (B != 'x' OR C IN (1, 2)) AND D EXCLUDES ('a')";

        assert_eq!(parse(text, false).to_string(), text);
    }
}
