use std::fmt::Display;

use crate::parser::Keyword;

/// Clause positions in the order they may appear in a query.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub enum Phase {
    #[default]
    Select = 0,
    From = 1,
    Where = 2,
    GroupBy = 3,
    Having = 4,
    OrderBy = 5,
    Limit = 6,
    Offset = 7,
}

impl Phase {
    /// Phase opened by a clause keyword, if the keyword starts a clause.
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Select => Some(Phase::Select),
            Keyword::From => Some(Phase::From),
            Keyword::Where => Some(Phase::Where),
            Keyword::Group => Some(Phase::GroupBy),
            Keyword::Having => Some(Phase::Having),
            Keyword::Order => Some(Phase::OrderBy),
            Keyword::Limit => Some(Phase::Limit),
            Keyword::Offset => Some(Phase::Offset),
            _ => None,
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Select => "SELECT",
            Phase::From => "FROM",
            Phase::Where => "WHERE",
            Phase::GroupBy => "GROUP BY",
            Phase::Having => "HAVING",
            Phase::OrderBy => "ORDER BY",
            Phase::Limit => "LIMIT",
            Phase::Offset => "OFFSET",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{Keyword, Phase};

    #[test]
    pub fn test_order() {
        assert!(Phase::Where < Phase::GroupBy);
        assert!(Phase::GroupBy < Phase::Having);
        assert!(Phase::Limit < Phase::Offset);
    }

    #[test]
    pub fn test_from_keyword() {
        assert_eq!(Phase::from_keyword(Keyword::Group), Some(Phase::GroupBy));
        assert_eq!(Phase::from_keyword(Keyword::By), None);
        assert_eq!(Phase::from_keyword(Keyword::And), None);
    }
}
