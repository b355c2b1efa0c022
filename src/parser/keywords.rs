use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved SOQL words. Aggregate function names (COUNT, SUM, ...) are not
/// reserved; they are recognized by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Keyword {
    Select,
    From,
    Where,
    And,
    Or,
    In,
    Nin,
    Like,
    Nlike,
    Includes,
    Excludes,
    Group,
    By,
    Having,
    Order,
    Asc,
    Desc,
    Limit,
    Offset,
    Rollup,
    Cube,
    Null,
    Nulls,
}

impl Keyword {
    pub const ALL: [Keyword; 23] = [
        Keyword::Select,
        Keyword::From,
        Keyword::Where,
        Keyword::And,
        Keyword::Or,
        Keyword::In,
        Keyword::Nin,
        Keyword::Like,
        Keyword::Nlike,
        Keyword::Includes,
        Keyword::Excludes,
        Keyword::Group,
        Keyword::By,
        Keyword::Having,
        Keyword::Order,
        Keyword::Asc,
        Keyword::Desc,
        Keyword::Limit,
        Keyword::Offset,
        Keyword::Rollup,
        Keyword::Cube,
        Keyword::Null,
        Keyword::Nulls,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::In => "IN",
            Keyword::Nin => "NIN",
            Keyword::Like => "LIKE",
            Keyword::Nlike => "NLIKE",
            Keyword::Includes => "INCLUDES",
            Keyword::Excludes => "EXCLUDES",
            Keyword::Group => "GROUP",
            Keyword::By => "BY",
            Keyword::Having => "HAVING",
            Keyword::Order => "ORDER",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
            Keyword::Limit => "LIMIT",
            Keyword::Offset => "OFFSET",
            Keyword::Rollup => "ROLLUP",
            Keyword::Cube => "CUBE",
            Keyword::Null => "NULL",
            Keyword::Nulls => "NULLS",
        }
    }

    /// Case-insensitive lookup.
    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|keyword| keyword.as_str().eq_ignore_ascii_case(word))
    }

    pub fn is_keyword(word: &str) -> bool {
        Self::from_word(word).is_some()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::Keyword;

    #[test]
    pub fn test_from_word_case_insensitive() {
        assert_eq!(Keyword::from_word("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_word("Group"), Some(Keyword::Group));
        assert_eq!(Keyword::from_word("NULLS"), Some(Keyword::Nulls));
    }

    #[test]
    pub fn test_aggregates_are_not_reserved() {
        for word in ["COUNT", "MAX", "MIN", "SUM", "AVG"] {
            assert!(!Keyword::is_keyword(word));
        }
    }

    #[test]
    pub fn test_unsupported_words_are_not_reserved() {
        for word in ["NOT", "USING", "WITH", "DISTINCT", "FIRST", "LAST", ""] {
            assert!(!Keyword::is_keyword(word));
        }
    }

    #[test]
    pub fn test_round_trip_names() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_word(keyword.as_str()), Some(keyword));
        }
    }
}
