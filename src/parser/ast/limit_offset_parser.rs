use crate::parser::{Keyword, ParseError, QueryParser};

pub struct LimitAndOffsetParser;

impl LimitAndOffsetParser {
    pub fn parse_limit(parser: &mut QueryParser) -> Result<u64, ParseError> {
        Self::parse_count(parser, Keyword::Limit)
    }

    pub fn parse_offset(parser: &mut QueryParser) -> Result<u64, ParseError> {
        Self::parse_count(parser, Keyword::Offset)
    }

    fn parse_count(parser: &mut QueryParser, keyword: Keyword) -> Result<u64, ParseError> {
        parser.expect_keyword(keyword)?;
        parser.skip_whitespace()?;

        let pivot = parser.position();
        let word = parser.read_word()?;

        if word.is_empty() || !word.bytes().all(|byte| byte.is_ascii_digit()) {
            return ParseError::new(&format!("Invalid {} value", keyword), pivot, parser).err();
        }

        word.parse::<u64>()
            .or_else(|_| ParseError::new(&format!("Invalid {} value", keyword), pivot, parser).err())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{ast::LimitAndOffsetParser, QueryParser};

    #[test]
    pub fn test_limit() {
        let mut parser = QueryParser::new("LIMIT 10");

        let limit = LimitAndOffsetParser::parse_limit(&mut parser).expect("Failed to parse limit");

        assert_eq!(limit, 10);
    }

    #[test]
    pub fn test_offset() {
        let mut parser = QueryParser::new("offset 2000 ");

        let offset = LimitAndOffsetParser::parse_offset(&mut parser).expect("Failed to parse offset");

        assert_eq!(offset, 2000);
    }

    #[test]
    pub fn test_limit_wrong_value() {
        let mut parser = QueryParser::new("LIMIT AB");

        let result = LimitAndOffsetParser::parse_limit(&mut parser);

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.message, "Invalid LIMIT value");
                assert_eq!(err.text, "AB");
                assert_eq!(err.start, 6);
                assert_eq!(err.end, 8);
            },
        }
    }

    #[test]
    pub fn test_limit_rejects_sign_and_fraction() {
        for text in ["LIMIT -1", "LIMIT +1", "LIMIT 1.5", "LIMIT 99999999999999999999999"] {
            let mut parser = QueryParser::new(text);
            assert!(LimitAndOffsetParser::parse_limit(&mut parser).is_err());
        }
    }

    #[test]
    pub fn test_offset_missing_value() {
        let mut parser = QueryParser::new("OFFSET");

        match LimitAndOffsetParser::parse_offset(&mut parser) {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.message, "Invalid OFFSET value"),
        }
    }
}
