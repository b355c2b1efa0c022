use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::{
    ast::{DateLiteral, RelativeDate, RelativeDateRange, StringParser, ValueExpr},
    ParseError, QueryParser,
};

static DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[+-][0-9]{2}:[0-9]{2})$")
        .expect("datetime pattern")
});

static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern"));

static NUMBER_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]").expect("number pattern"));

/// Turns the next token into a typed [`ValueExpr`].
pub struct LiteralParser;

impl LiteralParser {
    pub fn parse(parser: &mut QueryParser) -> Result<ValueExpr, ParseError> {
        parser.skip_whitespace()?;

        match parser.current()? {
            Some(byte) if StringParser::is_string_delimiter(byte) => {
                return Ok(ValueExpr::String(StringParser::parse(parser)?));
            },
            Some(b':') => return Self::parse_bind_variable(parser),
            _ => {},
        }

        let pivot = parser.position();
        let word = parser.read_word()?;

        if word.is_empty() {
            let message = if parser.at_end() { "Expected value, got end of input" } else { "Expected value" };
            return ParseError::new(message, pivot, parser).err();
        }

        Self::classify(&word).or_else(|message| ParseError::new(&message, pivot, parser).err())
    }

    /// Classifies an unquoted word. Order matters: dates look like numbers.
    pub fn classify(word: &str) -> Result<ValueExpr, String> {
        if DATETIME.is_match(word) {
            return Ok(ValueExpr::DateTime(word.to_string()));
        }

        if DATE.is_match(word) {
            return Ok(ValueExpr::Date(word.to_string()));
        }

        if NUMBER_START.is_match(word) {
            return word
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .and_then(ValueExpr::number)
                .ok_or_else(|| format!("Invalid number literal: {}", word));
        }

        if word.eq_ignore_ascii_case("true") {
            return Ok(ValueExpr::Boolean(true));
        }

        if word.eq_ignore_ascii_case("false") {
            return Ok(ValueExpr::Boolean(false));
        }

        if RelativeDate::from_name(word).is_some() || RelativeDateRange::is_prefix_of(word) {
            return DateLiteral::from_word(word).map(ValueExpr::DateLiteral);
        }

        if word.eq_ignore_ascii_case("null") {
            return Ok(ValueExpr::Null);
        }

        Err(format!("Unrecognized value expression: {}", word))
    }

    fn parse_bind_variable(parser: &mut QueryParser) -> Result<ValueExpr, ParseError> {
        let pivot = parser.position();
        parser.expect(b":")?;
        let name = parser.read_while(&|byte| !QueryParser::is_name_delimiter(byte))?;

        if name.is_empty() {
            return ParseError::new("Invalid bind variable", pivot, parser).err();
        }

        Ok(ValueExpr::BindVariable(name))
    }

    /// Reads `value (, value)* )`; the opening parenthesis is already consumed.
    pub fn parse_list(parser: &mut QueryParser) -> Result<Vec<ValueExpr>, ParseError> {
        let mut values = vec![];
        loop {
            values.push(Self::parse(parser)?);
            parser.skip_whitespace()?;

            if parser.current()? == Some(b',') {
                parser.next_byte()?;
                continue;
            }

            parser.expect(b")")?;
            return Ok(values);
        }
    }
}
