use crate::parser::{ParseError, QueryParser};

pub struct StringParser;

impl StringParser {
    pub fn is_string_delimiter(byte: u8) -> bool {
        byte == b'\'' || byte == b'"'
    }

    /// Reads a quoted string, decoding backslash escapes. `\%` and `\_` stay
    /// escaped since they only mean something to LIKE.
    pub fn parse(parser: &mut QueryParser) -> Result<String, ParseError> {
        parser.skip_whitespace()?;
        let pivot = parser.position();
        let quote = parser.expect(b"'\"")?;

        let mut bytes = vec![];
        loop {
            let Some(byte) = parser.current()? else {
                return ParseError::new("Unterminated string literal", pivot, parser).err();
            };
            parser.next_byte()?;

            match byte {
                b'\r' | b'\n' => {
                    return ParseError::new("Line break in string literal", pivot, parser).err();
                },
                b'\\' => {
                    let Some(escaped) = parser.current()? else {
                        return ParseError::new("Unterminated string literal", pivot, parser).err();
                    };
                    parser.next_byte()?;

                    match escaped {
                        b'n' => bytes.push(b'\n'),
                        b'r' => bytes.push(b'\r'),
                        b't' => bytes.push(b'\t'),
                        b'b' => bytes.push(0x08),
                        b'f' => bytes.push(0x0c),
                        b'\'' | b'"' | b'\\' => bytes.push(escaped),
                        b'%' | b'_' => bytes.extend_from_slice(&[b'\\', escaped]),
                        _ => return ParseError::new("Invalid escape sequence", pivot, parser).err(),
                    }
                },
                _ if byte == quote => break,
                _ => bytes.push(byte),
            }
        }

        String::from_utf8(bytes).or_else(|_| ParseError::new("Invalid UTF-8 sequence", pivot, parser).err())
    }
}
