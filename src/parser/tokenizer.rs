use crate::parser::{Keyword, ParseError, QueryParser};

/// Byte classes and word scanning shared by every clause parser.
impl QueryParser {
    pub fn is_whitespace(byte: u8) -> bool {
        matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
    }

    /// Bytes that end a word and are never part of one.
    pub fn is_word_delimiter(byte: u8) -> bool {
        Self::is_whitespace(byte) || matches!(byte, b',' | b'(' | b')')
    }

    pub fn is_operator_byte(byte: u8) -> bool {
        matches!(byte, b'=' | b'!' | b'<' | b'>')
    }

    /// Field and object names also end where a symbolic operator starts.
    pub fn is_name_delimiter(byte: u8) -> bool {
        Self::is_word_delimiter(byte) || Self::is_operator_byte(byte)
    }

    pub fn current(&mut self) -> Result<Option<u8>, ParseError> {
        self.peek_byte(0)
    }

    pub fn peek_byte(&mut self, ahead: usize) -> Result<Option<u8>, ParseError> {
        Ok(self.buffer.peek(ahead)?)
    }

    pub fn next_byte(&mut self) -> Result<u8, ParseError> {
        Ok(self.buffer.next()?)
    }

    pub fn skip_whitespace(&mut self) -> Result<(), ParseError> {
        while let Some(byte) = self.current()? {
            if !Self::is_whitespace(byte) {
                break;
            }
            self.buffer.next()?;
        }
        Ok(())
    }

    /// Consumes one byte that must be one of `expected`.
    pub fn expect(&mut self, expected: &[u8]) -> Result<u8, ParseError> {
        Ok(self.buffer.expect_one_of(expected)?)
    }

    /// True when the next byte (after whitespace) is `byte`.
    pub fn next_is(&mut self, byte: u8) -> Result<bool, ParseError> {
        self.skip_whitespace()?;
        Ok(self.current()? == Some(byte))
    }

    fn scan(&mut self, accept: &dyn Fn(u8) -> bool, consume: bool) -> Result<String, ParseError> {
        let pivot = self.position();
        let mut bytes = vec![];
        while let Some(byte) = self.peek_byte(bytes.len())? {
            if !accept(byte) {
                break;
            }
            bytes.push(byte);
        }

        if consume {
            for _ in 0..bytes.len() {
                self.buffer.next()?;
            }
        }

        String::from_utf8(bytes).or_else(|_| {
            ParseError::new("Invalid UTF-8 sequence", pivot, self).err()
        })
    }

    /// Reads the run of bytes accepted by `accept`, without skipping whitespace.
    pub fn read_while(&mut self, accept: &dyn Fn(u8) -> bool) -> Result<String, ParseError> {
        self.scan(accept, true)
    }

    pub fn peek_word(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace()?;
        self.scan(&|byte| !Self::is_word_delimiter(byte), false)
    }

    pub fn read_word(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace()?;
        self.scan(&|byte| !Self::is_word_delimiter(byte), true)
    }

    /// Reads a field or object name, which also stops at `= ! < >`.
    pub fn read_name(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace()?;
        self.scan(&|byte| !Self::is_name_delimiter(byte), true)
    }

    pub fn peek_name(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace()?;
        self.scan(&|byte| !Self::is_name_delimiter(byte), false)
    }

    pub fn peek_keyword(&mut self) -> Result<Option<Keyword>, ParseError> {
        let word = self.peek_word()?;
        Ok(Keyword::from_word(&word))
    }

    pub fn read_keyword(&mut self) -> Result<Keyword, ParseError> {
        self.skip_whitespace()?;
        let pivot = self.position();
        let word = self.read_word()?;

        match Keyword::from_word(&word) {
            Some(keyword) => Ok(keyword),
            None => ParseError::new(&format!("Expected SOQL keyword, got: {}", word), pivot, self).err(),
        }
    }

    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        self.skip_whitespace()?;
        let pivot = self.position();
        let word = self.read_word()?;

        if Keyword::from_word(&word) == Some(keyword) {
            return Ok(());
        }

        let message = if word.is_empty() && self.at_end() {
            format!("Expected {} keyword, got end of input", keyword)
        } else {
            format!("Expected {} keyword, got: {}", keyword, word)
        };
        ParseError::new(&message, pivot, self).err()
    }

    /// Consumes `keyword` when it is next; otherwise leaves the input untouched.
    pub fn accept_keyword(&mut self, keyword: Keyword) -> Result<bool, ParseError> {
        if self.peek_keyword()? == Some(keyword) {
            self.read_word()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// An alias is any following word that is not empty and not a keyword.
    pub fn read_alias(&mut self) -> Result<Option<String>, ParseError> {
        let word = self.peek_word()?;
        if word.is_empty() || Keyword::is_keyword(&word) {
            return Ok(None);
        }

        self.read_word()?;
        Ok(Some(word))
    }
}
