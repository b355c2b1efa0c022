use std::io::Read;

use tracing::debug;

use crate::{
    config::ParserConfig,
    parser::{
        ast::Query,
        buffer::{ByteBuffer, ByteSource, ReadSource, Speculation},
        ParseError,
    },
};

/// Cursor over the query input shared by every clause parser.
///
/// Built with [`QueryParser::new`] the whole text is available and end of
/// input is already marked. Built with [`QueryParser::streaming`] or
/// [`QueryParser::with_source`] bytes arrive incrementally and [`QueryParser::read`]
/// reports [`crate::parser::ParseErrorKind::Incomplete`] until enough is there.
#[derive(Debug)]
pub struct QueryParser {
    pub(crate) buffer: ByteBuffer,
    config: ParserConfig,
    depth: usize,
    consumed: bool,
}

impl QueryParser {
    pub fn new(query: &str) -> Self {
        let mut parser = Self::with_config(ParserConfig::default());
        parser.buffer = ByteBuffer::from_text(query);
        parser
    }

    pub fn streaming() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            buffer: ByteBuffer::with_config(config.buffer.clone()),
            config,
            depth: 0,
            consumed: false,
        }
    }

    pub fn with_source<S>(source: S, config: ParserConfig) -> Self
    where
        S: ByteSource + Send + 'static,
    {
        Self {
            buffer: ByteBuffer::with_source(source, config.buffer.clone()),
            config,
            depth: 0,
            consumed: false,
        }
    }

    pub fn from_reader<R>(reader: R, config: ParserConfig) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::with_source(ReadSource::new(reader), config)
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn feed<T: AsRef<[u8]>>(&mut self, input: T) -> Result<(), ParseError> {
        Ok(self.buffer.feed(input)?)
    }

    pub fn feed_chunks<I, T>(&mut self, chunks: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        Ok(self.buffer.feed_chunks(chunks)?)
    }

    pub fn mark_end(&mut self) {
        self.buffer.mark_end();
    }

    /// True once every input byte has been consumed and no more can arrive.
    pub fn at_end(&mut self) -> bool {
        self.buffer.at_end()
    }

    pub fn position(&self) -> usize {
        self.buffer.position()
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub fn text_from_range(&self, start: usize, end: usize) -> String {
        self.buffer.text_between(start, end)
    }

    /// Parses one query.
    ///
    /// An `Incomplete` error rewinds to where the query started, so the caller
    /// can feed more input and call `read` again. Any other outcome is final.
    pub fn read(&mut self) -> Result<Query, ParseError> {
        if self.consumed {
            return ParseError::already_consumed(self.position()).err();
        }

        let checkpoint = self.buffer.checkpoint();
        let result = Query::parse(self);

        match result {
            Ok(query) => {
                self.consumed = true;
                self.buffer.commit(checkpoint);
                debug!(target: "soql_parser", position = self.position(), "query parsed");
                Ok(query)
            },
            Err(err) if err.is_incomplete() => {
                self.buffer.rollback(checkpoint);
                self.depth = 0;
                debug!(target: "soql_parser", needed_at = err.start, "query incomplete, waiting for input");
                Err(err)
            },
            Err(err) => {
                self.consumed = true;
                self.buffer.commit(checkpoint);
                debug!(target: "soql_parser", error = %err.message, start = err.start, "query failed");
                Err(err)
            },
        }
    }

    /// Speculatively runs `attempt`; on a grammar mismatch the cursor is
    /// restored and `None` is returned.
    pub fn try_parse<T, F>(&mut self, attempt: F) -> Result<Option<T>, ParseError>
    where
        F: FnOnce(&mut Self) -> Result<T, ParseError>,
    {
        let checkpoint = self.buffer.checkpoint();
        let depth = self.depth;
        let result = attempt(self);
        self.depth = depth;
        self.buffer.settle(checkpoint, Speculation::Grammar, result)
    }

    /// Runs `inner` one nesting level deeper (parentheses, subqueries).
    pub fn nested<T, F>(&mut self, inner: F) -> Result<T, ParseError>
    where
        F: FnOnce(&mut Self) -> Result<T, ParseError>,
    {
        if self.depth >= self.config.max_depth {
            return ParseError::new("Maximum nesting depth exceeded", self.position(), self).err();
        }

        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;
        result
    }
}

#[cfg(test)]
mod test {
    use crate::{
        config::ParserConfig,
        parser::{buffer::IterSource, ParseErrorKind, QueryParser},
    };

    #[test]
    pub fn test_read_full_text() {
        let mut parser = QueryParser::new("SELECT Id FROM Account");

        let query = parser.read().expect("Failed to parse query");

        assert_eq!(query.from.items[0].object, "Account");
        assert!(parser.at_end());
    }

    #[test]
    pub fn test_read_twice() {
        let mut parser = QueryParser::new("SELECT Id FROM Account");
        parser.read().expect("Failed to parse query");

        match parser.read() {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.kind, ParseErrorKind::AlreadyConsumed),
        }
    }

    #[test]
    pub fn test_read_after_syntax_error() {
        let mut parser = QueryParser::new("SELEKT Id FROM Account");

        match parser.read() {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.kind, ParseErrorKind::Syntax),
        }

        match parser.read() {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.kind, ParseErrorKind::AlreadyConsumed),
        }
    }

    #[test]
    pub fn test_read_incomplete_then_complete() {
        let mut parser = QueryParser::streaming();
        parser.feed("SELECT Id FR").unwrap();

        match parser.read() {
            Ok(_) => panic!(),
            Err(err) => assert!(err.is_incomplete()),
        }
        assert_eq!(parser.position(), 0);
        assert!(!parser.is_consumed());

        parser.feed("OM Account").unwrap();
        match parser.read() {
            Ok(_) => panic!(),
            Err(err) => assert!(err.is_incomplete()),
        }

        parser.mark_end();
        let query = parser.read().expect("Failed to parse query");

        assert_eq!(query.from.items[0].object, "Account");
    }

    #[test]
    pub fn test_read_from_source() {
        let source = IterSource::new(vec!["SELECT Na", "me FROM Con", "tact"].into_iter());
        let mut parser = QueryParser::with_source(source, ParserConfig::default());

        let query = parser.read().expect("Failed to parse query");

        assert_eq!(query.from.items[0].object, "Contact");
    }

    #[test]
    pub fn test_read_from_reader() {
        let reader = std::io::Cursor::new("SELECT Name FROM Lead LIMIT 3".as_bytes().to_vec());
        let mut parser = QueryParser::from_reader(reader, ParserConfig::default());

        let query = parser.read().expect("Failed to parse query");

        assert_eq!(query.limit, Some(3));
    }

    #[test]
    pub fn test_nesting_limit() {
        let config = ParserConfig::default().with_max_depth(2);
        let mut parser = QueryParser::with_config(config);
        parser.feed("SELECT Id FROM Account WHERE (((Id = 1)))").unwrap();
        parser.mark_end();

        match parser.read() {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.kind, ParseErrorKind::Syntax);
                assert_eq!(err.message, "Maximum nesting depth exceeded");
            },
        }
    }

    #[test]
    pub fn test_try_parse_restores_position() {
        let mut parser = QueryParser::new("Name = 'x'");

        let result = parser.try_parse(|parser| {
            parser.read_word()?;
            parser.skip_whitespace()?;
            parser.expect(b"(")
        }).expect("Failed to try parse");

        assert!(result.is_none());
        assert_eq!(parser.position(), 0);
    }
}
