use std::fmt::Display;

use crate::parser::{buffer::{Backtrack, BufferError}, QueryParser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// More input is needed; feed the parser and call `read` again.
    Incomplete,
    EndOfInput,
    CapacityExceeded,
    Syntax,
    AlreadyConsumed,
    /// The attached input source failed.
    Source,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl ParseError {
    /// Syntax error covering the input from `pivot` up to the current position.
    pub fn new(message: &str, pivot: usize, parser: &QueryParser) -> Self {
        let end = parser.position();
        Self {
            kind: ParseErrorKind::Syntax,
            message: message.to_string(),
            text: parser.text_from_range(pivot, end),
            start: pivot,
            end,
        }
    }

    pub fn with_text(kind: ParseErrorKind, message: &str, text: &str, start: usize, end: usize) -> Self {
        Self {
            kind,
            message: message.to_string(),
            text: text.to_string(),
            start,
            end,
        }
    }

    pub fn already_consumed(position: usize) -> Self {
        Self::with_text(ParseErrorKind::AlreadyConsumed, "Parser has already been consumed", "", position, position)
    }

    pub fn source(message: &str) -> Self {
        Self::with_text(ParseErrorKind::Source, message, "", 0, 0)
    }

    pub fn err<T>(self) -> Result<T, ParseError> {
        Err(self)
    }

    pub fn is_incomplete(&self) -> bool {
        self.kind == ParseErrorKind::Incomplete
    }
}

impl From<BufferError> for ParseError {
    fn from(value: BufferError) -> Self {
        let message = value.to_string();
        match value {
            BufferError::Exhausted { position } => {
                Self::with_text(ParseErrorKind::Incomplete, &message, "", position, position)
            },
            BufferError::EndOfInput { position } => {
                Self::with_text(ParseErrorKind::EndOfInput, "Unexpected end of input", "", position, position)
            },
            BufferError::CapacityExceeded { .. } => Self::with_text(ParseErrorKind::CapacityExceeded, &message, "", 0, 0),
            BufferError::Unexpected { found, position, .. } => {
                let text = String::from_utf8_lossy(&[found]).into_owned();
                Self::with_text(ParseErrorKind::Syntax, &message, &text, position, position + 1)
            },
            BufferError::Source { .. } => Self::source(&message),
        }
    }
}

impl Backtrack for ParseError {
    fn is_transient(&self) -> bool {
        self.is_incomplete()
    }

    fn is_mismatch(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Syntax | ParseErrorKind::EndOfInput)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ParseError: {}\n  at [{}:{}] -> '{}'",
            self.message,
            self.start,
            self.end,
            self.text
        )
    }
}

impl std::error::Error for ParseError {}
