pub mod buffer;

pub mod keywords;
pub use keywords::*;

pub mod phase;
pub use phase::*;

pub mod parse_error;
pub use parse_error::*;

pub mod query_parser;
pub use query_parser::*;

pub mod tokenizer;

pub mod ast;
pub use ast::Query;

pub mod async_reader;
pub use async_reader::*;

/// Parses a complete query held in memory.
///
/// Text after the last recognized clause is ignored; use
/// [`QueryParser::at_end`] when the whole input must be consumed.
pub fn parse_query(text: &str) -> Result<Query, ParseError> {
    QueryParser::new(text).read()
}
