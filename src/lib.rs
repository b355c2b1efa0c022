pub mod config;
pub mod parser;

pub use config::{BufferConfig, ParserConfig};
pub use parser::{parse_query, parse_query_async, parse_query_async_with, ParseError, ParseErrorKind, Query, QueryParser};
