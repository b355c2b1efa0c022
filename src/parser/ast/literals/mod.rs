pub mod date_literal;
pub use date_literal::*;

pub mod value_expr;
pub use value_expr::*;

pub mod string_parser;
pub use string_parser::StringParser;

pub mod literal_parser;
pub use literal_parser::LiteralParser;
