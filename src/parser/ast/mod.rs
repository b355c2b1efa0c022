pub mod field;
pub use field::*;

pub mod operators;
pub use operators::*;

pub mod literals;
pub use literals::*;

pub mod predicate;
pub use predicate::*;

pub mod select_parser;
pub use select_parser::*;

pub mod from_parser;
pub use from_parser::*;

pub mod where_parser;
pub use where_parser::*;

pub mod group_by;
pub use group_by::*;

pub mod having_parser;
pub use having_parser::*;

pub mod order_by;
pub use order_by::*;

pub mod limit_offset_parser;
pub use limit_offset_parser::*;

pub mod query;
pub use query::*;
