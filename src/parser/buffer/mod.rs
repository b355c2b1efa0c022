pub mod buffer_error;
pub use buffer_error::*;

pub mod byte_source;
pub use byte_source::*;

pub mod byte_buffer;
pub use byte_buffer::*;
