use std::fmt::{self, Display};

/// Failures raised by [`crate::parser::buffer::ByteBuffer`].
///
/// `Exhausted` is transient: the caller must feed more bytes and retry.
/// Every other variant is final for the read that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    Exhausted { position: usize },
    EndOfInput { position: usize },
    CapacityExceeded { limit: usize, requested: usize },
    Unexpected { expected: Vec<u8>, found: u8, position: usize },
    Source { message: String },
}

impl BufferError {
    pub fn is_transient(&self) -> bool {
        matches!(self, BufferError::Exhausted { .. })
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            BufferError::Exhausted { position }
            | BufferError::EndOfInput { position }
            | BufferError::Unexpected { position, .. } => Some(*position),
            BufferError::CapacityExceeded { .. } | BufferError::Source { .. } => None,
        }
    }
}

pub(crate) fn describe_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        format!("'{}'", byte as char)
    } else {
        format!("0x{:02x}", byte)
    }
}

impl Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::Exhausted { position } => write!(f, "more input needed at {}", position),
            BufferError::EndOfInput { position } => write!(f, "end of input reached at {}", position),
            BufferError::CapacityExceeded { limit, requested } => {
                write!(f, "buffer size exceeded: {} bytes requested, limit is {}", requested, limit)
            },
            BufferError::Unexpected { expected, found, position } => {
                let expected = expected.iter().map(|b| describe_byte(*b)).collect::<Vec<_>>().join(", ");
                write!(f, "expected one of {} but got {} at {}", expected, describe_byte(*found), position)
            },
            BufferError::Source { message } => write!(f, "input source failed: {}", message),
        }
    }
}

impl std::error::Error for BufferError {}
