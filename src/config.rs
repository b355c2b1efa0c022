use serde::{Deserialize, Serialize};

/// Default soft cap for the input buffer (100 KiB).
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 1024 * 100;

/// Default number of bytes requested from a pull source per fill.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 4;

/// Default nesting limit for parentheses and subqueries.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Input buffer configuration.
///
/// - `max_buffer_size` is the compaction high-water mark and, when
///   `allow_exceed` is false, a hard cap on retained bytes.
/// - `chunk_size` is the ceiling for a single pull from an attached source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// High-water mark for compaction and size cap
    pub max_buffer_size: usize,
    /// Whether `max_buffer_size` is only a soft target
    pub allow_exceed: bool,
    /// Max bytes pulled from a source in one fill
    pub chunk_size: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
            allow_exceed: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl BufferConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: a hard cap of `max_buffer_size` bytes.
    pub fn strict(max_buffer_size: usize) -> Self {
        Self {
            max_buffer_size,
            allow_exceed: false,
            ..Default::default()
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

/// Parser configuration used when creating a [`crate::parser::QueryParser`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub buffer: BufferConfig,
    /// Maximum nesting of parenthesised expressions and subqueries
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { buffer: BufferConfig::default(), max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(buffer: BufferConfig, max_depth: usize) -> Self {
        Self { buffer, max_depth }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_buffer(mut self, buffer: BufferConfig) -> Self {
        self.buffer = buffer;
        self
    }
}
