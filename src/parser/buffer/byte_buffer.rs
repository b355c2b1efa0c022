use std::fmt;

use tracing::trace;

use crate::{config::BufferConfig, parser::buffer::{BufferError, ByteSource}};

/// Errors that a speculative attempt knows how to classify.
pub trait Backtrack {
    /// More input is needed; the attempt did not fail on its own merits.
    fn is_transient(&self) -> bool;
    /// The alternative simply did not match and another may be tried.
    fn is_mismatch(&self) -> bool;
}

impl Backtrack for BufferError {
    fn is_transient(&self) -> bool {
        BufferError::is_transient(self)
    }

    fn is_mismatch(&self) -> bool {
        matches!(self, BufferError::EndOfInput { .. } | BufferError::Unexpected { .. })
    }
}

/// How a speculative attempt treats failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speculation {
    /// Rewind and return `None` only when input ran out.
    Transient,
    /// Rewind and return `None` on any mismatch. Running out of input still
    /// propagates (after rewinding) so no alternative is chosen on partial data.
    Grammar,
}

impl Speculation {
    pub fn recovers<E: Backtrack>(&self, err: &E) -> bool {
        match self {
            Speculation::Transient => err.is_transient(),
            Speculation::Grammar => err.is_mismatch(),
        }
    }
}

/// Saved cursor for a speculative attempt. Holding one keeps the buffer
/// locked; `commit` and `rollback` take it by value so it closes once.
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct Checkpoint {
    position: usize,
}

impl Checkpoint {
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Byte storage with lookahead, consumption, backtracking and incremental fill.
pub struct ByteBuffer {
    data: Vec<u8>,
    cursor: usize,
    discarded: usize,
    eof: bool,
    locks: usize,
    config: BufferConfig,
    source: Option<Box<dyn ByteSource + Send>>,
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteBuffer {
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            data: vec![],
            cursor: 0,
            discarded: 0,
            eof: false,
            locks: 0,
            config,
            source: None,
        }
    }

    pub fn with_source<S>(source: S, config: BufferConfig) -> Self
    where
        S: ByteSource + Send + 'static,
    {
        Self {
            source: Some(Box::new(source)),
            ..Self::with_config(config)
        }
    }

    /// Buffer holding all of `text`, with end of input already marked.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.data.extend_from_slice(text.as_bytes());
        buffer.eof = true;
        buffer
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Bytes currently retained (consumed and unconsumed).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes available after the cursor without pulling.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Absolute offset of the cursor in the whole input.
    pub fn position(&self) -> usize {
        self.discarded + self.cursor
    }

    pub fn is_locked(&self) -> bool {
        self.locks > 0
    }

    pub fn is_end_marked(&self) -> bool {
        self.eof
    }

    pub fn mark_end(&mut self) {
        self.eof = true;
    }

    /// True once end of input is confirmed and every byte was consumed.
    /// Pulls from an attached source if that is the only way to tell.
    pub fn at_end(&mut self) -> bool {
        matches!(self.peek(0), Ok(None))
    }

    pub fn push(&mut self, byte: u8) -> Result<(), BufferError> {
        self.feed([byte])
    }

    /// Appends bytes (or UTF-8 text) after the unconsumed tail.
    pub fn feed<T: AsRef<[u8]>>(&mut self, input: T) -> Result<(), BufferError> {
        let input = input.as_ref();
        self.reserve(input.len())?;
        self.data.extend_from_slice(input);
        Ok(())
    }

    pub fn feed_chunks<I, T>(&mut self, chunks: I) -> Result<(), BufferError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        for chunk in chunks {
            self.feed(chunk)?;
        }
        Ok(())
    }

    fn reserve(&mut self, incoming: usize) -> Result<(), BufferError> {
        if self.can_compact() {
            self.compact();
        }

        if self.config.allow_exceed {
            return Ok(());
        }

        let limit = self.config.max_buffer_size;
        if self.data.len() + incoming > limit {
            self.compact();
        }

        let requested = self.data.len() + incoming;
        if requested > limit {
            return Err(BufferError::CapacityExceeded { limit, requested });
        }

        Ok(())
    }

    /// Pulls one chunk from the attached source. Returns false when there is
    /// nothing to pull from right now.
    pub fn fill(&mut self) -> Result<bool, BufferError> {
        if self.eof {
            return Ok(false);
        }

        let chunk_size = self.config.chunk_size;
        let Some(source) = self.source.as_mut() else {
            return Ok(false);
        };

        match source.pull(chunk_size) {
            Ok(Some(chunk)) if chunk.is_empty() => Ok(false),
            Ok(Some(chunk)) => {
                trace!(target: "soql_parser::buffer", bytes = chunk.len(), position = self.position(), "pulled chunk");
                self.feed(chunk)?;
                Ok(true)
            },
            Ok(None) => {
                trace!(target: "soql_parser::buffer", position = self.position(), "source finished");
                self.eof = true;
                Ok(true)
            },
            Err(err) => Err(BufferError::Source { message: err.to_string() }),
        }
    }

    /// Looks `ahead` bytes past the cursor. `Ok(None)` only past a confirmed end.
    pub fn peek(&mut self, ahead: usize) -> Result<Option<u8>, BufferError> {
        while self.cursor + ahead >= self.data.len() {
            if self.eof {
                return Ok(None);
            }
            if !self.fill()? {
                return Err(BufferError::Exhausted { position: self.position() + ahead });
            }
        }

        Ok(Some(self.data[self.cursor + ahead]))
    }

    pub fn next(&mut self) -> Result<u8, BufferError> {
        match self.peek(0)? {
            Some(byte) => {
                self.cursor += 1;
                Ok(byte)
            },
            None => Err(BufferError::EndOfInput { position: self.position() }),
        }
    }

    /// Consumes one byte, failing unless it is one of `expected`.
    pub fn expect_one_of(&mut self, expected: &[u8]) -> Result<u8, BufferError> {
        let position = self.position();
        let byte = self.next()?;
        if !expected.contains(&byte) {
            self.cursor -= 1;
            return Err(BufferError::Unexpected { expected: expected.to_vec(), found: byte, position });
        }
        Ok(byte)
    }

    pub fn can_compact(&self) -> bool {
        self.locks == 0 && self.cursor > self.config.max_buffer_size
    }

    /// Drops the consumed prefix unless a speculative attempt is outstanding.
    pub fn compact(&mut self) {
        if self.locks > 0 || self.cursor == 0 {
            return;
        }

        trace!(target: "soql_parser::buffer", dropped = self.cursor, "compacting buffer");
        self.data.drain(..self.cursor);
        self.discarded += self.cursor;
        self.cursor = 0;
    }

    pub fn checkpoint(&mut self) -> Checkpoint {
        self.locks += 1;
        Checkpoint { position: self.position() }
    }

    pub fn commit(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.position >= self.discarded);
        self.locks = self.locks.saturating_sub(1);
        if self.can_compact() {
            self.compact();
        }
    }

    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.position - self.discarded;
        self.locks = self.locks.saturating_sub(1);
    }

    /// Closes a speculative attempt opened with [`ByteBuffer::checkpoint`].
    pub fn settle<T, E: Backtrack>(
        &mut self,
        checkpoint: Checkpoint,
        mode: Speculation,
        result: Result<T, E>,
    ) -> Result<Option<T>, E> {
        match result {
            Ok(value) => {
                self.commit(checkpoint);
                Ok(Some(value))
            },
            Err(err) => {
                self.rollback(checkpoint);
                if mode.recovers(&err) {
                    Ok(None)
                } else {
                    Err(err)
                }
            },
        }
    }

    pub fn try_speculative<T, E, F>(&mut self, mode: Speculation, attempt: F) -> Result<Option<T>, E>
    where
        E: Backtrack,
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        let checkpoint = self.checkpoint();
        let result = attempt(self);
        self.settle(checkpoint, mode, result)
    }

    /// Text between two absolute offsets, limited to what is still retained.
    pub fn text_between(&self, start: usize, end: usize) -> String {
        let start = start.saturating_sub(self.discarded).min(self.data.len());
        let end = end.saturating_sub(self.discarded).clamp(start, self.data.len());
        String::from_utf8_lossy(&self.data[start..end]).into_owned()
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("len", &self.data.len())
            .field("cursor", &self.cursor)
            .field("position", &self.position())
            .field("eof", &self.eof)
            .field("locks", &self.locks)
            .field("has_source", &self.source.is_some())
            .field("unconsumed", &String::from_utf8_lossy(&self.data[self.cursor..]))
            .finish()
    }
}
