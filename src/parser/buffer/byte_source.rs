use std::io::{self, Read};

/// Pull-style input attached to a [`crate::parser::buffer::ByteBuffer`].
///
/// `pull` returns at most `max` bytes. `Ok(None)` means the source is
/// finished, which the buffer records as end of input.
pub trait ByteSource {
    fn pull(&mut self, max: usize) -> io::Result<Option<Vec<u8>>>;
}

/// Adapts any iterator of chunks (`&str`, `String`, `Vec<u8>`, ...).
///
/// Chunks larger than the requested ceiling are handed out in pieces.
pub struct IterSource<I> {
    iter: I,
    pending: Vec<u8>,
}

impl<I> IterSource<I> {
    pub fn new(iter: I) -> Self {
        Self { iter, pending: vec![] }
    }
}

impl<I, T> ByteSource for IterSource<I>
where
    I: Iterator<Item = T>,
    T: AsRef<[u8]>,
{
    fn pull(&mut self, max: usize) -> io::Result<Option<Vec<u8>>> {
        while self.pending.is_empty() {
            match self.iter.next() {
                Some(chunk) => self.pending = chunk.as_ref().to_vec(),
                None => return Ok(None),
            }
        }

        let take = max.max(1).min(self.pending.len());
        Ok(Some(self.pending.drain(..take).collect()))
    }
}

/// Adapts a blocking [`Read`] implementation (files, stdin, sockets, or an
/// async reader wrapped in `tokio_util::io::SyncIoBridge`).
pub struct ReadSource<R> {
    reader: R,
}

impl<R: Read> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn pull(&mut self, max: usize) -> io::Result<Option<Vec<u8>>> {
        let mut chunk = vec![0; max.max(1)];
        loop {
            match self.reader.read(&mut chunk) {
                Ok(0) => return Ok(None),
                Ok(read) => {
                    chunk.truncate(read);
                    return Ok(Some(chunk));
                },
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}
