use crate::Error;
use std::cmp::min;

/// Bytes buffered per reader before new reports are refused.
pub const FIFO_CAPACITY: usize = 4096;

/// Bounded byte ring buffer holding one reader's pending report data.
///
/// Writes are all or nothing: a report that doesn't fit in the remaining space
/// is rejected whole and the buffered bytes are left untouched.
#[derive(Debug)]
pub struct ReportFifo {
    buf: Box<[u8]>,
    head: usize,
    len: usize,
}

impl ReportFifo {
    pub fn new() -> Result<Self, Error> {
        Self::with_capacity(FIFO_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| Error::OutOfMemory)?;
        buf.resize(capacity, 0);

        Ok(Self {
            buf: buf.into_boxed_slice(),
            head: 0,
            len: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `data`, returning the number of bytes admitted.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, Error> {
        if data.is_empty() {
            return Ok(0);
        }
        if data.len() > self.capacity() - self.len {
            return Err(Error::CapacityExceeded);
        }

        let tail = (self.head + self.len) % self.capacity();
        let first = min(data.len(), self.capacity() - tail);
        let (front, wrapped) = data.split_at(first);

        self.buf[tail..tail + first].copy_from_slice(front);
        self.buf[..wrapped.len()].copy_from_slice(wrapped);
        self.len += data.len();

        Ok(data.len())
    }

    /// Moves up to `out.len()` bytes from the front of the queue into `out`.
    pub fn read(&mut self, out: &mut [u8]) -> usize {
        let count = min(out.len(), self.len);
        if count == 0 {
            return 0;
        }

        let first = min(count, self.capacity() - self.head);
        out[..first].copy_from_slice(&self.buf[self.head..self.head + first]);
        out[first..count].copy_from_slice(&self.buf[..count - first]);

        self.head = (self.head + count) % self.capacity();
        self.len -= count;

        count
    }
}
