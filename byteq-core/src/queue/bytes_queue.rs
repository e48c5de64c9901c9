//! The queue type and its push/pop/lookup operations.

use super::iter::Iter;
use super::route::{LEFT_MARGIN, Route};
use crate::codec::{self, MAX_HEADER_SIZE};
use crate::config::QueueConfig;
use crate::error::{QueueError, Result};
use crate::stats::QueueStats;
use crate::types::EntryIndex;
use bytes::Bytes;
use std::fmt;
use std::ops::Range;

/// A growable FIFO of byte records with stable indices.
///
/// Records are stored back to back in one contiguous buffer, each prefixed
/// by its uvarint-encoded length. `push` returns the offset of the record,
/// which stays valid for [`get`](Self::get) until the record is popped.
///
/// The queue has a single owner; wrap it in a lock to share it.
///
/// # Example
///
/// ```
/// use byteq_core::{BytesQueue, EntryIndex};
///
/// let mut queue = BytesQueue::new(16, 0, false)?;
/// let first = queue.push(b"ab")?;
/// let second = queue.push(b"cde")?;
/// assert_eq!(first, EntryIndex::new(1));
/// assert_eq!(second, EntryIndex::new(4));
///
/// assert_eq!(queue.pop()?, b"ab");
/// assert_eq!(queue.get(second)?, b"cde");
/// # Ok::<(), byteq_core::QueueError>(())
/// ```
pub struct BytesQueue {
    pub(super) buffer: Vec<u8>,
    pub(super) max_capacity: usize,
    pub(super) head: usize,
    pub(super) tail: usize,
    pub(super) count: usize,
    pub(super) full: bool,
    /// The writer is filling free space below the reader.
    pub(super) wrapped: bool,
    pub(super) route: Route,
    pub(super) used_bytes: usize,
    pub(super) grow_count: u64,
    pub(super) verbose: bool,
}

/// Byte range of a record's payload.
#[derive(Debug, Clone, Copy)]
pub(super) struct Frame {
    payload_start: usize,
    pub(super) end: usize,
}

impl Frame {
    pub(super) fn payload(self) -> Range<usize> {
        self.payload_start..self.end
    }
}

impl BytesQueue {
    /// Create a queue with `capacity` bytes allocated.
    ///
    /// `max_capacity` caps growth; zero means unbounded. With `verbose` set,
    /// growth events are logged at info level.
    pub fn new(capacity: usize, max_capacity: usize, verbose: bool) -> Result<Self> {
        Self::with_config(
            &QueueConfig::bounded(capacity, max_capacity).with_verbose(verbose),
        )
    }

    /// Create a queue from a validated config.
    pub fn with_config(config: &QueueConfig) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            capacity = config.initial_capacity,
            max_capacity = config.max_capacity,
            "Creating bytes queue"
        );

        Ok(Self {
            buffer: vec![0; config.initial_capacity],
            max_capacity: config.max_capacity,
            head: LEFT_MARGIN,
            tail: LEFT_MARGIN,
            count: 0,
            full: false,
            wrapped: false,
            route: Route::default(),
            used_bytes: 0,
            grow_count: 0,
            verbose: config.verbose,
        })
    }

    /// Append a record and return its index.
    ///
    /// Grows the buffer when no free slot fits the record. On error nothing
    /// is written and the queue is unchanged.
    pub fn push(&mut self, data: &[u8]) -> Result<EntryIndex> {
        let len = u32::try_from(data.len())
            .map_err(|_| QueueError::EntryTooLarge { size: data.len() })?;
        let need = codec::framed_len(len);

        self.reserve_slot(need)?;

        let index = self.tail;
        self.write_record(data, len);

        if self.wrapped {
            self.full = self.tail == self.front_limit();
        }
        self.count += 1;
        self.used_bytes += need;

        Ok(EntryIndex::new(index))
    }

    /// Remove the oldest record and return its payload.
    ///
    /// The slice borrows the queue's buffer; it is valid until the next
    /// mutation. Use [`pop_bytes`](Self::pop_bytes) for an owned copy.
    pub fn pop(&mut self) -> Result<&[u8]> {
        if self.count == 0 {
            return Err(QueueError::EmptyQueue);
        }

        let frame = self.frame_at(self.head)?;
        self.count -= 1;
        self.used_bytes -= frame.end - self.head;
        self.full = false;

        if self.count == 0 {
            self.rewind();
        } else {
            let (head, taken) = self.route.advance(frame.end, 0);
            self.route.discard(taken);
            self.head = head;
            if self.route.is_empty() {
                self.wrapped = false;
            }
        }

        Ok(&self.buffer[frame.payload()])
    }

    /// Remove the oldest record and return an owned copy of its payload.
    pub fn pop_bytes(&mut self) -> Result<Bytes> {
        self.pop().map(Bytes::copy_from_slice)
    }

    /// Return the oldest record without removing it.
    pub fn peek(&self) -> Result<&[u8]> {
        if self.count == 0 {
            return Err(QueueError::EmptyQueue);
        }
        let frame = self.frame_at(self.head)?;
        Ok(&self.buffer[frame.payload()])
    }

    /// Return the record at `index`.
    ///
    /// Only indices returned by [`push`](Self::push) for records not yet
    /// popped are meaningful. Other in-range indices decode whatever bytes
    /// happen to be there, or fail with [`QueueError::MalformedEntry`].
    pub fn get(&self, index: EntryIndex) -> Result<&[u8]> {
        self.check(index)?;
        let frame = self.frame_at(index.as_usize())?;
        Ok(&self.buffer[frame.payload()])
    }

    /// Validate `index` without reading the record.
    pub fn check(&self, index: EntryIndex) -> Result<()> {
        if index.is_null() {
            return Err(QueueError::InvalidIndex);
        }
        if index.as_usize() >= self.capacity() {
            return Err(QueueError::IndexOutOfBounds {
                index,
                capacity: self.capacity(),
            });
        }
        if self.count == 0 {
            return Err(QueueError::EmptyQueue);
        }
        Ok(())
    }

    /// Allocated size of the buffer in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Configured growth ceiling; zero means unbounded.
    #[inline]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Number of live records.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the queue holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether the wrapped writer has no gap left before the oldest records.
    ///
    /// A full queue still accepts pushes by growing.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Iterate over live records from oldest to newest.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Snapshot of occupancy and growth counters.
    pub fn stats(&self) -> QueueStats {
        QueueStats {
            capacity: self.capacity(),
            max_capacity: self.max_capacity,
            len: self.count,
            used_bytes: self.used_bytes,
            free_bytes: self
                .capacity()
                .saturating_sub(LEFT_MARGIN + self.used_bytes),
            grow_count: self.grow_count,
            wrapped: self.route.crosses_end(),
            full: self.full,
        }
    }

    /// Drop every record. The allocated capacity is kept.
    pub fn reset(&mut self) {
        tracing::debug!(
            capacity = self.capacity(),
            dropped = self.count,
            "Resetting bytes queue"
        );
        self.rewind();
        self.count = 0;
        self.used_bytes = 0;
    }

    /// Decode the record header at `index`.
    pub(super) fn frame_at(&self, index: usize) -> Result<Frame> {
        let malformed = |cause: String| QueueError::MalformedEntry {
            index: EntryIndex::new(index),
            cause,
        };

        let mut src = self
            .buffer
            .get(index..)
            .ok_or_else(|| malformed("index past the end of the buffer".to_string()))?;
        let (len, header_len) = codec::get_uvarint(&mut src).map_err(|e| malformed(e.to_string()))?;

        let len = len as usize;
        if src.len() < len {
            return Err(malformed(format!(
                "payload of {} bytes runs past the end of the buffer",
                len
            )));
        }

        let payload_start = index + header_len;
        Ok(Frame {
            payload_start,
            end: payload_start + len,
        })
    }

    /// Lowest offset the writer may not reach.
    ///
    /// While wrapped, the writer's own run (started by the last jump) is
    /// excluded.
    pub(super) fn front_limit(&self) -> usize {
        let runs = if self.wrapped {
            self.route.len().saturating_sub(1)
        } else {
            self.route.len()
        };
        self.route.lowest_start(self.head, runs)
    }

    /// Offset where records go after the buffer grows.
    pub(super) fn append_point(&self) -> usize {
        match self.route.last() {
            Some(jump) if self.wrapped => jump.at,
            _ => self.tail,
        }
    }

    fn reserve_slot(&mut self, need: usize) -> Result<()> {
        if self.can_insert_after_tail(need) {
            return Ok(());
        }
        if self.can_insert_before_head(need) {
            tracing::trace!(
                tail = self.tail,
                limit = self.front_limit(),
                "Wrapping bytes queue to the left margin"
            );
            self.route.push(self.tail, LEFT_MARGIN);
            self.tail = LEFT_MARGIN;
            self.wrapped = true;
            return Ok(());
        }
        self.grow(need).map(|_| ())
    }

    fn can_insert_after_tail(&self, need: usize) -> bool {
        if self.wrapped {
            !self.full && fits(self.front_limit() - self.tail, need)
        } else {
            self.capacity() - self.tail >= need
        }
    }

    fn can_insert_before_head(&self, need: usize) -> bool {
        !self.wrapped && fits(self.front_limit() - LEFT_MARGIN, need)
    }

    fn write_record(&mut self, data: &[u8], len: u32) {
        let header_end = self.tail + codec::encoded_len(len);
        let mut header = &mut self.buffer[self.tail..header_end];
        codec::put_uvarint(&mut header, len);

        let end = header_end + data.len();
        self.buffer[header_end..end].copy_from_slice(data);
        self.tail = end;
    }

    fn rewind(&mut self) {
        self.head = LEFT_MARGIN;
        self.tail = LEFT_MARGIN;
        self.full = false;
        self.wrapped = false;
        self.route.clear();
    }
}

/// A gap fits a record when it is filled exactly or leaves room for at least
/// one more header.
fn fits(span: usize, need: usize) -> bool {
    span == need || span >= need + MAX_HEADER_SIZE
}

impl fmt::Debug for BytesQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BytesQueue")
            .field("capacity", &self.capacity())
            .field("max_capacity", &self.max_capacity)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("len", &self.count)
            .field("full", &self.full)
            .field("wrapped", &self.wrapped)
            .field("route", &self.route)
            .finish()
    }
}

impl<'a> IntoIterator for &'a BytesQueue {
    type Item = (EntryIndex, &'a [u8]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
