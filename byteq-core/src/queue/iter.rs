//! Borrowing iterator over live records.

use super::bytes_queue::BytesQueue;
use crate::types::EntryIndex;
use std::iter::FusedIterator;

/// Iterator over `(index, payload)` pairs from oldest to newest.
///
/// Created by [`BytesQueue::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    queue: &'a BytesQueue,
    position: usize,
    /// Route jumps already followed.
    taken: usize,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(super) fn new(queue: &'a BytesQueue) -> Self {
        Self {
            queue,
            position: queue.head,
            taken: 0,
            remaining: queue.count,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (EntryIndex, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let index = self.position;
        let Ok(frame) = self.queue.frame_at(index) else {
            self.remaining = 0;
            return None;
        };

        self.remaining -= 1;
        let (position, taken) = self.queue.route.advance(frame.end, self.taken);
        self.position = position;
        self.taken = taken;

        Some((EntryIndex::new(index), &self.queue.buffer[frame.payload()]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
