//! Buffer growth and wrapped-region migration.

use super::bytes_queue::BytesQueue;
use crate::codec;
use crate::error::{QueueError, Result};
use std::time::Instant;

/// How [`BytesQueue::grow`] made room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Growth {
    /// The buffer was resized.
    Reallocated,
    /// The buffer was already at its ceiling; a wrapped writer moved to the
    /// unused space above the newest far-side record.
    BridgedInPlace,
}

impl BytesQueue {
    /// Grow the buffer so a record of `need` framed bytes fits at the
    /// append point.
    ///
    /// Offsets of live records never move. On error the queue is unchanged.
    pub(super) fn grow(&mut self, need: usize) -> Result<Growth> {
        let started = Instant::now();
        let previous = self.capacity();
        let append_at = self.append_point();

        let target = self.growth_target(need);
        if target < append_at + need {
            tracing::debug!(
                requested = need,
                capacity = previous,
                max_capacity = self.max_capacity,
                "Bytes queue cannot grow further"
            );
            return Err(QueueError::FullQueue {
                requested: need,
                max_capacity: self.max_capacity,
            });
        }

        let growth = if target > previous {
            self.buffer.resize(target, 0);
            self.grow_count += 1;
            Growth::Reallocated
        } else {
            Growth::BridgedInPlace
        };

        let bridged = self.wrapped;
        if bridged {
            self.bridge_gap(append_at);
        }

        let elapsed_us = started.elapsed().as_micros() as u64;
        match (growth, self.verbose) {
            (Growth::Reallocated, true) => tracing::info!(
                capacity = target,
                previous_capacity = previous,
                requested = need,
                bridged,
                elapsed_us,
                "Allocated new bytes queue"
            ),
            (Growth::Reallocated, false) => tracing::debug!(
                capacity = target,
                previous_capacity = previous,
                requested = need,
                bridged,
                elapsed_us,
                "Allocated new bytes queue"
            ),
            (Growth::BridgedInPlace, true) => tracing::info!(
                capacity = previous,
                requested = need,
                append_at,
                elapsed_us,
                "Bridged wrapped bytes queue without reallocating"
            ),
            (Growth::BridgedInPlace, false) => tracing::debug!(
                capacity = previous,
                requested = need,
                append_at,
                elapsed_us,
                "Bridged wrapped bytes queue without reallocating"
            ),
        }

        Ok(growth)
    }

    /// Double the capacity, first adding `need` if the buffer is smaller than
    /// the record, and clamp to the ceiling.
    fn growth_target(&self, need: usize) -> usize {
        let mut target = self.capacity();
        if target < need {
            target = target.saturating_add(need);
        }
        target = target.saturating_mul(2);
        if self.max_capacity > 0 {
            target = target.min(self.max_capacity);
        }
        target
    }

    /// Close the wrapped writer's run and continue at `append_at`.
    ///
    /// The free gap after tail gets a zero-length placeholder at its start
    /// so the bytes there still frame a record.
    fn bridge_gap(&mut self, append_at: usize) {
        let gap_start = self.tail;
        let gap_end = self.front_limit();

        if gap_end > gap_start {
            let mut slot = &mut self.buffer[gap_start..gap_end];
            codec::put_uvarint(&mut slot, 0);
            tracing::trace!(
                gap_start,
                gap_len = gap_end - gap_start,
                "Placed placeholder record in wrap gap"
            );
        }

        self.route.push(gap_start, append_at);
        self.tail = append_at;
        self.wrapped = false;
        self.full = false;
    }
}

#[cfg(test)]
mod tests {
    use super::Growth;
    use crate::error::QueueError;
    use crate::queue::BytesQueue;
    use crate::types::EntryIndex;

    fn idx(offset: usize) -> EntryIndex {
        EntryIndex::new(offset)
    }

    #[test]
    fn growth_keeps_indices() {
        let mut q = BytesQueue::new(16, 0, false).unwrap();
        let mut pushed = Vec::new();
        for round in 0..50u8 {
            let data = [round; 10];
            pushed.push((q.push(&data).unwrap(), data));
        }

        for (index, data) in &pushed {
            assert_eq!(q.get(*index).unwrap(), data);
        }
        assert_eq!(q.capacity(), 1024);
        assert_eq!(q.stats().grow_count, 6);
    }

    #[test]
    fn oversized_record_grows_past_double() {
        let mut q = BytesQueue::new(8, 0, false).unwrap();
        let index = q.push(&[9; 100]).unwrap();
        // (8 + 101) * 2
        assert_eq!(q.capacity(), 218);
        assert_eq!(q.get(index).unwrap(), &[9; 100][..]);
    }

    #[test]
    fn growth_while_full_preserves_order() {
        let mut q = BytesQueue::new(16, 0, false).unwrap();
        assert_eq!(q.push(b"aaaa").unwrap(), idx(1));
        assert_eq!(q.push(b"bbbb").unwrap(), idx(6));
        assert_eq!(q.push(b"cccc").unwrap(), idx(11));
        q.pop().unwrap();
        assert_eq!(q.push(b"dddd").unwrap(), idx(1));
        assert!(q.is_full());

        assert_eq!(q.push(b"ee").unwrap(), idx(16));
        assert_eq!(q.capacity(), 32);
        assert!(!q.is_full());

        let expected: [(usize, &[u8]); 4] =
            [(6, b"bbbb"), (11, b"cccc"), (1, b"dddd"), (16, b"ee")];
        for (index, data) in expected {
            assert_eq!(q.get(idx(index)).unwrap(), data);
        }
        for (_, data) in expected {
            assert_eq!(q.pop().unwrap(), data);
        }
        assert!(q.is_empty());
    }

    #[test]
    fn growth_with_gap_writes_placeholder() {
        let mut q = BytesQueue::new(16, 0, false).unwrap();
        q.push(b"aaaa").unwrap();
        q.push(b"bbbb").unwrap();
        q.push(b"cccc").unwrap();
        q.pop().unwrap();
        q.pop().unwrap();

        assert_eq!(q.push(b"d").unwrap(), idx(1));
        assert!(q.stats().wrapped);

        let big = [b'e'; 10];
        assert_eq!(q.push(&big).unwrap(), idx(16));

        // The gap now starts with an empty record.
        assert_eq!(q.get(idx(3)).unwrap(), b"");

        assert_eq!(q.pop().unwrap(), b"cccc");
        assert_eq!(q.pop().unwrap(), b"d");
        assert_eq!(q.pop().unwrap(), big);
        assert!(q.is_empty());
    }

    #[test]
    fn bounded_queue_rejects_push() {
        let mut q = BytesQueue::new(16, 16, false).unwrap();
        q.push(&[1; 10]).unwrap();

        let err = q.push(&[2; 10]).unwrap_err();
        assert_eq!(
            err,
            QueueError::FullQueue {
                requested: 11,
                max_capacity: 16
            }
        );
        assert!(err.is_capacity_error());
        assert_eq!(q.len(), 1);
        assert_eq!(q.capacity(), 16);
        assert_eq!(q.pop().unwrap(), &[1; 10][..]);
    }

    #[test]
    fn bounded_queue_grows_up_to_ceiling() {
        let mut q = BytesQueue::new(16, 48, false).unwrap();
        q.push(&[1; 10]).unwrap();
        q.push(&[2; 10]).unwrap();
        assert_eq!(q.capacity(), 32);

        q.push(&[3; 10]).unwrap();
        q.push(&[4; 10]).unwrap();
        assert_eq!(q.capacity(), 48);
        assert!(q.push(&[5; 10]).unwrap_err().is_capacity_error());
        assert_eq!(q.len(), 4);
    }

    /// Wrapped queue at its ceiling whose front gap is too small for `ff`.
    fn wrapped_at_ceiling() -> BytesQueue {
        let mut q = BytesQueue::new(32, 32, false).unwrap();
        assert_eq!(q.push(&[b'a'; 9]).unwrap(), idx(1));
        assert_eq!(q.push(&[b'b'; 9]).unwrap(), idx(11));
        assert_eq!(q.push(&[b'c'; 7]).unwrap(), idx(21));
        q.pop().unwrap();
        q.pop().unwrap();
        assert_eq!(q.push(&[b'd'; 9]).unwrap(), idx(1));
        assert_eq!(q.push(b"ee").unwrap(), idx(11));
        q
    }

    #[test]
    fn bridges_in_place_at_ceiling() {
        let mut q = wrapped_at_ceiling();

        // Seven free bytes before head: too few for a 3-byte record plus a
        // header, but [29, 32) is unused.
        assert_eq!(q.push(b"ff").unwrap(), idx(29));
        assert_eq!(q.capacity(), 32);
        assert_eq!(q.stats().grow_count, 0);
        assert!(q.stats().wrapped);
        assert_eq!(q.get(idx(14)).unwrap(), b"");

        assert_eq!(q.pop().unwrap(), [b'c'; 7]);
        assert_eq!(q.pop().unwrap(), [b'd'; 9]);
        assert_eq!(q.pop().unwrap(), b"ee");
        assert_eq!(q.pop().unwrap(), b"ff");
        assert!(q.is_empty());
    }

    #[test]
    fn growth_reports_how_room_was_made() {
        let mut q = wrapped_at_ceiling();
        assert_eq!(q.grow(3).unwrap(), Growth::BridgedInPlace);
        assert_eq!(q.stats().grow_count, 0);

        let mut q = BytesQueue::new(16, 0, false).unwrap();
        q.push(&[1; 10]).unwrap();
        assert_eq!(q.grow(11).unwrap(), Growth::Reallocated);
        assert_eq!(q.stats().grow_count, 1);
        assert_eq!(q.capacity(), 32);
    }

    #[test]
    fn verbose_growth() {
        let mut q = BytesQueue::new(4, 0, true).unwrap();
        q.push(b"grow please").unwrap();
        assert!(q.capacity() > 4);
        assert_eq!(q.stats().grow_count, 1);
    }
}
