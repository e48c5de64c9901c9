//! Occupancy snapshot.

use serde::Serialize;

/// Point-in-time view of a queue's occupancy and growth.
///
/// Returned by [`BytesQueue::stats`](crate::BytesQueue::stats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    /// Allocated bytes.
    pub capacity: usize,
    /// Growth ceiling; zero means unbounded.
    pub max_capacity: usize,
    /// Live records.
    pub len: usize,
    /// Framed bytes (header + payload) of live records.
    pub used_bytes: usize,
    /// Bytes not held by live records, excluding the reserved first byte.
    /// Stale bytes and placeholders count as free.
    pub free_bytes: usize,
    /// Number of reallocations since creation.
    pub grow_count: u64,
    /// Whether the read route crosses the physical end of the buffer.
    pub wrapped: bool,
    /// Whether the wrapped region is full.
    pub full: bool,
}

impl QueueStats {
    /// Fraction of the usable buffer held by live records, in `[0, 1]`.
    pub fn utilization(&self) -> f64 {
        let usable = self.capacity.saturating_sub(1);
        if usable == 0 {
            return 0.0;
        }
        self.used_bytes as f64 / usable as f64
    }
}
