//! Common test utilities for integration tests.

#![allow(dead_code)]

use byteq_core::{BytesQueue, QueueConfig};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Route queue logs through the test harness so `--nocapture` shows them.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("byteq_core=debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// An unbounded queue with the given starting capacity.
pub fn test_queue(capacity: usize) -> BytesQueue {
    init_tracing();
    BytesQueue::with_config(&QueueConfig::unbounded(capacity)).unwrap()
}

/// A queue that may not grow past `max_capacity`.
pub fn bounded_queue(capacity: usize, max_capacity: usize) -> BytesQueue {
    init_tracing();
    BytesQueue::with_config(&QueueConfig::bounded(capacity, max_capacity)).unwrap()
}

/// Payload of `len` bytes derived from `seed`.
pub fn payload(seed: u64, len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| (seed.wrapping_mul(31).wrapping_add(i as u64) % 251) as u8)
        .collect()
}
