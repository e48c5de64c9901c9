//! Error types for byteq.
//!
//! Every error is recoverable: a failed push writes nothing and a failed
//! read mutates nothing, so the queue stays usable after any of them.

use crate::types::EntryIndex;
use thiserror::Error;

/// The main error type for queue operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    // =========================================================================
    // Retrieval Errors (E001-E003)
    // =========================================================================
    /// Pop, peek, get or check attempted with no live records.
    #[error("E001: Empty queue")]
    EmptyQueue,

    /// The sentinel index was passed to get or check.
    #[error("E002: Index must be greater than zero, invalid index")]
    InvalidIndex,

    /// Index at or beyond the allocated buffer.
    #[error("E003: Index {index} out of range for capacity {capacity}")]
    IndexOutOfBounds {
        /// The rejected index.
        index: EntryIndex,
        /// Allocated bytes at the time of the call.
        capacity: usize,
    },

    // =========================================================================
    // Insertion Errors (E004-E005)
    // =========================================================================
    /// Insertion would need growth beyond the configured ceiling.
    #[error("E004: Full queue, {requested} bytes requested with maximum capacity {max_capacity}")]
    FullQueue {
        /// Framed size of the rejected record.
        requested: usize,
        /// The configured ceiling.
        max_capacity: usize,
    },

    /// Payload length does not fit the 32-bit length header.
    #[error("E005: Entry of {size} bytes exceeds the maximum record size")]
    EntryTooLarge {
        /// Payload length in bytes.
        size: usize,
    },

    // =========================================================================
    // Framing Errors (E006)
    // =========================================================================
    /// The bytes at an index do not frame a record.
    #[error("E006: Malformed entry at index {index}: {cause}")]
    MalformedEntry {
        /// Index that was read.
        index: EntryIndex,
        /// What was wrong with the frame.
        cause: String,
    },

    // =========================================================================
    // Configuration Errors (E007)
    // =========================================================================
    /// Construction parameters were rejected.
    #[error("E007: Invalid queue configuration '{field}': {cause}")]
    InvalidConfig {
        /// Offending configuration field.
        field: &'static str,
        /// Why the value was rejected.
        cause: String,
    },
}

impl QueueError {
    /// Get the error code (e.g., "E004").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyQueue => "E001",
            Self::InvalidIndex => "E002",
            Self::IndexOutOfBounds { .. } => "E003",
            Self::FullQueue { .. } => "E004",
            Self::EntryTooLarge { .. } => "E005",
            Self::MalformedEntry { .. } => "E006",
            Self::InvalidConfig { .. } => "E007",
        }
    }

    /// Check if this error was caused by the capacity limits of the queue.
    ///
    /// Popping records frees space for a retried `FullQueue` push; an
    /// `EntryTooLarge` record never fits.
    #[must_use]
    pub fn is_capacity_error(&self) -> bool {
        matches!(self, Self::FullQueue { .. } | Self::EntryTooLarge { .. })
    }

    /// Check if this error was caused by a bad index argument.
    #[must_use]
    pub fn is_index_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidIndex | Self::IndexOutOfBounds { .. } | Self::MalformedEntry { .. }
        )
    }
}

/// Result type alias using `QueueError`.
pub type Result<T> = std::result::Result<T, QueueError>;
