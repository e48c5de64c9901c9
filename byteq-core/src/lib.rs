//! byteq Core Library
//!
//! A growable ring buffer for variable-length byte records.
//!
//! # Overview
//!
//! [`BytesQueue`] stores records back to back in one contiguous buffer, each
//! framed by a uvarint length header. Every push returns an [`EntryIndex`]
//! (the record's byte offset) that gives O(1) random access until the record
//! is popped, including after the buffer grows.
//!
//! # Key Components
//!
//! - **Queue**: FIFO push/pop/peek plus indexed reads
//! - **Codec**: uvarint length prefix used to frame records
//! - **Config**: capacity and growth settings, loadable from the environment
//! - **Stats**: occupancy snapshots
//!
//! # Example
//!
//! ```
//! use byteq_core::prelude::*;
//!
//! let config = QueueConfig::unbounded(64);
//! let mut queue = BytesQueue::with_config(&config)?;
//!
//! let index = queue.push(b"hello")?;
//! queue.push(b"world")?;
//!
//! assert_eq!(queue.get(index)?, b"hello");
//! assert_eq!(queue.pop()?, b"hello");
//! assert_eq!(queue.len(), 1);
//! # Ok::<(), QueueError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod error;
pub mod prelude;
pub mod queue;
pub mod stats;
pub mod types;

// Re-export key types at crate root for convenience
pub use codec::{DecodeError, MAX_HEADER_SIZE};
pub use config::QueueConfig;
pub use error::{QueueError, Result};
pub use queue::{BytesQueue, Iter};
pub use stats::QueueStats;
pub use types::EntryIndex;
