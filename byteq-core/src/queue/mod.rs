//! Growable byte ring buffer with stable record indices.
//!
//! A [`BytesQueue`] packs variable-length records into one flat buffer. Each
//! push returns an [`EntryIndex`](crate::EntryIndex) that addresses the record
//! in O(1) until it is popped, including after the buffer grows.
//!
//! # Layout
//!
//! ```text
//!  0   1                                                       capacity
//! ┌───┬──────────────┬────────────────────────────┬──────────────┐
//! │ × │ free         │ [len][data] [len][data] …   │ free         │
//! └───┴──────────────┴────────────────────────────┴──────────────┘
//!                    ↑ head                        ↑ tail
//! ```
//!
//! Offset 0 is never used so that index 0 can mean "no entry". Once the space
//! after `tail` runs out, new records wrap to offset 1 if they fit before the
//! lowest live record:
//!
//! ```text
//! ┌───┬─────────────┬───────────┬──────────────────┬─────────┐
//! │ × │ newer …     │ free gap  │ older …          │ stale   │
//! └───┴─────────────┴───────────┴──────────────────┴─────────┘
//!                   ↑ tail      ↑ head             ↑ jump
//! ```
//!
//! The reader follows a route of jumps: each jump says where the next run of
//! records starts once the reader reaches the end of the current one.
//!
//! # Growth
//!
//! When no slot fits, the buffer doubles in place so every record keeps its
//! offset. A wrapped writer is *bridged*: a zero-length placeholder is
//! written at the start of the gap and new records are appended above the
//! newest far-side record. The reader then walks older, newer, appended:
//!
//! ```text
//! ┌───┬─────────────┬─┬─────────┬──────────────────┬──────────┬────────┐
//! │ × │ newer (2)   │0│ gap     │ older (1)        │ appended │ free   │
//! └───┴─────────────┴─┴─────────┴──────────────────┴──────────┴────────┘
//!                   ↑ jump      ↑ head             ↑ jump     ↑ tail
//! ```
//!
//! The writer may wrap again while the reader is still on a bridged route,
//! as long as the front of the buffer is free up to the lowest live record.

mod bytes_queue;
mod growth;
mod iter;
mod route;

pub use bytes_queue::BytesQueue;
pub use iter::Iter;
