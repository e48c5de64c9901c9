//! Strongly-typed handles for queue access.

mod index;

pub use index::EntryIndex;
