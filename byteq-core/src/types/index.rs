//! Record index handle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a record inside a [`BytesQueue`](crate::BytesQueue).
///
/// This is the byte offset of the record's length header in the backing
/// buffer. Offset `0` is reserved as the null index, so every index returned
/// by a push is at least `1`. An index stays valid until its record is popped,
/// including across buffer growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryIndex(usize);

impl EntryIndex {
    /// The null/invalid index.
    pub const NULL: Self = Self(0);

    /// The first index a record can occupy.
    pub const FIRST: Self = Self(1);

    /// Create a new entry index.
    #[must_use]
    pub const fn new(offset: usize) -> Self {
        Self(offset)
    }

    /// Get the raw byte offset.
    #[must_use]
    pub const fn as_usize(&self) -> usize {
        self.0
    }

    /// Get the raw byte offset as `u64`.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0 as u64
    }

    /// Check if this is the null index.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for EntryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl From<usize> for EntryIndex {
    fn from(offset: usize) -> Self {
        Self(offset)
    }
}

impl From<EntryIndex> for usize {
    fn from(index: EntryIndex) -> Self {
        index.0
    }
}

impl Default for EntryIndex {
    fn default() -> Self {
        Self::NULL
    }
}
