//! Prelude for convenient imports.
//!
//! # Example
//!
//! ```
//! use byteq_core::prelude::*;
//! ```

// Core types
pub use crate::types::EntryIndex;

// Error handling
pub use crate::error::{QueueError, Result};

// Queue
pub use crate::config::QueueConfig;
pub use crate::queue::BytesQueue;
pub use crate::stats::QueueStats;
