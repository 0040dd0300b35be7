// Error types
pub mod error;

// Trait-based architecture (public API)
pub mod traits;

// Source implementations
pub mod journal;
pub mod memory;

pub use error::{Error, Result};
pub use journal::{ACCOUNTS_FILE, JournalCursor, JournalSource, LOG_EXTENSION};
pub use memory::{MemoryEntry, MemorySource};
pub use traits::{Cursor, LogSource};
