//! eventy-engine: query orchestration over a [`eventy_source::LogSource`]
//!
//! A run takes a [`QueryConfig`], picks one of three modes (list logs, read a
//! range of entries, look up one record) and writes everything it produces
//! through a [`Reporter`]. Nothing here prints directly; a [`Terminal`]
//! decides how render tokens reach the user.

pub mod config;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod export;
pub mod filter;
pub mod format;
pub mod render;
pub mod report;
pub mod severity;

pub use config::{Bound, Mode, QueryConfig, max_entries_from, parse_level, parse_time_bound};
pub use cursor::{MAX_CONSECUTIVE_READ_FAILURES, ReadStep, ScopedCursor};
pub use engine::{ModeKind, QueryEngine, Summary};
pub use error::{Error, Result};
pub use export::{ExportRecord, Exporter};
pub use filter::FilterChain;
pub use format::{RecordFormatter, RowWidths};
pub use render::{Color, Line, Token};
pub use report::{CaptureTerminal, Reporter, Stream, Terminal, Verbosity};
pub use severity::Severity;
