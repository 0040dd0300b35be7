use crate::Result;
use eventy_types::EventRecord;

/// Access to a set of named event logs
///
/// Responsibilities:
/// - Enumerate the logs the caller can actually read
/// - Open forward or reverse cursors over one log
/// - Translate owner identifiers to account names
pub trait LogSource {
    /// Names of logs that hold entries the caller may read.
    ///
    /// A log that fails a permission probe is left out instead of failing
    /// the whole call. Order is unspecified.
    fn list_accessible_logs(&self) -> Result<Vec<String>>;

    /// Open a cursor over `log_name`, newest record first when `newest_first`
    fn open_cursor(&self, log_name: &str, newest_first: bool) -> Result<Box<dyn Cursor + '_>>;

    /// Translate an owner identifier into a display name
    fn resolve_owner_name(&self, owner_id: &str) -> Result<String>;
}

/// Stateful handle over one log
///
/// A `Read` error must leave the cursor positioned after the failing record,
/// so calling `read_next` again always makes progress.
pub trait Cursor {
    /// Name of the log this cursor reads
    fn log_name(&self) -> &str;

    /// Next record, `None` once exhausted
    fn read_next(&mut self) -> Result<Option<EventRecord>>;

    /// Release the cursor. Idempotent; reads after close report exhaustion.
    fn close(&mut self);
}
