use crate::{Cursor, Error, LogSource, Result};
use eventy_types::EventRecord;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

/// One slot in an in-memory log
#[derive(Debug, Clone)]
pub enum MemoryEntry {
    Record(EventRecord),
    /// A record the cursor fails to read, with the failure reason
    Unreadable(String),
}

#[derive(Debug, Clone)]
struct MemoryLog {
    name: String,
    entries: Vec<MemoryEntry>,
    denied: bool,
    /// Listed as accessible even when denied
    listed: bool,
}

/// Log source that serves logs held in memory
///
/// Entries are stored oldest first. The source keeps count of cursors that
/// are currently open so callers can check that every cursor was released.
#[derive(Debug, Default)]
pub struct MemorySource {
    logs: Vec<MemoryLog>,
    owners: HashMap<String, String>,
    enumeration_failure: Option<String>,
    open_cursors: Rc<Cell<usize>>,
    cursors_opened: Cell<usize>,
    owner_lookups: Cell<usize>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a readable log holding `records` (oldest first)
    pub fn with_log(self, name: &str, records: Vec<EventRecord>) -> Self {
        let entries = records.into_iter().map(MemoryEntry::Record).collect();
        self.with_entries(name, entries)
    }

    /// Add a readable log with explicit entries, including unreadable ones
    pub fn with_entries(mut self, name: &str, entries: Vec<MemoryEntry>) -> Self {
        self.logs.push(MemoryLog {
            name: name.to_string(),
            entries,
            denied: false,
            listed: false,
        });
        self
    }

    /// Add a log that exists but cannot be opened
    pub fn with_denied_log(mut self, name: &str) -> Self {
        self.logs.push(MemoryLog {
            name: name.to_string(),
            entries: Vec::new(),
            denied: true,
            listed: false,
        });
        self
    }

    /// Add a log that passes enumeration but then fails to open
    pub fn with_unopenable_log(mut self, name: &str) -> Self {
        self.logs.push(MemoryLog {
            name: name.to_string(),
            entries: Vec::new(),
            denied: true,
            listed: true,
        });
        self
    }

    pub fn with_owner(mut self, owner_id: &str, display_name: &str) -> Self {
        self.owners
            .insert(owner_id.to_string(), display_name.to_string());
        self
    }

    /// Make `list_accessible_logs` fail
    pub fn with_enumeration_failure(mut self, reason: &str) -> Self {
        self.enumeration_failure = Some(reason.to_string());
        self
    }

    /// Cursors opened and not yet closed
    pub fn open_cursor_count(&self) -> usize {
        self.open_cursors.get()
    }

    /// Cursors opened over the lifetime of the source
    pub fn cursors_opened(&self) -> usize {
        self.cursors_opened.get()
    }

    /// Calls made to `resolve_owner_name`
    pub fn owner_lookups(&self) -> usize {
        self.owner_lookups.get()
    }

    fn find(&self, log_name: &str) -> Option<&MemoryLog> {
        self.logs
            .iter()
            .find(|log| log.name.eq_ignore_ascii_case(log_name))
    }
}

impl LogSource for MemorySource {
    fn list_accessible_logs(&self) -> Result<Vec<String>> {
        if let Some(reason) = &self.enumeration_failure {
            return Err(Error::access("event logs", reason));
        }

        Ok(self
            .logs
            .iter()
            .filter(|log| log.listed || (!log.denied && !log.entries.is_empty()))
            .map(|log| log.name.clone())
            .collect())
    }

    fn open_cursor(&self, log_name: &str, newest_first: bool) -> Result<Box<dyn Cursor + '_>> {
        let log = self
            .find(log_name)
            .ok_or_else(|| Error::NotFound(log_name.to_string()))?;

        if log.denied {
            return Err(Error::access(&log.name, "permission denied"));
        }

        let mut entries = log.entries.clone();
        if newest_first {
            entries.reverse();
        }

        self.open_cursors.set(self.open_cursors.get() + 1);
        self.cursors_opened.set(self.cursors_opened.get() + 1);

        Ok(Box::new(MemoryCursor {
            log_name: log.name.clone(),
            entries: entries.into_iter().enumerate(),
            open_cursors: Rc::clone(&self.open_cursors),
            closed: false,
        }))
    }

    fn resolve_owner_name(&self, owner_id: &str) -> Result<String> {
        self.owner_lookups.set(self.owner_lookups.get() + 1);
        self.owners
            .get(owner_id)
            .cloned()
            .ok_or_else(|| Error::resolution(owner_id, "no such account"))
    }
}

struct MemoryCursor {
    log_name: String,
    entries: std::iter::Enumerate<std::vec::IntoIter<MemoryEntry>>,
    open_cursors: Rc<Cell<usize>>,
    closed: bool,
}

impl Cursor for MemoryCursor {
    fn log_name(&self) -> &str {
        &self.log_name
    }

    fn read_next(&mut self) -> Result<Option<EventRecord>> {
        if self.closed {
            return Ok(None);
        }

        match self.entries.next() {
            Some((_, MemoryEntry::Record(mut record))) => {
                if record.log_name.is_none() {
                    record.log_name = Some(self.log_name.clone());
                }
                Ok(Some(record))
            }
            Some((position, MemoryEntry::Unreadable(reason))) => Err(Error::Read {
                log: self.log_name.clone(),
                position: position + 1,
                reason,
            }),
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.open_cursors.set(self.open_cursors.get().saturating_sub(1));
        }
    }
}

impl Drop for MemoryCursor {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(record_id: i64) -> EventRecord {
        let mut record = EventRecord::new(1);
        record.record_id = Some(record_id);
        record
    }

    #[test]
    fn test_lists_readable_non_empty_logs() {
        let source = MemorySource::new()
            .with_log("Application", vec![record(1)])
            .with_log("Empty", vec![])
            .with_denied_log("Security");

        assert_eq!(source.list_accessible_logs().unwrap(), vec!["Application"]);
    }

    #[test]
    fn test_unopenable_log_is_listed_but_fails_to_open() {
        let source = MemorySource::new().with_unopenable_log("Broken");

        assert_eq!(source.list_accessible_logs().unwrap(), vec!["Broken"]);
        assert!(matches!(
            source.open_cursor("Broken", true),
            Err(Error::Access { .. })
        ));
    }

    #[test]
    fn test_cursor_tracks_open_count() {
        let source = MemorySource::new().with_log("Application", vec![record(1), record(2)]);

        let mut cursor = source.open_cursor("Application", true).unwrap();
        assert_eq!(source.open_cursor_count(), 1);
        assert_eq!(cursor.read_next().unwrap().unwrap().record_id, Some(2));

        cursor.close();
        cursor.close();
        assert_eq!(source.open_cursor_count(), 0);
        assert!(cursor.read_next().unwrap().is_none());

        drop(cursor);
        assert_eq!(source.open_cursor_count(), 0);
        assert_eq!(source.cursors_opened(), 1);
    }

    #[test]
    fn test_unreadable_entry_advances() {
        let source = MemorySource::new().with_entries(
            "System",
            vec![
                MemoryEntry::Unreadable("corrupt".to_string()),
                MemoryEntry::Record(record(2)),
            ],
        );

        let mut cursor = source.open_cursor("System", false).unwrap();
        assert!(matches!(cursor.read_next(), Err(Error::Read { position: 1, .. })));
        assert_eq!(cursor.read_next().unwrap().unwrap().record_id, Some(2));
    }

    #[test]
    fn test_denied_and_missing_logs() {
        let source = MemorySource::new().with_denied_log("Security");
        assert!(matches!(
            source.open_cursor("Security", false),
            Err(Error::Access { .. })
        ));
        assert!(matches!(
            source.open_cursor("Nope", false),
            Err(Error::NotFound(_))
        ));
        assert_eq!(source.open_cursor_count(), 0);
    }
}
