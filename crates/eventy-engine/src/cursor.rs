use eventy_source::{Cursor, Error as SourceError};
use eventy_types::EventRecord;

/// Consecutive unreadable records after which a cursor is abandoned
pub const MAX_CONSECUTIVE_READ_FAILURES: usize = 16;

/// Outcome of pulling one record through a [`ScopedCursor`]
#[derive(Debug)]
pub enum ReadStep {
    Record(EventRecord),
    /// A record could not be read and was skipped
    Skipped(SourceError),
    Exhausted,
    /// Too many consecutive failures; the cursor is closed
    Aborted(SourceError),
}

/// Cursor that is closed when it goes out of scope
pub struct ScopedCursor<'a> {
    inner: Box<dyn Cursor + 'a>,
    consecutive_failures: usize,
}

impl<'a> ScopedCursor<'a> {
    pub fn new(inner: Box<dyn Cursor + 'a>) -> Self {
        Self {
            inner,
            consecutive_failures: 0,
        }
    }

    pub fn log_name(&self) -> &str {
        self.inner.log_name()
    }

    pub fn step(&mut self) -> ReadStep {
        match self.inner.read_next() {
            Ok(Some(record)) => {
                self.consecutive_failures = 0;
                ReadStep::Record(record)
            }
            Ok(None) => {
                self.inner.close();
                ReadStep::Exhausted
            }
            Err(err) => {
                self.consecutive_failures += 1;
                if self.consecutive_failures >= MAX_CONSECUTIVE_READ_FAILURES {
                    self.inner.close();
                    ReadStep::Aborted(err)
                } else {
                    ReadStep::Skipped(err)
                }
            }
        }
    }
}

impl Drop for ScopedCursor<'_> {
    fn drop(&mut self) {
        self.inner.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventy_source::{LogSource, MemoryEntry, MemorySource};

    #[test]
    fn test_drop_releases_cursor() {
        let source = MemorySource::new().with_log("System", vec![EventRecord::new(1)]);
        {
            let cursor = ScopedCursor::new(source.open_cursor("System", true).unwrap());
            assert_eq!(cursor.log_name(), "System");
            assert_eq!(source.open_cursor_count(), 1);
        }
        assert_eq!(source.open_cursor_count(), 0);
    }

    #[test]
    fn test_skips_then_reads() {
        let source = MemorySource::new().with_entries(
            "System",
            vec![
                MemoryEntry::Record(EventRecord::new(1)),
                MemoryEntry::Unreadable("corrupt".to_string()),
            ],
        );
        let mut cursor = ScopedCursor::new(source.open_cursor("System", true).unwrap());

        assert!(matches!(cursor.step(), ReadStep::Skipped(SourceError::Read { .. })));
        assert!(matches!(cursor.step(), ReadStep::Record(r) if r.event_id == 1));
        assert!(matches!(cursor.step(), ReadStep::Exhausted));
        assert_eq!(source.open_cursor_count(), 0);
    }

    #[test]
    fn test_aborts_after_consecutive_failures() {
        let mut entries: Vec<MemoryEntry> = (0..MAX_CONSECUTIVE_READ_FAILURES)
            .map(|i| MemoryEntry::Unreadable(format!("bad {i}")))
            .collect();
        entries.push(MemoryEntry::Record(EventRecord::new(1)));
        let source = MemorySource::new().with_entries("System", entries);
        let mut cursor = ScopedCursor::new(source.open_cursor("System", false).unwrap());

        let mut skipped = 0;
        loop {
            match cursor.step() {
                ReadStep::Skipped(_) => skipped += 1,
                ReadStep::Aborted(_) => break,
                other => panic!("unexpected step: {other:?}"),
            }
        }
        assert_eq!(skipped, MAX_CONSECUTIVE_READ_FAILURES - 1);
        assert_eq!(source.open_cursor_count(), 0);
    }
}
