use crate::{Cursor, Error, Result};
use eventy_types::EventRecord;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// One non-blank line of a journal file
struct RawLine {
    /// 1-based line number in the file
    number: usize,
    bytes: Vec<u8>,
}

/// Cursor over a JSON-lines journal file
///
/// Lines are read eagerly on open so a reverse scan does not have to seek
/// backwards through the file. Each line is parsed only when it is reached.
pub struct JournalCursor {
    log_name: String,
    lines: Vec<RawLine>,
    next: usize,
    closed: bool,
}

impl JournalCursor {
    pub(crate) fn open(log_name: &str, path: &Path, newest_first: bool) -> Result<Self> {
        let content = fs::read(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::NotFound(log_name.to_string()),
            ErrorKind::PermissionDenied => Error::access(log_name, err),
            _ => Error::Io(err),
        })?;

        let mut lines: Vec<RawLine> = content
            .split(|b| *b == b'\n')
            .enumerate()
            .filter(|(_, line)| !line.trim_ascii().is_empty())
            .map(|(i, line)| RawLine {
                number: i + 1,
                bytes: line.to_vec(),
            })
            .collect();

        // Journals are written oldest first
        if newest_first {
            lines.reverse();
        }

        Ok(Self {
            log_name: log_name.to_string(),
            lines,
            next: 0,
            closed: false,
        })
    }
}

impl Cursor for JournalCursor {
    fn log_name(&self) -> &str {
        &self.log_name
    }

    fn read_next(&mut self) -> Result<Option<EventRecord>> {
        if self.closed {
            return Ok(None);
        }

        let Some(line) = self.lines.get(self.next) else {
            return Ok(None);
        };
        // Advance before parsing so a bad line is never read twice
        self.next += 1;

        match serde_json::from_slice::<EventRecord>(&line.bytes) {
            Ok(mut record) => {
                if record.log_name.is_none() {
                    record.log_name = Some(self.log_name.clone());
                }
                Ok(Some(record))
            }
            Err(err) => Err(Error::Read {
                log: self.log_name.clone(),
                position: line.number,
                reason: err.to_string(),
            }),
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.lines = Vec::new();
        }
    }
}

impl Drop for JournalCursor {
    fn drop(&mut self) {
        self.close();
    }
}
