//! JSON export of a run's results.
//!
//! The document is written to a temp file next to the destination and then
//! renamed over it, so a reader sees either the previous file or the whole
//! new document.

use crate::severity::Severity;
use crate::{Error, Result};
use eventy_types::EventRecord;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// An exported record: the raw fields plus the values derived for display
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord<'a> {
    #[serde(flatten)]
    pub record: &'a EventRecord,
    pub level_name: &'static str,
    pub description: Option<String>,
    pub user_name: Option<String>,
}

impl<'a> ExportRecord<'a> {
    pub fn new(record: &'a EventRecord, user_name: Option<String>) -> Self {
        Self {
            record,
            level_name: Severity::from_code(record.level).name(),
            description: record.formatted_description(),
            user_name,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Exporter {
    path: Option<PathBuf>,
}

impl Exporter {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Write `data` as pretty JSON, replacing the destination.
    ///
    /// Returns `Ok(false)` without touching the filesystem when no path is set.
    pub fn export<T: Serialize + ?Sized>(&self, data: &T) -> Result<bool> {
        let Some(path) = &self.path else {
            return Ok(false);
        };

        let failed = |reason: String| Error::Export {
            path: path.clone(),
            reason,
        };

        let json = serde_json::to_vec_pretty(data).map_err(|e| failed(e.to_string()))?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| failed(e.to_string()))?;
        temp.write_all(&json)
            .and_then(|_| temp.write_all(b"\n"))
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| failed(e.to_string()))?;
        temp.persist(path).map_err(|e| failed(e.error.to_string()))?;

        Ok(true)
    }
}
