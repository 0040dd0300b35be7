//! Directory-backed log source.
//!
//! Every `*.jsonl` file below the root is one log, holding one JSON record
//! per line in chronological order. An optional `accounts.json` at the root
//! maps owner identifiers to account names.

mod accounts;
mod cursor;
mod discovery;

pub use accounts::ACCOUNTS_FILE;
pub use cursor::JournalCursor;
pub use discovery::LOG_EXTENSION;

use crate::{Cursor, Error, LogSource, Result};
use accounts::AccountTable;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

pub struct JournalSource {
    root: PathBuf,
    accounts: OnceCell<std::result::Result<AccountTable, String>>,
}

impl JournalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            accounts: OnceCell::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locate the file for `log_name`, falling back to a case-insensitive match.
    /// Returns the log's canonical name alongside its path.
    fn locate(&self, log_name: &str) -> Result<(String, PathBuf)> {
        let path = discovery::path_for(&self.root, log_name)
            .ok_or_else(|| Error::NotFound(log_name.to_string()))?;

        if path.is_file() {
            return Ok((log_name.to_string(), path));
        }

        let logs = discovery::scan_logs(&self.root)?;
        logs.into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(log_name))
            .ok_or_else(|| Error::NotFound(log_name.to_string()))
    }

    fn accounts(&self) -> std::result::Result<&AccountTable, &str> {
        self.accounts
            .get_or_init(|| AccountTable::load(&self.root).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(String::as_str)
    }
}

impl LogSource for JournalSource {
    fn list_accessible_logs(&self) -> Result<Vec<String>> {
        let logs = discovery::scan_logs(&self.root)?;
        Ok(logs
            .into_iter()
            .filter(|(_, path)| discovery::has_entries(path))
            .map(|(name, _)| name)
            .collect())
    }

    fn open_cursor(&self, log_name: &str, newest_first: bool) -> Result<Box<dyn Cursor + '_>> {
        let (name, path) = self.locate(log_name)?;
        let cursor = JournalCursor::open(&name, &path, newest_first)?;
        Ok(Box::new(cursor))
    }

    fn resolve_owner_name(&self, owner_id: &str) -> Result<String> {
        if let Some(name) = accounts::well_known(owner_id) {
            return Ok(name.to_string());
        }

        match self.accounts() {
            Ok(table) => table.resolve(owner_id),
            Err(reason) => Err(Error::resolution(owner_id, reason)),
        }
    }
}
