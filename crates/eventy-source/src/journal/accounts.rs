use crate::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const ACCOUNTS_FILE: &str = "accounts.json";

const WELL_KNOWN: &[(&str, &str)] = &[
    ("S-1-5-18", "NT AUTHORITY\\SYSTEM"),
    ("S-1-5-19", "NT AUTHORITY\\LOCAL SERVICE"),
    ("S-1-5-20", "NT AUTHORITY\\NETWORK SERVICE"),
    ("S-1-5-32-544", "BUILTIN\\Administrators"),
];

/// Built-in names for identifiers every machine shares
pub(crate) fn well_known(owner_id: &str) -> Option<&'static str> {
    let key = owner_id.trim();
    WELL_KNOWN
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(key))
        .map(|(_, name)| *name)
}

/// Owner identifier -> account name table for a journal
#[derive(Debug, Default)]
pub(crate) struct AccountTable {
    entries: HashMap<String, String>,
}

impl AccountTable {
    /// Load `accounts.json` from the journal root; a missing file is an empty table
    pub(crate) fn load(root: &Path) -> Result<Self> {
        let path = root.join(ACCOUNTS_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };

        let raw: HashMap<String, String> = serde_json::from_str(&content)?;
        let entries = raw
            .into_iter()
            .map(|(id, name)| (id.to_ascii_uppercase(), name))
            .collect();

        Ok(Self { entries })
    }

    pub(crate) fn resolve(&self, owner_id: &str) -> Result<String> {
        if let Some(name) = well_known(owner_id) {
            return Ok(name.to_string());
        }

        let key = owner_id.trim().to_ascii_uppercase();
        self.entries
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::resolution(owner_id, "no such account"))
    }
}
