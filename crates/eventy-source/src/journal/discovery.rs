use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

pub const LOG_EXTENSION: &str = "jsonl";

/// Walk `root` and collect every log file as `(name, path)`
pub(crate) fn scan_logs(root: &Path) -> Result<Vec<(String, PathBuf)>> {
    if !root.is_dir() {
        return Err(Error::access(
            root.display().to_string(),
            "log root is not a readable directory",
        ));
    }

    let mut logs = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            // Unreadable subdirectories are simply not enumerable
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(LOG_EXTENSION) {
            continue;
        }

        if let Some(name) = log_name_for(root, path) {
            logs.push((name, path.to_path_buf()));
        }
    }

    Ok(logs)
}

/// `root/Microsoft-Windows-Sysmon/Operational.jsonl` -> `Microsoft-Windows-Sysmon/Operational`
pub(crate) fn log_name_for(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let parts: Option<Vec<&str>> = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    let parts = parts?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Map a log name back to its file below `root`; `None` for names that would escape it
pub(crate) fn path_for(root: &Path, log_name: &str) -> Option<PathBuf> {
    let parts: Vec<&str> = log_name.split('/').collect();
    if parts
        .iter()
        .any(|part| part.is_empty() || *part == "." || *part == ".." || part.contains('\\'))
    {
        return None;
    }

    let (file, dirs) = parts.split_last()?;
    let mut path = root.to_path_buf();
    path.extend(dirs);
    path.push(format!("{}.{}", file, LOG_EXTENSION));
    Some(path)
}

/// Probe whether a log holds at least one entry the caller can read.
///
/// Permission and IO failures are swallowed: such a log is not accessible.
pub(crate) fn has_entries(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };

    BufReader::new(file)
        .split(b'\n')
        .map_while(|line| line.ok())
        .any(|line| !line.trim_ascii().is_empty())
}
