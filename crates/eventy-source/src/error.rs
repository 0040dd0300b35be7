use std::fmt;

/// Result type for eventy-source operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the log source layer
#[derive(Debug)]
pub enum Error {
    /// Named log does not exist
    NotFound(String),

    /// Log (or the set of logs) exists but cannot be enumerated or opened
    Access { target: String, reason: String },

    /// A single record could not be read; the cursor has already moved past it
    Read {
        log: String,
        position: usize,
        reason: String,
    },

    /// Owner identifier could not be translated to a display name
    Resolution { owner_id: String, reason: String },

    /// IO operation failed
    Io(std::io::Error),

    /// JSON parsing failed
    Json(serde_json::Error),

    /// Walkdir error
    WalkDir(walkdir::Error),
}

impl Error {
    pub fn access(target: impl Into<String>, reason: impl fmt::Display) -> Self {
        Error::Access {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    pub fn resolution(owner_id: impl Into<String>, reason: impl fmt::Display) -> Self {
        Error::Resolution {
            owner_id: owner_id.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(log) => write!(f, "Log not found: {}", log),
            Error::Access { target, reason } => {
                write!(f, "Access denied to {}: {}", target, reason)
            }
            Error::Read {
                log,
                position,
                reason,
            } => write!(f, "Unreadable record #{} in {}: {}", position, log, reason),
            Error::Resolution { owner_id, reason } => {
                write!(f, "Cannot resolve owner {}: {}", owner_id, reason)
            }
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::WalkDir(err) => write!(f, "Directory traversal error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::NotFound(_)
            | Error::Access { .. }
            | Error::Read { .. }
            | Error::Resolution { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err)
    }
}
