use std::fmt;
use std::path::PathBuf;

/// Result type for eventy-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
#[derive(Debug)]
pub enum Error {
    /// Query configuration is invalid; nothing was queried
    Configuration(String),

    /// Log source failure
    Source(eventy_source::Error),

    /// Export could not be serialized or written
    Export { path: PathBuf, reason: String },
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::Source(err) => write!(f, "{}", err),
            Error::Export { path, reason } => {
                write!(f, "Export to {} failed: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Source(err) => Some(err),
            Error::Configuration(_) | Error::Export { .. } => None,
        }
    }
}

impl From<eventy_source::Error> for Error {
    fn from(err: eventy_source::Error) -> Self {
        Error::Source(err)
    }
}
