use crate::render::Color;

/// Severity classification of a record's level code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Error,
    Warning,
    Information,
    Verbose,
    Unknown,
}

// Code 0 is "log always", which event logs present as information
const TABLE: &[(u8, Severity)] = &[
    (0, Severity::Information),
    (1, Severity::Critical),
    (2, Severity::Error),
    (3, Severity::Warning),
    (4, Severity::Information),
    (5, Severity::Verbose),
];

impl Severity {
    pub fn from_code(code: Option<u8>) -> Self {
        code.and_then(|code| TABLE.iter().find(|(c, _)| *c == code))
            .map(|(_, severity)| *severity)
            .unwrap_or(Severity::Unknown)
    }

    /// Every raw level code that classifies as this severity
    pub fn codes(self) -> Vec<u8> {
        TABLE
            .iter()
            .filter(|(_, severity)| *severity == self)
            .map(|(code, _)| *code)
            .collect()
    }

    pub fn name(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Information => "Information",
            Severity::Verbose => "Verbose",
            Severity::Unknown => "Unknown",
        }
    }

    /// Display color; `None` renders in the terminal's default color
    pub fn color(self) -> Option<Color> {
        match self {
            Severity::Critical | Severity::Error => Some(Color::Red),
            Severity::Warning => Some(Color::Yellow),
            Severity::Verbose => Some(Color::Magenta),
            Severity::Information | Severity::Unknown => None,
        }
    }

    /// Parse a level mnemonic (`crit`, `error`, `warn`, `info`, `verbose` and long forms)
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "crit" | "critical" => Some(Severity::Critical),
            "err" | "error" => Some(Severity::Error),
            "warn" | "warning" => Some(Severity::Warning),
            "info" | "information" | "informational" => Some(Severity::Information),
            "verb" | "verbose" => Some(Severity::Verbose),
            _ => None,
        }
    }
}
