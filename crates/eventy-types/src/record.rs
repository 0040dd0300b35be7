use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// NOTE: Record Shape
//
// Mirrors what an event log exposes per entry. Only `event_id` is guaranteed;
// every other field may be missing from the source and is rendered as a
// placeholder by the presentation layer. Sources hand records out by value,
// so a record outlives its cursor only if the engine keeps it.

/// One entry in an event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Numeric event id assigned by the provider
    pub event_id: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_id: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<Uuid>,

    /// Source subsystem that produced the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,

    /// Position of the record inside its log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<i64>,

    /// Severity code (0-5); anything else is "unknown"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_name: Option<String>,

    /// Owner identifier (raw, untranslated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Description template; `%1`..`%N` refer to `properties`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Insertion strings for `message`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opcode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,

    /// Keyword display names; `None` when the source could not provide them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl EventRecord {
    /// Create a record carrying only an event id
    pub fn new(event_id: u32) -> Self {
        Self {
            event_id,
            activity_id: None,
            process_id: None,
            thread_id: None,
            provider_id: None,
            provider_name: None,
            record_id: None,
            level: None,
            time_created: None,
            log_name: None,
            machine_name: None,
            user_id: None,
            message: None,
            properties: Vec::new(),
            opcode: None,
            task: None,
            keywords: None,
        }
    }

    /// Expand the description template with the record's insertion strings.
    ///
    /// Returns `None` when there is no template or when it references an
    /// insertion string the record does not carry.
    pub fn formatted_description(&self) -> Option<String> {
        let template = self.message.as_deref()?;
        expand_template(template, &self.properties)
    }

    /// Keyword display names, `None` when unavailable or empty
    pub fn keyword_names(&self) -> Option<&[String]> {
        match self.keywords.as_deref() {
            Some(names) if !names.is_empty() => Some(names),
            _ => None,
        }
    }
}

fn expand_template(template: &str, properties: &[String]) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(d) if d.is_ascii_digit() => {
                let mut index: usize = 0;
                while let Some(d) = chars.peek().and_then(|d| d.to_digit(10)) {
                    index = index.checked_mul(10)?.checked_add(d as usize)?;
                    chars.next();
                }
                // Insertion strings are 1-based
                let value = index.checked_sub(1).and_then(|i| properties.get(i))?;
                out.push_str(value);
            }
            _ => out.push('%'),
        }
    }

    Some(out.trim_end().to_string())
}
