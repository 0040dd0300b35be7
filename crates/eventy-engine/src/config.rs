use crate::severity::Severity;
use crate::{Error, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Everything one run needs to know. Built once, never mutated by the engine.
#[derive(Debug, Clone, Default)]
pub struct QueryConfig {
    /// Target log; `None` means every accessible log
    pub log_name: Option<String>,
    /// Look up exactly this record instead of listing a range
    pub record_id: Option<i64>,
    /// Cap on matched entries; `None` is unbounded
    pub max_entries: Option<usize>,
    /// Read oldest to newest instead of the default newest to oldest
    pub reverse_direction: bool,
    pub query_from: Option<DateTime<Utc>>,
    pub query_to: Option<DateTime<Utc>>,
    /// Level codes to keep; empty keeps all
    pub log_levels: BTreeSet<u8>,
    pub search_terms: Vec<String>,
    /// Require every search term instead of any
    pub search_must_match_all: bool,
    pub export_path: Option<PathBuf>,
}

/// What a run does, derived from `log_name` and `record_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode<'a> {
    ListLogs,
    Range { log_name: &'a str },
    Lookup {
        record_id: i64,
        log_name: Option<&'a str>,
    },
}

impl QueryConfig {
    pub fn mode(&self) -> Mode<'_> {
        match (self.record_id, self.log_name.as_deref()) {
            (Some(record_id), log_name) => Mode::Lookup {
                record_id,
                log_name,
            },
            (None, Some(log_name)) => Mode::Range { log_name },
            (None, None) => Mode::ListLogs,
        }
    }

    /// Cursor direction handed to the log source
    pub fn newest_first(&self) -> bool {
        !self.reverse_direction
    }

    /// Add every raw code of `severity` to the level set
    pub fn add_severity(&mut self, severity: Severity) {
        self.log_levels.extend(severity.codes());
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_entries == Some(0) {
            return Err(Error::configuration("max entries must be positive"));
        }

        if let Some(name) = &self.log_name
            && name.trim().is_empty()
        {
            return Err(Error::configuration("log name must not be empty"));
        }

        if let (Some(from), Some(to)) = (self.query_from, self.query_to)
            && from > to
        {
            return Err(Error::configuration(format!(
                "--from ({}) is after --to ({})",
                from.with_timezone(&Local).format(TIMESTAMP_FORMAT),
                to.with_timezone(&Local).format(TIMESTAMP_FORMAT)
            )));
        }

        Ok(())
    }
}

/// Display format for record timestamps, also accepted for time bounds
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which end of the time window a bound closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    From,
    To,
}

/// Parse a `--from`/`--to` value given in local time
pub fn parse_time_bound(value: &str, bound: Bound) -> Result<DateTime<Utc>> {
    parse_time_bound_in(value, bound, &Local)
}

/// Parse `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS` in `tz`.
///
/// A bare date opens the window at midnight (`From`) or closes it at the
/// last instant of that day (`To`), so both ends cover whole days.
pub fn parse_time_bound_in<Tz: TimeZone>(value: &str, bound: Bound, tz: &Tz) -> Result<DateTime<Utc>> {
    let value = value.trim();

    let naive = if let Ok(dt) = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT) {
        dt
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        dt
    } else if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        let time = match bound {
            Bound::From => NaiveTime::MIN,
            Bound::To => NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
                .unwrap_or(NaiveTime::MIN),
        };
        date.and_time(time)
    } else {
        return Err(Error::configuration(format!(
            "invalid date '{}': expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS",
            value
        )));
    };

    let local = match bound {
        Bound::From => tz.from_local_datetime(&naive).earliest(),
        Bound::To => tz.from_local_datetime(&naive).latest(),
    };

    local
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| Error::configuration(format!("'{}' does not exist in local time", value)))
}

/// Parse a `--level` value: a numeric code or a severity mnemonic.
///
/// Mnemonics expand to every code of that severity, so `info` yields `[0, 4]`.
pub fn parse_level(value: &str) -> Result<Vec<u8>> {
    if let Ok(code) = value.trim().parse::<u8>() {
        return Ok(vec![code]);
    }

    Severity::from_mnemonic(value)
        .map(Severity::codes)
        .ok_or_else(|| {
            Error::configuration(format!(
                "unknown level '{}': use a number or crit, error, warn, info, verbose",
                value
            ))
        })
}

/// `--max` semantics: zero or negative means unbounded
pub fn max_entries_from(value: i64) -> Option<usize> {
    if value > 0 {
        Some(usize::try_from(value).unwrap_or(usize::MAX))
    } else {
        None
    }
}
