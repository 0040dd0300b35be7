use crate::config::{Mode, QueryConfig};
use crate::cursor::{ReadStep, ScopedCursor};
use crate::export::{ExportRecord, Exporter};
use crate::filter::FilterChain;
use crate::format::{RecordFormatter, RowWidths};
use crate::render::Line;
use crate::report::Reporter;
use crate::Result;
use eventy_source::LogSource;
use eventy_types::{EventRecord, cmp_ignore_case};
use serde::Serialize;
use std::collections::HashMap;

/// Which of the three modes a run executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    ListLogs,
    Range,
    Lookup,
}

/// What a run did, for callers and tests. Output does not depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub mode: ModeKind,
    /// Logs whose cursor was opened
    pub logs_scanned: usize,
    /// Log names listed, entries matched or records found
    pub matched: usize,
    pub skipped_records: usize,
    /// Logs that could not be opened
    pub failed_logs: usize,
    pub exported: bool,
}

impl Summary {
    fn new(mode: ModeKind) -> Self {
        Self {
            mode,
            logs_scanned: 0,
            matched: 0,
            skipped_records: 0,
            failed_logs: 0,
            exported: false,
        }
    }
}

/// Owner names resolved during one run, failures included
#[derive(Default)]
struct OwnerNames {
    cache: HashMap<String, Option<String>>,
}

impl OwnerNames {
    fn resolve(&mut self, source: &dyn LogSource, owner_id: &str) -> Option<String> {
        if let Some(name) = self.cache.get(owner_id) {
            return name.clone();
        }

        let name = source.resolve_owner_name(owner_id).ok();
        self.cache.insert(owner_id.to_string(), name.clone());
        name
    }

    fn for_record(&mut self, source: &dyn LogSource, record: &EventRecord) -> Option<String> {
        record
            .user_id
            .as_deref()
            .and_then(|owner_id| self.resolve(source, owner_id))
    }
}

/// Runs one query against a log source
pub struct QueryEngine<'a> {
    source: &'a dyn LogSource,
}

impl<'a> QueryEngine<'a> {
    pub fn new(source: &'a dyn LogSource) -> Self {
        Self { source }
    }

    /// Execute `config` and report everything through `reporter`.
    ///
    /// Returns `Err` for an invalid configuration (before the source is
    /// touched), for a failed log enumeration, and when the log of a range
    /// query cannot be opened. Per-record and per-log failures during a run
    /// are reported and counted in the [`Summary`] instead.
    pub fn run(&self, config: &QueryConfig, reporter: &mut Reporter<'_>) -> Result<Summary> {
        config.validate()?;

        let exporter = Exporter::new(config.export_path.clone());
        let mut owners = OwnerNames::default();

        match config.mode() {
            Mode::ListLogs => self.list_logs(&exporter, reporter),
            Mode::Range { log_name } => {
                self.query_range(config, log_name, &exporter, &mut owners, reporter)
            }
            Mode::Lookup {
                record_id,
                log_name,
            } => self.lookup(config, record_id, log_name, &exporter, &mut owners, reporter),
        }
    }

    fn sorted_log_names(&self) -> Result<Vec<String>> {
        let mut names = self.source.list_accessible_logs()?;
        names.sort_by(|a, b| cmp_ignore_case(a, b));
        Ok(names)
    }

    fn list_logs(&self, exporter: &Exporter, reporter: &mut Reporter<'_>) -> Result<Summary> {
        let mut summary = Summary::new(ModeKind::ListLogs);
        let names = self.sorted_log_names()?;

        for name in &names {
            reporter.line(Line::from(name.as_str()));
        }

        summary.matched = names.len();
        reporter.info(match names.len() {
            1 => "Found 1 log.".to_string(),
            n => format!("Found {} logs.", n),
        });

        summary.exported = export(exporter, &names, reporter);
        Ok(summary)
    }

    fn query_range(
        &self,
        config: &QueryConfig,
        log_name: &str,
        exporter: &Exporter,
        owners: &mut OwnerNames,
        reporter: &mut Reporter<'_>,
    ) -> Result<Summary> {
        let mut summary = Summary::new(ModeKind::Range);
        let chain = FilterChain::new(config);
        let source = self.source;

        let mut cursor = ScopedCursor::new(source.open_cursor(log_name, config.newest_first())?);
        summary.logs_scanned = 1;
        reporter.debug(format!("Scanning {}...", cursor.log_name()));

        let mut matched: Vec<EventRecord> = Vec::new();
        loop {
            if config.max_entries.is_some_and(|max| matched.len() >= max) {
                break;
            }

            match cursor.step() {
                ReadStep::Record(record) => {
                    let keep = chain.keep(&record, &mut |owner_id: &str| {
                        owners.resolve(source, owner_id)
                    });
                    if keep {
                        matched.push(record);
                    }
                }
                ReadStep::Skipped(err) => {
                    summary.skipped_records += 1;
                    reporter.warning(format!("{}; skipped", err));
                }
                ReadStep::Aborted(err) => {
                    summary.skipped_records += 1;
                    reporter.error(format!("{}; giving up on {}", err, cursor.log_name()));
                    break;
                }
                ReadStep::Exhausted => break,
            }
        }
        drop(cursor);

        let widths = RowWidths::compute(&matched);
        for record in &matched {
            reporter.line(RecordFormatter::row(record, &widths));
        }

        summary.matched = matched.len();
        reporter.info(match matched.len() {
            0 => "No entries matched.".to_string(),
            1 => "Found 1 entry.".to_string(),
            n => format!("Found {} entries.", n),
        });

        if exporter.is_enabled() {
            let exported = export_records(&matched, owners, source);
            summary.exported = export(exporter, &exported, reporter);
        }

        Ok(summary)
    }

    fn lookup(
        &self,
        config: &QueryConfig,
        record_id: i64,
        log_name: Option<&str>,
        exporter: &Exporter,
        owners: &mut OwnerNames,
        reporter: &mut Reporter<'_>,
    ) -> Result<Summary> {
        let mut summary = Summary::new(ModeKind::Lookup);
        let source = self.source;

        let candidates = match log_name {
            Some(name) => vec![name.to_string()],
            None => self.sorted_log_names()?,
        };

        let mut found: Vec<EventRecord> = Vec::new();
        for candidate in &candidates {
            let mut cursor = match source.open_cursor(candidate, config.newest_first()) {
                Ok(cursor) => ScopedCursor::new(cursor),
                Err(err) => {
                    summary.failed_logs += 1;
                    reporter.error(err.to_string());
                    continue;
                }
            };
            summary.logs_scanned += 1;
            reporter.debug(format!("Scanning {}...", cursor.log_name()));

            loop {
                match cursor.step() {
                    ReadStep::Record(record) => {
                        if record.record_id == Some(record_id) {
                            found.push(record);
                            break;
                        }
                    }
                    ReadStep::Skipped(err) => {
                        summary.skipped_records += 1;
                        reporter.warning(format!("{}; skipped", err));
                    }
                    ReadStep::Aborted(err) => {
                        summary.skipped_records += 1;
                        reporter.error(format!("{}; giving up on {}", err, cursor.log_name()));
                        break;
                    }
                    ReadStep::Exhausted => break,
                }
            }
        }

        for (index, record) in found.iter().enumerate() {
            if index > 0 {
                reporter.line(Line::new());
            }
            let user_name = owners.for_record(source, record);
            for line in RecordFormatter::detail(record, user_name.as_deref()) {
                reporter.line(line);
            }
        }

        summary.matched = found.len();
        match (found.len(), log_name) {
            (0, Some(name)) if summary.logs_scanned == 1 => {
                reporter.error(format!("Record {} in {} not found!", record_id, name));
            }
            (0, None) => {
                reporter.info(format!(
                    "No record with id {} in {} logs.",
                    record_id,
                    summary.logs_scanned
                ));
            }
            (n, _) if n > 1 => {
                reporter.info(format!("Found {} records with id {}.", n, record_id));
            }
            _ => {}
        }

        if exporter.is_enabled() {
            let exported = export_records(&found, owners, source);
            summary.exported = export(exporter, &exported, reporter);
        }

        Ok(summary)
    }
}

fn export_records<'r>(
    records: &'r [EventRecord],
    owners: &mut OwnerNames,
    source: &dyn LogSource,
) -> Vec<ExportRecord<'r>> {
    records
        .iter()
        .map(|record| ExportRecord::new(record, owners.for_record(source, record)))
        .collect()
}

/// Export failures are reported, never fatal
fn export<T: Serialize + ?Sized>(exporter: &Exporter, data: &T, reporter: &mut Reporter<'_>) -> bool {
    match exporter.export(data) {
        Ok(written) => {
            if written && let Some(path) = exporter.path() {
                reporter.info(format!("Exported to {}.", path.display()));
            }
            written
        }
        Err(err) => {
            reporter.error(err.to_string());
            false
        }
    }
}
