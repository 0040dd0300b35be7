//! Record predicates.
//!
//! A record is kept only when the time window, the level set and the search
//! terms all accept it. Nothing here touches the log source: owner names are
//! asked for through a closure, and only when a search actually needs them.

use crate::config::QueryConfig;
use chrono::{DateTime, Utc};
use eventy_types::EventRecord;
use std::collections::BTreeSet;

/// Resolves an owner identifier to a display name, `None` when it cannot
pub type OwnerLookup<'r> = dyn FnMut(&str) -> Option<String> + 'r;

#[derive(Debug, Clone)]
pub struct FilterChain {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    levels: BTreeSet<u8>,
    /// Lowercased once up front
    terms: Vec<String>,
    match_all: bool,
}

impl FilterChain {
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            from: config.query_from,
            to: config.query_to,
            levels: config.log_levels.clone(),
            terms: config
                .search_terms
                .iter()
                .map(|term| term.to_lowercase())
                .collect(),
            match_all: config.search_must_match_all,
        }
    }

    pub fn keep(&self, record: &EventRecord, resolve_owner: &mut OwnerLookup<'_>) -> bool {
        self.time_window_passes(record)
            && self.level_passes(record)
            && self.search_passes(record, resolve_owner)
    }

    /// Both bounds inclusive; a record without a timestamp always passes
    pub fn time_window_passes(&self, record: &EventRecord) -> bool {
        let Some(created) = record.time_created else {
            return true;
        };

        if let Some(from) = self.from
            && created < from
        {
            return false;
        }

        if let Some(to) = self.to
            && created > to
        {
            return false;
        }

        true
    }

    pub fn level_passes(&self, record: &EventRecord) -> bool {
        if self.levels.is_empty() {
            return true;
        }

        match record.level {
            Some(level) => self.levels.contains(&level),
            None => true,
        }
    }

    pub fn search_passes(&self, record: &EventRecord, resolve_owner: &mut OwnerLookup<'_>) -> bool {
        if self.terms.is_empty() {
            return true;
        }

        let pool = search_pool(record, resolve_owner);
        let hits = self
            .terms
            .iter()
            .filter(|term| pool.iter().any(|field| field.contains(term.as_str())))
            .count();

        if self.match_all {
            hits == self.terms.len()
        } else {
            hits > 0
        }
    }
}

/// Every searchable field of `record`, lowercased
fn search_pool(record: &EventRecord, resolve_owner: &mut OwnerLookup<'_>) -> Vec<String> {
    let mut pool = vec![record.event_id.to_string()];

    pool.extend(record.activity_id.map(|id| id.to_string()));
    pool.extend(record.process_id.map(|id| id.to_string()));
    pool.extend(record.record_id.map(|id| id.to_string()));
    pool.extend(record.thread_id.map(|id| id.to_string()));
    pool.extend(record.provider_id.map(|id| id.to_string()));
    pool.extend(record.provider_name.clone());
    pool.extend(record.machine_name.clone());

    if let Some(owner_id) = &record.user_id {
        pool.push(owner_id.clone());
        pool.extend(resolve_owner(owner_id));
    }

    pool.extend(record.formatted_description());
    pool.extend(record.opcode.clone());
    pool.extend(record.task.clone());
    pool.extend(record.keyword_names().into_iter().flatten().cloned());

    pool.into_iter().map(|field| field.to_lowercase()).collect()
}
