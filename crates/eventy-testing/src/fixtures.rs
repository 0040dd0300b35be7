//! Record fixtures.
//!
//! Builders produce records the way a provider would emit them, with only the
//! fields a test cares about filled in.

use chrono::{DateTime, TimeZone, Utc};
use eventy_types::EventRecord;
use uuid::Uuid;

/// Fluent builder for [`EventRecord`]
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: EventRecord,
}

impl RecordBuilder {
    pub fn new(event_id: u32) -> Self {
        Self {
            record: EventRecord::new(event_id),
        }
    }

    /// A typical informational service record with id `record_id`
    pub fn service(record_id: i64) -> Self {
        Self::new(7036)
            .record_id(record_id)
            .level(4)
            .provider("Service Control Manager")
            .machine("WKS-01")
            .message("The %1 service entered the %2 state.", &["Spooler", "running"])
    }

    pub fn record_id(mut self, record_id: i64) -> Self {
        self.record.record_id = Some(record_id);
        self
    }

    pub fn level(mut self, level: u8) -> Self {
        self.record.level = Some(level);
        self
    }

    pub fn provider(mut self, name: &str) -> Self {
        self.record.provider_name = Some(name.to_string());
        self
    }

    pub fn provider_id(mut self, id: Uuid) -> Self {
        self.record.provider_id = Some(id);
        self
    }

    pub fn activity_id(mut self, id: Uuid) -> Self {
        self.record.activity_id = Some(id);
        self
    }

    pub fn machine(mut self, name: &str) -> Self {
        self.record.machine_name = Some(name.to_string());
        self
    }

    pub fn user(mut self, owner_id: &str) -> Self {
        self.record.user_id = Some(owner_id.to_string());
        self
    }

    pub fn log(mut self, log_name: &str) -> Self {
        self.record.log_name = Some(log_name.to_string());
        self
    }

    pub fn message(mut self, template: &str, properties: &[&str]) -> Self {
        self.record.message = Some(template.to_string());
        self.record.properties = properties.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        self.record.keywords = Some(keywords.iter().map(|k| k.to_string()).collect());
        self
    }

    pub fn created(mut self, time: DateTime<Utc>) -> Self {
        self.record.time_created = Some(time);
        self
    }

    /// Creation time at UTC midnight plus `hour` on the given day
    pub fn created_on(self, year: i32, month: u32, day: u32, hour: u32) -> Self {
        match Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).single() {
            Some(time) => self.created(time),
            None => self,
        }
    }

    pub fn build(self) -> EventRecord {
        self.record
    }
}

/// `count` service records with ids `1..=count`, one hour apart, oldest first
pub fn service_records(count: i64) -> Vec<EventRecord> {
    (1..=count)
        .map(|id| {
            let hour = u32::try_from(id % 24).unwrap_or(0);
            RecordBuilder::service(id)
                .created_on(2024, 3, 1 + u32::try_from(id / 24).unwrap_or(0), hour)
                .build()
        })
        .collect()
}
