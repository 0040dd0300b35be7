use crate::config::TIMESTAMP_FORMAT;
use crate::render::{Color, Line};
use crate::severity::Severity;
use chrono::{DateTime, Local, Utc};
use eventy_types::{EventRecord, PLACEHOLDER, display_or_placeholder};

const TIMESTAMP_WIDTH: usize = 21;

/// Column widths for row mode, computed over one batch of records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWidths {
    pub level: usize,
    pub record_id: usize,
    pub event_id: usize,
}

impl RowWidths {
    pub fn compute(records: &[EventRecord]) -> Self {
        let level = records
            .iter()
            .map(|r| Severity::from_code(r.level).name().len())
            .max()
            .unwrap_or(0)
            .max("Information".len());

        // "#" prefix plus the id
        let record_id = records
            .iter()
            .map(|r| display_or_placeholder(r.record_id).len() + 1)
            .max()
            .unwrap_or(1);

        let event_id = records
            .iter()
            .map(|r| r.event_id.to_string().len())
            .max()
            .unwrap_or(0);

        Self {
            level,
            record_id,
            event_id,
        }
    }
}

pub struct RecordFormatter;

impl RecordFormatter {
    /// One table row: level, `#id`, local time, event id, provider
    pub fn row(record: &EventRecord, widths: &RowWidths) -> Line {
        let severity = Severity::from_code(record.level);
        let record_id = format!("#{}", display_or_placeholder(record.record_id));

        Line::new()
            .colored(
                severity.color(),
                format!("{:<width$}", severity.name(), width = widths.level),
            )
            .text(" ")
            .colored(
                Some(Color::Blue),
                format!("{:<width$}", record_id, width = widths.record_id + 1),
            )
            .colored(
                Some(Color::Green),
                format!(
                    "{:<width$}",
                    local_timestamp(record.time_created),
                    width = TIMESTAMP_WIDTH
                ),
            )
            .text(format!(
                "{:<width$}",
                record.event_id,
                width = widths.event_id + 1
            ))
            .text(display_or_placeholder(record.provider_name.as_deref()))
    }

    /// Key/value block followed by the description line.
    ///
    /// `user_name` is the resolved owner name, if any.
    pub fn detail(record: &EventRecord, user_name: Option<&str>) -> Vec<Line> {
        let severity = Severity::from_code(record.level);

        let fields: [(&str, String, Option<Color>); 15] = [
            ("Event Id", record.event_id.to_string(), None),
            ("Activity Id", display_or_placeholder(record.activity_id), None),
            ("Process Id", display_or_placeholder(record.process_id), None),
            ("Record Id", display_or_placeholder(record.record_id), None),
            ("Thread Id", display_or_placeholder(record.thread_id), None),
            ("Provider Id", display_or_placeholder(record.provider_id), None),
            ("Source", display_or_placeholder(record.provider_name.as_deref()), None),
            ("Level", severity.name().to_string(), severity.color()),
            ("Log Name", display_or_placeholder(record.log_name.as_deref()), None),
            ("Machine Name", display_or_placeholder(record.machine_name.as_deref()), None),
            ("User", display_or_placeholder(user_name), None),
            ("OpCode", display_or_placeholder(record.opcode.as_deref()), None),
            ("Task", display_or_placeholder(record.task.as_deref()), None),
            (
                "Keywords",
                record
                    .keyword_names()
                    .map(|names| names.join(", "))
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                None,
            ),
            ("Logged", local_timestamp(record.time_created), None),
        ];

        let key_width = fields.iter().map(|(key, _, _)| key.len()).max().unwrap_or(0);

        let mut lines: Vec<Line> = fields
            .into_iter()
            .map(|(key, value, color)| {
                Line::new()
                    .text(format!("{:<width$}: ", key, width = key_width))
                    .colored(Some(color.unwrap_or(Color::Blue)), value)
            })
            .collect();

        lines.push(Line::from(
            record
                .formatted_description()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        ));
        lines
    }
}

fn local_timestamp(time: Option<DateTime<Utc>>) -> String {
    display_or_placeholder(time.map(|t| t.with_timezone(&Local).format(TIMESTAMP_FORMAT)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> EventRecord {
        let mut record = EventRecord::new(7036);
        record.record_id = Some(42);
        record.level = Some(3);
        record.provider_name = Some("Service Control Manager".to_string());
        record.time_created = Some(Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap());
        record
    }

    #[test]
    fn test_widths_over_batch() {
        let mut wide = sample();
        wide.record_id = Some(123456);
        wide.event_id = 4;

        let widths = RowWidths::compute(&[sample(), wide]);
        assert_eq!(widths.level, "Information".len());
        assert_eq!(widths.record_id, 7);
        assert_eq!(widths.event_id, 4);
    }

    #[test]
    fn test_widths_of_empty_batch() {
        let widths = RowWidths::compute(&[]);
        assert_eq!(widths.level, "Information".len());
    }

    #[test]
    fn test_row_layout() {
        let record = sample();
        let widths = RowWidths::compute(std::slice::from_ref(&record));
        let row = RecordFormatter::row(&record, &widths).plain();

        assert!(row.starts_with("Warning     #42 "));
        assert!(row.ends_with("7036 Service Control Manager"));

        let stamp = record
            .time_created
            .unwrap()
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string();
        assert!(row.contains(&format!("{:<21}", stamp)));
    }

    #[test]
    fn test_row_colors_severity() {
        let record = sample();
        let widths = RowWidths::compute(std::slice::from_ref(&record));
        let row = RecordFormatter::row(&record, &widths);
        assert_eq!(
            row.tokens().first(),
            Some(&crate::render::Token::SetColor(Color::Yellow))
        );
    }

    #[test]
    fn test_row_colors_id_and_timestamp() {
        use crate::render::Token;

        let record = sample();
        let widths = RowWidths::compute(std::slice::from_ref(&record));
        let row = RecordFormatter::row(&record, &widths);
        let tokens = row.tokens();

        assert_eq!(tokens[4], Token::SetColor(Color::Blue));
        assert_eq!(tokens[5], Token::Text("#42 ".to_string()));
        assert_eq!(tokens[6], Token::ResetColor);
        assert_eq!(tokens[7], Token::SetColor(Color::Green));
        assert_eq!(tokens[9], Token::ResetColor);
        assert_eq!(tokens[10], Token::Text("7036 ".to_string()));
    }

    #[test]
    fn test_row_placeholders() {
        let record = EventRecord::new(1);
        let widths = RowWidths::compute(std::slice::from_ref(&record));
        let row = RecordFormatter::row(&record, &widths).plain();
        assert!(row.starts_with("Unknown     #- -"));
        assert!(row.ends_with("1 -"));
    }

    #[test]
    fn test_detail_keys_are_aligned() {
        let mut record = sample();
        record.keywords = Some(vec!["Classic".to_string(), "Audit Success".to_string()]);
        record.message = Some("The %1 service entered the %2 state.".to_string());
        record.properties = vec!["Foo".to_string(), "running".to_string()];

        let lines: Vec<String> = RecordFormatter::detail(&record, None)
            .iter()
            .map(Line::plain)
            .collect();

        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], "Event Id    : 7036");
        assert_eq!(lines[7], "Level       : Warning");
        assert_eq!(lines[9], "Machine Name: -");
        assert_eq!(lines[13], "Keywords    : Classic, Audit Success");
        assert_eq!(lines[15], "The Foo service entered the running state.");
    }

    #[test]
    fn test_detail_user_is_resolved_name() {
        let mut record = sample();
        record.user_id = Some("S-1-5-18".to_string());

        let resolved = RecordFormatter::detail(&record, Some("NT AUTHORITY\\SYSTEM"));
        assert_eq!(resolved[10].plain(), "User        : NT AUTHORITY\\SYSTEM");

        let raw = RecordFormatter::detail(&record, None);
        assert_eq!(raw[10].plain(), "User        : -");
    }

    #[test]
    fn test_detail_without_description() {
        let lines = RecordFormatter::detail(&EventRecord::new(1), None);
        assert_eq!(lines.last().map(Line::plain), Some("-".to_string()));
    }
}
