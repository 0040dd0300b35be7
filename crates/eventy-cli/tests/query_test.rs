use anyhow::Result;
use eventy_testing::assertions::{
    assert_exported_record_ids, assert_row_ids, assert_stderr_contains, assert_stdout_contains,
    read_export,
};
use eventy_testing::fixtures::service_records;
use eventy_testing::{RecordBuilder, TestWorld};

fn world_with_application(count: i64) -> Result<TestWorld> {
    let world = TestWorld::new();
    world.write_log("Application", &service_records(count))?;
    Ok(world)
}

#[test]
fn test_list_logs() -> Result<()> {
    let world = TestWorld::new();
    world.write_log("System", &service_records(2))?;
    world.write_log("Application", &service_records(1))?;
    world.write_raw_log("Empty", "\n")?;

    let result = world.run(&[])?;

    assert!(result.success());
    assert_eq!(
        result.stdout_lines(),
        vec!["Application", "System", "Found 2 logs."]
    );
    Ok(())
}

#[test]
fn test_nested_log_names() -> Result<()> {
    let world = TestWorld::new();
    world.write_log("Microsoft-Windows-Sysmon/Operational", &service_records(2))?;

    let result = world.run(&[])?;
    assert_stdout_contains(&result, "Microsoft-Windows-Sysmon/Operational")?;

    let result = world.run(&["Microsoft-Windows-Sysmon/Operational"])?;
    assert_row_ids(&result, &[2, 1])?;
    Ok(())
}

#[test]
fn test_range_defaults_to_ten_newest() -> Result<()> {
    let world = world_with_application(15)?;

    let result = world.run(&["Application"])?;

    assert!(result.success());
    assert_row_ids(&result, &(6..=15).rev().collect::<Vec<_>>())?;
    assert_stdout_contains(&result, "Found 10 entries.")?;
    Ok(())
}

#[test]
fn test_max_one_is_first_record() -> Result<()> {
    let world = world_with_application(15)?;

    let result = world.run(&["Application", "-m", "1"])?;

    assert_row_ids(&result, &[15])?;
    assert_stdout_contains(&result, "Found 1 entry.")?;
    Ok(())
}

#[test]
fn test_max_without_value_reads_everything_oldest_first() -> Result<()> {
    let world = world_with_application(15)?;

    let result = world.run(&["Application", "-m", "-r"])?;

    assert_row_ids(&result, &(1..=15).collect::<Vec<_>>())?;
    Ok(())
}

#[test]
fn test_config_file_sets_default_max() -> Result<()> {
    let world = world_with_application(15)?;
    world.write_config("max_entries = 3\n")?;

    let result = world.run(&["Application"])?;
    assert_row_ids(&result, &[15, 14, 13])?;
    Ok(())
}

#[test]
fn test_row_layout() -> Result<()> {
    let world = TestWorld::new();
    world.write_log(
        "Application",
        &[RecordBuilder::service(7).created_on(2024, 3, 5, 8).build()],
    )?;

    let result = world.run(&["Application"])?;

    assert_eq!(
        result.stdout_lines()[0],
        "Information #7 2024-03-05 08:00:00  7036 Service Control Manager"
    );
    Ok(())
}

#[test]
fn test_garbage_max_is_rejected_before_querying() -> Result<()> {
    let world = world_with_application(3)?;

    let result = world.run(&["Application", "-m", "abc"])?;

    assert_eq!(result.code(), Some(1));
    assert!(result.stdout().is_empty());
    assert_stderr_contains(&result, "Error: Invalid configuration: invalid --max value 'abc'")?;
    Ok(())
}

#[test]
fn test_unknown_flag_is_usage_error() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&["--bogus"])?;
    assert_eq!(result.code(), Some(2));
    Ok(())
}

#[test]
fn test_missing_log_is_reported() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["Nope"])?;

    assert!(result.success());
    assert_stderr_contains(&result, "Error: Log not found: Nope")?;
    Ok(())
}

#[test]
fn test_level_filter() -> Result<()> {
    let world = TestWorld::new();
    world.write_log(
        "System",
        &[
            RecordBuilder::new(11).record_id(1).level(2).build(),
            RecordBuilder::new(51).record_id(2).level(3).build(),
            RecordBuilder::new(7036).record_id(3).level(4).build(),
            RecordBuilder::new(6005).record_id(4).level(0).build(),
        ],
    )?;

    let result = world.run(&["System", "-l", "info"])?;
    assert_row_ids(&result, &[4, 3])?;

    let result = world.run(&["System", "-l", "error", "-l", "warn"])?;
    assert_row_ids(&result, &[2, 1])?;

    let result = world.run(&["System", "-l", "1"])?;
    assert_row_ids(&result, &[])?;
    assert_stdout_contains(&result, "No entries matched.")?;
    Ok(())
}

#[test]
fn test_date_filter_covers_whole_days() -> Result<()> {
    let world = TestWorld::new();
    world.write_log("Application", &service_records(48))?;

    let result = world.run(&["Application", "-m", "-f", "2024-03-02", "-t", "2024-03-02"])?;

    assert_row_ids(&result, &(24..=47).rev().collect::<Vec<_>>())?;
    Ok(())
}

#[test]
fn test_search_any_and_all() -> Result<()> {
    let world = TestWorld::new();
    world.write_log(
        "System",
        &[
            RecordBuilder::new(2013)
                .record_id(1)
                .message("The %1 disk is full.", &["C:"])
                .build(),
            RecordBuilder::new(2013)
                .record_id(2)
                .message("The %1 disk is healthy.", &["D:"])
                .build(),
        ],
    )?;

    let result = world.run(&["System", "-s", "disk", "-s", "full", "-a"])?;
    assert_row_ids(&result, &[1])?;

    let result = world.run(&["System", "-s", "disk", "-s", "full"])?;
    assert_row_ids(&result, &[2, 1])?;

    let result = world.run(&["System", "-s", "D:"])?;
    assert_row_ids(&result, &[2])?;
    Ok(())
}

#[test]
fn test_search_matches_resolved_owner() -> Result<()> {
    let world = TestWorld::new();
    world.write_accounts(&[("S-1-5-21-1001", "CONTOSO\\alice")])?;
    world.write_log(
        "Security",
        &[
            RecordBuilder::new(4624).record_id(1).user("S-1-5-21-1001").build(),
            RecordBuilder::new(4624).record_id(2).user("S-1-5-18").build(),
        ],
    )?;

    let result = world.run(&["Security", "-s", "alice"])?;
    assert_row_ids(&result, &[1])?;

    let result = world.run(&["Security", "-s", "system"])?;
    assert_row_ids(&result, &[2])?;
    Ok(())
}

#[test]
fn test_unreadable_record_is_skipped() -> Result<()> {
    let world = TestWorld::new();
    let mut content = String::new();
    for record in service_records(2) {
        content.push_str(&serde_json::to_string(&record)?);
        content.push('\n');
    }
    content.push_str("{\"event_id\": \n");
    world.write_raw_log("Application", &content)?;

    let result = world.run(&["Application"])?;

    assert!(result.success());
    assert_row_ids(&result, &[2, 1])?;
    assert_stderr_contains(&result, "Warning: Unreadable record #3 in Application")?;
    Ok(())
}

#[test]
fn test_export_entries() -> Result<()> {
    let world = world_with_application(15)?;
    let path = world.temp_dir().join("entries.json");
    let path_arg = path.to_string_lossy().to_string();

    let result = world.run(&["Application", "-m", "3", "-x", &path_arg])?;

    assert!(result.success());
    assert_exported_record_ids(&path, &[15, 14, 13])?;

    let json = read_export(&path)?;
    assert_eq!(json[0]["level_name"], "Information");
    assert_eq!(
        json[0]["description"],
        "The Spooler service entered the running state."
    );
    Ok(())
}

#[test]
fn test_export_log_names() -> Result<()> {
    let world = world_with_application(1)?;
    let path = world.temp_dir().join("logs.json");
    let path_arg = path.to_string_lossy().to_string();

    world.run(&["-x", &path_arg])?;

    assert_eq!(read_export(&path)?, serde_json::json!(["Application"]));
    Ok(())
}

#[test]
fn test_export_failure_is_not_fatal() -> Result<()> {
    let world = world_with_application(2)?;
    let path = world.temp_dir().join("missing").join("entries.json");
    let path_arg = path.to_string_lossy().to_string();

    let result = world.run(&["Application", "-x", &path_arg])?;

    assert!(result.success());
    assert_row_ids(&result, &[2, 1])?;
    assert_stderr_contains(&result, "Error: Export to ")?;
    Ok(())
}
