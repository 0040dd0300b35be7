//! Custom assertions for eventy output.

use crate::world::CliResult;
use anyhow::{Context, Result};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Assert that stdout contains `needle`.
pub fn assert_stdout_contains(result: &CliResult, needle: &str) -> Result<()> {
    if !predicate::str::contains(needle).eval(result.stdout()) {
        anyhow::bail!(
            "Expected stdout to contain {:?}\nstdout:\n{}\nstderr:\n{}",
            needle,
            result.stdout(),
            result.stderr()
        );
    }
    Ok(())
}

/// Assert that stderr contains `needle`.
pub fn assert_stderr_contains(result: &CliResult, needle: &str) -> Result<()> {
    if !predicate::str::contains(needle).eval(result.stderr()) {
        anyhow::bail!(
            "Expected stderr to contain {:?}\nstderr:\n{}",
            needle,
            result.stderr()
        );
    }
    Ok(())
}

/// Record ids of the table rows in stdout, in printed order.
///
/// Rows are recognized by their `#<id>` column.
pub fn row_ids(result: &CliResult) -> Vec<i64> {
    result
        .stdout()
        .lines()
        .filter_map(|line| {
            line.split_whitespace()
                .find_map(|field| field.strip_prefix('#'))
                .and_then(|id| id.parse().ok())
        })
        .collect()
}

/// Assert the table rows carry exactly `expected` record ids, in order.
pub fn assert_row_ids(result: &CliResult, expected: &[i64]) -> Result<()> {
    let actual = row_ids(result);
    if actual != expected {
        anyhow::bail!(
            "Expected rows {:?}, got {:?}\nstdout:\n{}",
            expected,
            actual,
            result.stdout()
        );
    }
    Ok(())
}

/// Read an exported JSON document.
pub fn read_export(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Export file {} missing", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Export file {} is not JSON", path.display()))
}

/// Assert an exported record array holds exactly the `expected` record ids.
pub fn assert_exported_record_ids(path: &Path, expected: &[i64]) -> Result<()> {
    let json = read_export(path)?;
    let records = json.as_array().context("Expected a JSON array")?;

    let ids = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            record["record_id"]
                .as_i64()
                .with_context(|| format!("Exported record {} missing record_id", i))
        })
        .collect::<Result<Vec<_>>>()?;

    if ids != expected {
        anyhow::bail!("Expected exported ids {:?}, got {:?}", expected, ids);
    }
    Ok(())
}
