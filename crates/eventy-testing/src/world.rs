//! TestWorld pattern for declarative integration test setup.
//!
//! Each world owns a temp directory holding a data directory and a journal
//! log root, and runs the `eventy` binary against them.

use anyhow::{Context, Result};
use assert_cmd::Command;
use eventy_source::{ACCOUNTS_FILE, LOG_EXTENSION};
use eventy_types::EventRecord;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use eventy_testing::{RecordBuilder, TestWorld};
///
/// let world = TestWorld::new();
/// world.write_log("Application", &[RecordBuilder::service(1).build()]).unwrap();
///
/// let result = world.run(&["Application"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    log_root: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".eventy");
        let log_root = temp_dir.path().join("logs");

        fs::create_dir_all(&data_dir).expect("Failed to create data dir");
        fs::create_dir_all(&log_root).expect("Failed to create log root");

        let mut env_vars = HashMap::new();
        // Timestamps render in local time; pin it
        env_vars.insert("TZ".to_string(), "UTC".to_string());

        Self {
            temp_dir,
            data_dir,
            log_root,
            env_vars,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_root(&self) -> &Path {
        &self.log_root
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write `records` as the journal file of `log_name`, oldest first.
    pub fn write_log(&self, log_name: &str, records: &[EventRecord]) -> Result<PathBuf> {
        let mut lines = String::new();
        for record in records {
            lines.push_str(&serde_json::to_string(record)?);
            lines.push('\n');
        }
        self.write_raw_log(log_name, &lines)
    }

    /// Write raw journal content, for corrupt or hand-shaped logs.
    pub fn write_raw_log(&self, log_name: &str, content: &str) -> Result<PathBuf> {
        let path = self
            .log_root
            .join(format!("{}.{}", log_name, LOG_EXTENSION));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(content.as_bytes())?;
        Ok(path)
    }

    /// Map owner identifiers to account names for the journal.
    pub fn write_accounts(&self, accounts: &[(&str, &str)]) -> Result<()> {
        let map: serde_json::Map<String, serde_json::Value> = accounts
            .iter()
            .map(|(id, name)| (id.to_string(), serde_json::Value::from(*name)))
            .collect();
        fs::write(
            self.log_root.join(ACCOUNTS_FILE),
            serde_json::to_string_pretty(&map)?,
        )?;
        Ok(())
    }

    /// Write `config.toml` into the data directory.
    pub fn write_config(&self, content: &str) -> Result<()> {
        fs::write(self.data_dir.join("config.toml"), content)?;
        Ok(())
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .arg("--log-root")
            .arg(&self.log_root)
            .arg("--color")
            .arg("never");

        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("EVENTY_PATH").env_remove("EVENTY_LOG_ROOT");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute `eventy` with `args` in this environment.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("eventy")
            .map_err(|e| anyhow::anyhow!("Failed to find eventy binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Non-empty stdout lines
    pub fn stdout_lines(&self) -> Vec<&str> {
        self.stdout.lines().filter(|l| !l.trim().is_empty()).collect()
    }
}
