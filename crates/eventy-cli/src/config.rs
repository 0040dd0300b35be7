use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";

const DATA_DIR_ENV: &str = "EVENTY_PATH";
const LOG_ROOT_ENV: &str = "EVENTY_LOG_ROOT";

/// Default entry cap when `--max` is not given
const DEFAULT_MAX_ENTRIES: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Journal directory; defaults to `<data dir>/logs`
    pub log_root: Option<String>,

    /// Entry cap for range queries; 0 or less is unbounded
    pub max_entries: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_root: None,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl Config {
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }
}

/// Resolve the data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. EVENTY_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.eventy
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    resolve_data_dir_with(
        explicit_path,
        std::env::var(DATA_DIR_ENV).ok().as_deref(),
        dirs::data_dir(),
    )
}

fn resolve_data_dir_with(
    explicit_path: Option<&str>,
    env_path: Option<&str>,
    xdg_data_dir: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = explicit_path.or(env_path) {
        return Ok(expand_tilde(path));
    }

    if let Some(data_dir) = xdg_data_dir {
        return Ok(data_dir.join("eventy"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".eventy"));
    }

    anyhow::bail!("Could not determine data directory: no HOME directory or XDG data directory found")
}

/// Resolve the journal root based on priority:
/// `--log-root`, EVENTY_LOG_ROOT, `log_root` in config.toml, `<data dir>/logs`
pub fn resolve_log_root(explicit_path: Option<&str>, config: &Config, data_dir: &Path) -> PathBuf {
    resolve_log_root_with(
        explicit_path,
        std::env::var(LOG_ROOT_ENV).ok().as_deref(),
        config,
        data_dir,
    )
}

fn resolve_log_root_with(
    explicit_path: Option<&str>,
    env_path: Option<&str>,
    config: &Config,
    data_dir: &Path,
) -> PathBuf {
    explicit_path
        .or(env_path)
        .or(config.log_root.as_deref())
        .map(expand_tilde)
        .unwrap_or_else(|| data_dir.join("logs"))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join(CONFIG_FILE))?;
        assert_eq!(config, Config::default());
        assert_eq!(config.max_entries, 10);
        Ok(())
    }

    #[test]
    fn test_partial_config_keeps_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "log_root = \"/srv/logs\"\n")?;

        let config = Config::load_from(&path)?;
        assert_eq!(config.log_root.as_deref(), Some("/srv/logs"));
        assert_eq!(config.max_entries, 10);
        Ok(())
    }

    #[test]
    fn test_malformed_config_is_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "max_entries = \"lots\"\n")?;

        assert!(Config::load_from(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_data_dir_priority() -> Result<()> {
        let xdg = Some(PathBuf::from("/xdg"));
        assert_eq!(
            resolve_data_dir_with(Some("/explicit"), Some("/env"), xdg.clone())?,
            PathBuf::from("/explicit")
        );
        assert_eq!(
            resolve_data_dir_with(None, Some("/env"), xdg.clone())?,
            PathBuf::from("/env")
        );
        assert_eq!(
            resolve_data_dir_with(None, None, xdg)?,
            PathBuf::from("/xdg/eventy")
        );
        Ok(())
    }

    #[test]
    fn test_log_root_priority() {
        let data_dir = Path::new("/data");
        let configured = Config {
            log_root: Some("/configured".to_string()),
            ..Config::default()
        };

        assert_eq!(
            resolve_log_root_with(Some("/flag"), Some("/env"), &configured, data_dir),
            PathBuf::from("/flag")
        );
        assert_eq!(
            resolve_log_root_with(None, Some("/env"), &configured, data_dir),
            PathBuf::from("/env")
        );
        assert_eq!(
            resolve_log_root_with(None, None, &configured, data_dir),
            PathBuf::from("/configured")
        );
        assert_eq!(
            resolve_log_root_with(None, None, &Config::default(), data_dir),
            PathBuf::from("/data/logs")
        );
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/var/log"), PathBuf::from("/var/log"));
        assert_eq!(expand_tilde("relative"), PathBuf::from("relative"));
    }
}
