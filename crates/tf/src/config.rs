//! Configuration file model and location.
//!
//! The file lives at `~/.config/tf/config.toml` unless `TF_CONFIG` names
//! another path or `XDG_CONFIG_HOME` moves the config root. A missing file
//! means every setting takes its default.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::commands::{CommandError, Result};

/// Schema version written to new files.
pub const CONFIG_VERSION: u32 = 1;

/// Settings read from `config.toml`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Schema version; files without one are treated as current.
    #[serde(default = "current_version")]
    pub version: u32,

    /// Task file to read when `--file` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_file: Option<String>,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub list: ListConfig,

    #[serde(default)]
    pub filter: FilterConfig,
}

fn current_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            tasks_file: None,
            output: OutputConfig::default(),
            list: ListConfig::default(),
            filter: FilterConfig::default(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Colored output; `NO_COLOR` and `--no-color` still win.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// "relative" (default) or "iso".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

/// `[list]` section.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListConfig {
    /// Result limit when `--limit` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// `[filter]` section.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Filter used by `tf list` and `tf interactive` when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Resolves the config file path: `TF_CONFIG`, then `$XDG_CONFIG_HOME/tf`,
/// then `~/.config/tf`.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os("TF_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let root = match env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) => PathBuf::from(xdg),
        None => BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".config"))
            .ok_or_else(|| CommandError::Config("cannot locate a home directory".into()))?,
    };
    Ok(root.join("tf").join("config.toml"))
}

impl Config {
    /// Loads the config from its resolved path.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Loads the config from `path`, returning defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .map_err(|e| CommandError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| CommandError::Config(format!("invalid {}: {e}", path.display())))?;

        Ok(config.upgraded())
    }

    /// Writes the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                CommandError::Config(format!("cannot create {}: {e}", dir.display()))
            })?;
        }

        let text = toml::to_string_pretty(self)
            .map_err(|e| CommandError::Config(format!("cannot encode config: {e}")))?;
        fs::write(path, text)
            .map_err(|e| CommandError::Config(format!("cannot write {}: {e}", path.display())))
    }

    /// Brings an older schema up to [`CONFIG_VERSION`].
    fn upgraded(mut self) -> Self {
        if self.version > CONFIG_VERSION {
            tracing::warn!(
                version = self.version,
                supported = CONFIG_VERSION,
                "config was written by a newer tf"
            );
        }
        self.version = CONFIG_VERSION;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    /// Sets `key` to `value` (or removes it) for the duration of `f`.
    fn with_env<F: FnOnce()>(key: &str, value: Option<&Path>, f: F) {
        let original = env::var_os(key);
        match value {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }

        f();

        match original {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.tasks_file.is_none());
        assert!(config.output.color.is_none());
        assert!(config.list.limit.is_none());
        assert!(config.filter.default.is_none());
    }

    #[test]
    fn test_parse_all_sections() {
        let text = r#"
            version = 1
            tasks_file = "/data/tasks.json"

            [output]
            color = false
            date_format = "iso"

            [list]
            limit = 10

            [filter]
            default = "done = false"
        "#;

        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.tasks_file.as_deref(), Some("/data/tasks.json"));
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.output.date_format.as_deref(), Some("iso"));
        assert_eq!(config.list.limit, Some(10));
        assert_eq!(config.filter.default.as_deref(), Some("done = false"));
    }

    #[test]
    fn test_missing_version_is_current() {
        let config: Config = toml::from_str("[list]\nlimit = 5\n").unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.filter.default.is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.list.limit = Some(7);
        config.filter.default = Some("labels like work".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.list.limit, Some(7));
        assert_eq!(loaded.filter.default.as_deref(), Some("labels like work"));
    }

    #[test]
    fn test_load_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CommandError::Config(_)));
    }

    #[test]
    fn test_newer_version_is_downgraded_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "version = 99\n").unwrap();

        assert_eq!(Config::load_from(&path).unwrap().version, CONFIG_VERSION);
    }

    #[test]
    #[serial]
    fn test_config_path_from_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        with_env("TF_CONFIG", Some(&path), || {
            assert_eq!(config_path().unwrap(), path);
        });
    }

    #[test]
    #[serial]
    fn test_config_path_from_xdg() {
        let dir = TempDir::new().unwrap();
        with_env("TF_CONFIG", None, || {
            with_env("XDG_CONFIG_HOME", Some(dir.path()), || {
                assert_eq!(
                    config_path().unwrap(),
                    dir.path().join("tf").join("config.toml")
                );
            });
        });
    }
}
