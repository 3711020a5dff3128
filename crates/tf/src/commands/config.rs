//! Config command implementation.
//!
//! `tf config show`, `tf config set <key> <value>` and `tf config path`.

use owo_colors::OwoColorize;
use task_filter_rs::filter::FilterParser;

use super::{CommandContext, CommandError, Result};
use crate::config::{config_path, Config};

/// Keys accepted by `tf config set`.
const SETTABLE_KEYS: [&str; 5] = [
    "tasks_file",
    "output.color",
    "output.date_format",
    "list.limit",
    "filter.default",
];

/// Accepted values for `output.date_format`.
const DATE_FORMATS: [&str; 2] = ["relative", "iso"];

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = config_path()?;
    let config = Config::load_from(&path)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }
    if ctx.quiet {
        return Ok(());
    }

    let title = format!("Configuration ({})", path.display());
    if ctx.use_colors {
        println!("{}", title.bold());
    } else {
        println!("{title}");
    }

    if !path.exists() {
        println!("No config file yet; defaults apply. Create one with 'tf config set'.");
        return Ok(());
    }

    let text = toml::to_string_pretty(&config)
        .map_err(|e| CommandError::Config(format!("cannot encode config: {e}")))?;
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        println!("  {line}");
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Dotted key, e.g. "list.limit".
    pub key: String,
    pub value: String,
}

/// Executes the config set command.
///
/// The value is validated before anything is written.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let path = config_path()?;
    let mut config = Config::load_from(&path)?;

    apply_setting(&mut config, &opts.key, &opts.value)?;
    config.save_to(&path)?;
    tracing::debug!(key = %opts.key, path = %path.display(), "config updated");

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("{} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Validates `value` for `key` and stores it in `config`.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "tasks_file" => config.tasks_file = Some(value.to_string()),
        "output.color" => config.output.color = Some(parse_bool(value)?),
        "output.date_format" => {
            if !DATE_FORMATS.contains(&value) {
                return Err(invalid(key, value, &DATE_FORMATS.join(", ")));
            }
            config.output.date_format = Some(value.to_string());
        }
        "list.limit" => {
            let limit = value
                .parse::<u32>()
                .map_err(|_| invalid(key, value, "a non-negative integer"))?;
            config.list.limit = Some(limit);
        }
        "filter.default" => {
            // A default that can never parse would silently list everything
            FilterParser::parse(value).map_err(|e| {
                CommandError::Config(format!("'{value}' is not a valid filter: {e}"))
            })?;
            config.filter.default = Some(value.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string);
        }
        _ => {
            return Err(CommandError::Config(format!(
                "unknown key '{key}' (expected one of: {})",
                SETTABLE_KEYS.join(", ")
            )));
        }
    }
    Ok(())
}

fn invalid(key: &str, value: &str, expected: &str) -> CommandError {
    CommandError::Config(format!("invalid {key} '{value}' (expected {expected})"))
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Parses a boolean setting, accepting true/false, yes/no, on/off and 1/0.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid("boolean", s, "true/false, yes/no, on/off or 1/0")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("YES").unwrap());
        assert!(parse_bool("on").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(!parse_bool("False").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
        assert!(parse_bool("").is_err());
    }

    #[test]
    fn test_apply_setting_valid_keys() {
        let mut config = Config::default();
        apply_setting(&mut config, "tasks_file", "/tmp/tasks.json").unwrap();
        apply_setting(&mut config, "output.color", "no").unwrap();
        apply_setting(&mut config, "output.date_format", "iso").unwrap();
        apply_setting(&mut config, "list.limit", "25").unwrap();
        apply_setting(&mut config, "filter.default", "priority >= medium").unwrap();

        assert_eq!(config.tasks_file.as_deref(), Some("/tmp/tasks.json"));
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.output.date_format.as_deref(), Some("iso"));
        assert_eq!(config.list.limit, Some(25));
        assert_eq!(config.filter.default.as_deref(), Some("priority >= medium"));
    }

    #[test]
    fn test_apply_setting_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(apply_setting(&mut config, "output.date_format", "short").is_err());
        assert!(apply_setting(&mut config, "list.limit", "-1").is_err());
        assert!(apply_setting(&mut config, "filter.default", "colour = red").is_err());
        assert!(apply_setting(&mut config, "token", "x").is_err());
        assert!(config.filter.default.is_none());
    }

    #[test]
    fn test_apply_setting_blank_filter_clears_default() {
        let mut config = Config::default();
        apply_setting(&mut config, "filter.default", "done = false").unwrap();
        apply_setting(&mut config, "filter.default", "  ").unwrap();
        assert!(config.filter.default.is_none());
    }

    #[test]
    fn test_unknown_key_lists_valid_keys() {
        let err = apply_setting(&mut Config::default(), "cache.enabled", "true").unwrap_err();
        assert!(err.to_string().contains("filter.default"));
    }
}
