// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Resolved settings for recap
//!
//! Settings come from up to four layers, merged field by field with the first
//! layer that sets a value winning: command-line overrides, a JSON config
//! file, environment variables, then built-in defaults. The core only ever
//! sees the fully merged [`Settings`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveTime;
use chrono_tz::Tz;
use recap_git::expand_home;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default parent directory holding repositories
pub const DEFAULT_REPOS_DIR: &str = "~/projects";
/// Default output directory for summary files
pub const DEFAULT_OUTPUT_DIR: &str = "~/daily_summaries";
/// Default time of day for the daily run
pub const DEFAULT_SCHEDULE_TIME: &str = "18:00";
/// Default IANA timezone
pub const DEFAULT_TIMEZONE: &str = "Asia/Shanghai";
/// Default summarization model
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
/// Default Anthropic API endpoint
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// The config file is not valid JSON for the settings schema
    #[error("Invalid config file {path}: {source}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying JSON failure
        source: serde_json::Error,
    },

    /// The config file could not be written
    #[error("Failed to write config file {path}: {source}")]
    Write {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// A schedule time that is not `HH:MM`
    #[error("Invalid schedule time '{0}', expected HH:MM (24-hour)")]
    InvalidTime(String),

    /// An unknown IANA timezone id
    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    /// An environment variable with an unparseable value
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue {
        /// Variable name
        key: String,
        /// Offending value
        value: String,
    },
}

// ============================================================================
// Schedule time
// ============================================================================

/// A time of day in 24-hour `HH:MM` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleTime {
    hour: u32,
    minute: u32,
}

impl ScheduleTime {
    /// Create a schedule time, validating the ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTime` when hour or minute is out of range.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ConfigError> {
        if hour > 23 || minute > 59 {
            return Err(ConfigError::InvalidTime(format!("{hour}:{minute}")));
        }
        Ok(Self { hour, minute })
    }

    /// Hour of day, 0-23
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Minute of hour, 0-59
    #[must_use]
    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// As a naive wall-clock time
    #[must_use]
    pub fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl FromStr for ScheduleTime {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour = h.parse().map_err(|_| invalid())?;
        let minute = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Parse an IANA timezone id
///
/// # Errors
///
/// Returns `ConfigError::UnknownTimezone` for ids not in the tz database.
pub fn parse_timezone(id: &str) -> Result<Tz, ConfigError> {
    id.trim()
        .parse::<Tz>()
        .map_err(|_| ConfigError::UnknownTimezone(id.to_string()))
}

// ============================================================================
// Secrets
// ============================================================================

/// A credential that is never printed by `Debug`
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a credential
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw credential
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Fully merged settings handed to the run coordinator and scheduler
#[derive(Debug, Clone)]
pub struct Settings {
    /// Parent directory whose subdirectories are scanned
    pub repos_parent_dir: PathBuf,
    /// Explicit repository paths; when non-empty the parent directory is ignored
    pub specific_repos: Vec<PathBuf>,
    /// Author email filter; detected per repository when unset
    pub author_email: Option<String>,
    /// Time of day for the automatic run
    pub schedule_time: ScheduleTime,
    /// Timezone for "today" and the schedule
    pub timezone: Tz,
    /// Skip summarizing and persisting days without commits
    pub skip_empty_days: bool,
    /// Directory for summary files
    pub output_dir: PathBuf,
    /// Write summaries to files
    pub save_to_file: bool,
    /// Print summaries to stdout
    pub print_to_console: bool,
    /// Collect per-commit diff statistics
    pub include_diffs: bool,
    /// Summarization model id
    pub model: String,
    /// Maximum tokens in the generated summary
    pub max_tokens: u32,
    /// Anthropic API key
    pub anthropic_api_key: Option<Secret>,
    /// Anthropic API base URL
    pub anthropic_base_url: String,
    /// Save summaries to a Notion database
    pub notion_enabled: bool,
    /// Notion integration token
    pub notion_api_key: Option<Secret>,
    /// Notion database id
    pub notion_database_id: Option<String>,
    /// Timeout for the summarizer call
    pub summarizer_timeout: Duration,
    /// Timeout for each sink call
    pub sink_timeout: Duration,
    /// How often the scheduler re-checks the clock
    pub poll_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        SettingsLayer::default()
            .resolve()
            .unwrap_or_else(|_| unreachable!("built-in defaults are valid"))
    }
}

impl Settings {
    /// Parent directory to scan, unless an explicit repository list is set
    #[must_use]
    pub fn parent_dir(&self) -> Option<&Path> {
        self.specific_repos
            .is_empty()
            .then_some(self.repos_parent_dir.as_path())
    }
}

// ============================================================================
// Layers
// ============================================================================

/// One partially specified source of settings
///
/// This is also the JSON config file schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsLayer {
    /// See [`Settings::repos_parent_dir`]
    pub repos_parent_dir: Option<PathBuf>,
    /// See [`Settings::specific_repos`]
    pub specific_repos: Option<Vec<PathBuf>>,
    /// See [`Settings::author_email`]
    pub author_email: Option<String>,
    /// `HH:MM`
    pub schedule_time: Option<String>,
    /// IANA timezone id
    pub timezone: Option<String>,
    /// See [`Settings::skip_empty_days`]
    pub skip_empty_days: Option<bool>,
    /// See [`Settings::output_dir`]
    pub output_dir: Option<PathBuf>,
    /// See [`Settings::save_to_file`]
    pub save_to_file: Option<bool>,
    /// See [`Settings::print_to_console`]
    pub print_to_console: Option<bool>,
    /// See [`Settings::include_diffs`]
    pub include_diffs: Option<bool>,
    /// See [`Settings::model`]
    pub model: Option<String>,
    /// See [`Settings::max_tokens`]
    pub max_tokens: Option<u32>,
    /// See [`Settings::anthropic_api_key`]
    pub anthropic_api_key: Option<String>,
    /// See [`Settings::anthropic_base_url`]
    pub anthropic_base_url: Option<String>,
    /// See [`Settings::notion_enabled`]
    pub notion_enabled: Option<bool>,
    /// See [`Settings::notion_api_key`]
    pub notion_api_key: Option<String>,
    /// See [`Settings::notion_database_id`]
    pub notion_database_id: Option<String>,
    /// Seconds
    pub summarizer_timeout_secs: Option<u64>,
    /// Seconds
    pub sink_timeout_secs: Option<u64>,
    /// Seconds
    pub poll_interval_secs: Option<u64>,
}

impl SettingsLayer {
    /// Read a layer from a JSON config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a layer from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for unparseable booleans or numbers.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read a layer through an environment-like lookup
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for unparseable booleans or numbers.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let flag = |key: &str| get(key).map(|v| parse_bool(key, &v)).transpose();
        let number = |key: &str| {
            get(key)
                .map(|v| {
                    v.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: v.clone(),
                    })
                })
                .transpose()
        };

        Ok(Self {
            repos_parent_dir: get("RECAP_REPOS_DIR").map(PathBuf::from),
            specific_repos: get("RECAP_REPOS").map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from)
                    .collect()
            }),
            author_email: get("RECAP_AUTHOR"),
            schedule_time: get("RECAP_TIME"),
            timezone: get("RECAP_TZ"),
            skip_empty_days: flag("RECAP_SKIP_EMPTY")?,
            output_dir: get("RECAP_OUTPUT_DIR").map(PathBuf::from),
            save_to_file: flag("RECAP_SAVE_FILE")?,
            print_to_console: flag("RECAP_PRINT")?,
            include_diffs: None,
            model: get("RECAP_MODEL"),
            max_tokens: None,
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            anthropic_base_url: get("ANTHROPIC_BASE_URL"),
            notion_enabled: flag("NOTION_ENABLED")?,
            notion_api_key: get("NOTION_API_KEY"),
            notion_database_id: get("NOTION_DATABASE_ID"),
            summarizer_timeout_secs: None,
            sink_timeout_secs: None,
            poll_interval_secs: number("RECAP_POLL_SECS")?,
        })
    }

    /// Fill every unset field from `lower`
    #[must_use]
    pub fn or(self, lower: Self) -> Self {
        Self {
            repos_parent_dir: self.repos_parent_dir.or(lower.repos_parent_dir),
            specific_repos: self.specific_repos.or(lower.specific_repos),
            author_email: self.author_email.or(lower.author_email),
            schedule_time: self.schedule_time.or(lower.schedule_time),
            timezone: self.timezone.or(lower.timezone),
            skip_empty_days: self.skip_empty_days.or(lower.skip_empty_days),
            output_dir: self.output_dir.or(lower.output_dir),
            save_to_file: self.save_to_file.or(lower.save_to_file),
            print_to_console: self.print_to_console.or(lower.print_to_console),
            include_diffs: self.include_diffs.or(lower.include_diffs),
            model: self.model.or(lower.model),
            max_tokens: self.max_tokens.or(lower.max_tokens),
            anthropic_api_key: self.anthropic_api_key.or(lower.anthropic_api_key),
            anthropic_base_url: self.anthropic_base_url.or(lower.anthropic_base_url),
            notion_enabled: self.notion_enabled.or(lower.notion_enabled),
            notion_api_key: self.notion_api_key.or(lower.notion_api_key),
            notion_database_id: self.notion_database_id.or(lower.notion_database_id),
            summarizer_timeout_secs: self
                .summarizer_timeout_secs
                .or(lower.summarizer_timeout_secs),
            sink_timeout_secs: self.sink_timeout_secs.or(lower.sink_timeout_secs),
            poll_interval_secs: self.poll_interval_secs.or(lower.poll_interval_secs),
        }
    }

    /// Apply built-in defaults and validate
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an invalid schedule time or timezone.
    pub fn resolve(self) -> Result<Settings, ConfigError> {
        let schedule_time = self
            .schedule_time
            .as_deref()
            .unwrap_or(DEFAULT_SCHEDULE_TIME)
            .parse()?;
        let timezone = parse_timezone(self.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE))?;

        Ok(Settings {
            repos_parent_dir: expand_home(
                &self
                    .repos_parent_dir
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_REPOS_DIR)),
            ),
            specific_repos: self.specific_repos.unwrap_or_default(),
            author_email: self.author_email.filter(|e| !e.trim().is_empty()),
            schedule_time,
            timezone,
            skip_empty_days: self.skip_empty_days.unwrap_or(false),
            output_dir: expand_home(
                &self
                    .output_dir
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            ),
            save_to_file: self.save_to_file.unwrap_or(true),
            print_to_console: self.print_to_console.unwrap_or(true),
            include_diffs: self.include_diffs.unwrap_or(true),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: self.max_tokens.unwrap_or(2048),
            anthropic_api_key: self.anthropic_api_key.map(Secret::new),
            anthropic_base_url: self
                .anthropic_base_url
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
            notion_enabled: self.notion_enabled.unwrap_or(false),
            notion_api_key: self.notion_api_key.map(Secret::new),
            notion_database_id: self.notion_database_id,
            summarizer_timeout: Duration::from_secs(self.summarizer_timeout_secs.unwrap_or(300)),
            sink_timeout: Duration::from_secs(self.sink_timeout_secs.unwrap_or(60)),
            poll_interval: Duration::from_secs(self.poll_interval_secs.unwrap_or(30).max(1)),
        })
    }

    /// A layer spelling out the defaults, suitable for a starter config file
    #[must_use]
    pub fn sample() -> Self {
        Self {
            repos_parent_dir: Some(PathBuf::from(DEFAULT_REPOS_DIR)),
            specific_repos: Some(Vec::new()),
            author_email: None,
            schedule_time: Some(DEFAULT_SCHEDULE_TIME.to_string()),
            timezone: Some(DEFAULT_TIMEZONE.to_string()),
            skip_empty_days: Some(false),
            output_dir: Some(PathBuf::from(DEFAULT_OUTPUT_DIR)),
            save_to_file: Some(true),
            print_to_console: Some(true),
            include_diffs: Some(true),
            model: Some(DEFAULT_MODEL.to_string()),
            max_tokens: Some(2048),
            anthropic_api_key: None,
            anthropic_base_url: None,
            notion_enabled: Some(false),
            notion_api_key: None,
            notion_database_id: None,
            summarizer_timeout_secs: Some(300),
            sink_timeout_secs: Some(60),
            poll_interval_secs: Some(30),
        }
    }

    /// Write this layer as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Write` if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| write_err(e.into()))?;
        std::fs::write(path, json + "\n").map_err(write_err)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// The config file to read when none is named explicitly
///
/// `./recap.json` wins over `<config dir>/recap/config.json`; neither needs
/// to exist.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("recap.json");
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("recap").join("config.json"))
        .filter(|path| path.is_file())
}

/// Merge command-line overrides, the config file, and the environment
///
/// # Errors
///
/// Returns `ConfigError` if the config file is unreadable or any value is invalid.
pub fn load(overrides: SettingsLayer, config_file: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match config_file.map(Path::to_path_buf).or_else(default_config_file) {
        Some(path) => SettingsLayer::from_file(&path)?,
        None => SettingsLayer::default(),
    };
    overrides.or(file).or(SettingsLayer::from_env()?).resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_schedule_time_parse() {
        let t: ScheduleTime = "18:00".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (18, 0));
        let t: ScheduleTime = "7:05".parse().unwrap();
        assert_eq!(t.to_string(), "07:05");
    }

    #[test]
    fn test_schedule_time_rejects_garbage() {
        for bad in ["", "18", "24:00", "12:60", "12:5", "ab:cd", "123:00", "-1:00"] {
            assert!(bad.parse::<ScheduleTime>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.schedule_time.to_string(), "18:00");
        assert_eq!(settings.timezone, chrono_tz::Asia::Shanghai);
        assert!(!settings.skip_empty_days);
        assert!(settings.save_to_file);
        assert!(settings.print_to_console);
        assert!(!settings.notion_enabled);
        assert!(settings.specific_repos.is_empty());
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.poll_interval, Duration::from_secs(30));
        assert!(settings.repos_parent_dir.ends_with("projects"));
    }

    #[test]
    fn test_env_layer() {
        let layer = SettingsLayer::from_lookup(lookup(&[
            ("RECAP_REPOS", "/a, /b,,"),
            ("RECAP_TIME", "09:30"),
            ("RECAP_SKIP_EMPTY", "YES"),
            ("RECAP_AUTHOR", ""),
            ("NOTION_ENABLED", "0"),
            ("RECAP_POLL_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(
            layer.specific_repos,
            Some(vec![PathBuf::from("/a"), PathBuf::from("/b")])
        );
        assert_eq!(layer.schedule_time.as_deref(), Some("09:30"));
        assert_eq!(layer.skip_empty_days, Some(true));
        assert_eq!(layer.author_email, None);
        assert_eq!(layer.notion_enabled, Some(false));
        assert_eq!(layer.poll_interval_secs, Some(5));
    }

    #[test]
    fn test_env_layer_rejects_bad_bool() {
        let result = SettingsLayer::from_lookup(lookup(&[("RECAP_PRINT", "maybe")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { key, .. }) if key == "RECAP_PRINT"));
    }

    #[test]
    fn test_precedence_file_over_env_over_defaults() {
        let file = SettingsLayer {
            schedule_time: Some("20:15".into()),
            ..Default::default()
        };
        let env = SettingsLayer::from_lookup(lookup(&[
            ("RECAP_TIME", "07:00"),
            ("RECAP_TZ", "Europe/London"),
        ]))
        .unwrap();

        let settings = file.or(env).resolve().unwrap();
        assert_eq!(settings.schedule_time.to_string(), "20:15");
        assert_eq!(settings.timezone, chrono_tz::Europe::London);
        assert_eq!(settings.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_cli_overrides_win() {
        let cli = SettingsLayer {
            save_to_file: Some(false),
            ..Default::default()
        };
        let file = SettingsLayer {
            save_to_file: Some(true),
            print_to_console: Some(false),
            ..Default::default()
        };
        let settings = cli.or(file).resolve().unwrap();
        assert!(!settings.save_to_file);
        assert!(!settings.print_to_console);
    }

    #[test]
    fn test_resolve_rejects_unknown_timezone() {
        let layer = SettingsLayer {
            timezone: Some("Mars/Olympus_Mons".into()),
            ..Default::default()
        };
        assert!(matches!(layer.resolve(), Err(ConfigError::UnknownTimezone(_))));
    }

    #[test]
    fn test_parent_dir_ignored_with_explicit_repos() {
        let mut settings = Settings::default();
        assert!(settings.parent_dir().is_some());
        settings.specific_repos = vec![PathBuf::from("/repo")];
        assert!(settings.parent_dir().is_none());
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let settings = SettingsLayer {
            anthropic_api_key: Some("sk-very-secret".into()),
            ..Default::default()
        }
        .resolve()
        .unwrap();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert_eq!(
            settings.anthropic_api_key.as_ref().map(Secret::expose),
            Some("sk-very-secret")
        );
    }

    #[test]
    fn test_config_file_roundtrip_and_unknown_keys() {
        let dir = std::env::temp_dir().join(format!("recap-settings-{}", std::process::id()));
        let path = dir.join("config.json");
        SettingsLayer::sample().write_to(&path).unwrap();
        let read = SettingsLayer::from_file(&path).unwrap();
        assert_eq!(read, SettingsLayer::sample());

        std::fs::write(&path, r#"{"schedule_time": "08:00", "colour": "blue"}"#).unwrap();
        assert!(matches!(
            SettingsLayer::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = SettingsLayer::from_file(Path::new("/nonexistent/recap/config.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
