//! Timeline configuration file and environment variable handling.
//!
//! Configuration layers a TOML file with environment overrides. Field
//! accessors can only be configured by name here; derivation functions are
//! supplied programmatically through [`crate::engine::EngineOptions`].

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::time::TimeUnit;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment value for {variable}: {message}")]
    Env { variable: String, message: String },
}

/// Timeline configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub timeline: TimelineSettings,
    #[serde(default)]
    pub fields: FieldSettings,
}

/// Window and granularity settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSettings {
    /// Granularity unit for the bucket sequence
    #[serde(default = "default_unit")]
    pub unit: TimeUnit,
    /// Months before "now" covered by the default window
    #[serde(default = "default_window_months")]
    pub months_before: u32,
    /// Months after "now" covered by the default window
    #[serde(default = "default_window_months")]
    pub months_after: u32,
    /// Render records without dates as rows with an undefined position
    #[serde(default)]
    pub force_unscheduled: bool,
}

/// Field name settings for the record accessors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSettings {
    #[serde(default = "default_id_field")]
    pub id: String,
    #[serde(default = "default_label_field")]
    pub label: String,
    #[serde(default = "default_start_field")]
    pub start: String,
    #[serde(default = "default_end_field")]
    pub end: String,
}

fn default_unit() -> TimeUnit {
    TimeUnit::Month
}

fn default_window_months() -> u32 {
    3
}

fn default_id_field() -> String {
    "id".to_string()
}

fn default_label_field() -> String {
    "title".to_string()
}

fn default_start_field() -> String {
    "startDate".to_string()
}

fn default_end_field() -> String {
    "dueDate".to_string()
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            months_before: default_window_months(),
            months_after: default_window_months(),
            force_unscheduled: false,
        }
    }
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            id: default_id_field(),
            label: default_label_field(),
            start: default_start_field(),
            end: default_end_field(),
        }
    }
}

impl TimelineConfig {
    /// Load configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply environment variable overrides.
    ///
    /// # Environment Variables
    /// - `TIMELINE_UNIT` (optional): `day` | `week` | `month` | `quarter`
    /// - `TIMELINE_MONTHS_BEFORE` (optional): window months before now
    /// - `TIMELINE_MONTHS_AFTER` (optional): window months after now
    /// - `TIMELINE_FORCE_UNSCHEDULED` (optional): `true` | `false`
    ///
    /// # Errors
    /// Returns an error when a set variable has an unparseable value.
    pub fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(raw) = env::var("TIMELINE_UNIT") {
            self.timeline.unit = match raw.to_lowercase().as_str() {
                "day" => TimeUnit::Day,
                "week" => TimeUnit::Week,
                "month" => TimeUnit::Month,
                "quarter" => TimeUnit::Quarter,
                other => {
                    return Err(ConfigError::Env {
                        variable: "TIMELINE_UNIT".to_string(),
                        message: format!(
                            "'{}' is not one of day, week, month, quarter",
                            other
                        ),
                    })
                }
            };
        }
        if let Ok(raw) = env::var("TIMELINE_MONTHS_BEFORE") {
            self.timeline.months_before = parse_env_var("TIMELINE_MONTHS_BEFORE", &raw)?;
        }
        if let Ok(raw) = env::var("TIMELINE_MONTHS_AFTER") {
            self.timeline.months_after = parse_env_var("TIMELINE_MONTHS_AFTER", &raw)?;
        }
        if let Ok(raw) = env::var("TIMELINE_FORCE_UNSCHEDULED") {
            self.timeline.force_unscheduled = parse_env_var("TIMELINE_FORCE_UNSCHEDULED", &raw)?;
        }
        Ok(self)
    }
}

fn parse_env_var<T: std::str::FromStr>(variable: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Env {
        variable: variable.to_string(),
        message: e.to_string(),
    })
}
