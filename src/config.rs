//! Engine configuration.
//!
//! Plain serde struct with builder setters. Loading from files or the
//! environment belongs to the embedding application; `from_json_str`
//! covers the common case of a JSON blob.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// How commit start times are chosen during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMode {
    /// One cursor shared by all equipment; commits never overlap in time.
    #[default]
    Global,
    /// One cursor per unit; different units may run in parallel.
    PerEquipment,
}

/// Scheduler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Hour of today used when a run gets no explicit start (0-23).
    pub default_start_hour: u32,
    /// Cursor policy.
    pub cursor_mode: CursorMode,
    /// Reject registrations whose id already exists. When false the new
    /// entity replaces the old one in place.
    pub reject_duplicates: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_start_hour: 8,
            cursor_mode: CursorMode::Global,
            reject_duplicates: true,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default start hour.
    pub fn with_default_start_hour(mut self, hour: u32) -> Self {
        self.default_start_hour = hour;
        self
    }

    /// Sets the cursor policy.
    pub fn with_cursor_mode(mut self, mode: CursorMode) -> Self {
        self.cursor_mode = mode;
        self
    }

    /// Sets duplicate handling.
    pub fn with_reject_duplicates(mut self, reject: bool) -> Self {
        self.reject_duplicates = reject;
        self
    }

    /// Parses and validates a JSON configuration. Missing fields default.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ScheduleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.default_start_hour > 23 {
            return Err(ScheduleError::Config(format!(
                "default_start_hour must be 0-23, got {}",
                self.default_start_hour
            )));
        }
        Ok(())
    }

    /// Start timestamp on `date` at the configured hour.
    pub fn start_on(&self, date: NaiveDate) -> NaiveDateTime {
        let time = NaiveTime::from_hms_opt(self.default_start_hour.min(23), 0, 0)
            .unwrap_or_default();
        date.and_time(time)
    }

    /// Start timestamp for today (local time) at the configured hour.
    pub fn default_start(&self) -> NaiveDateTime {
        self.start_on(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SchedulerConfig::default();
        assert_eq!(c.default_start_hour, 8);
        assert_eq!(c.cursor_mode, CursorMode::Global);
        assert!(c.reject_duplicates);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let c = SchedulerConfig::from_json_str(r#"{"cursor_mode": "per_equipment"}"#).unwrap();
        assert_eq!(c.cursor_mode, CursorMode::PerEquipment);
        assert_eq!(c.default_start_hour, 8);
    }

    #[test]
    fn test_from_json_invalid_hour() {
        let err = SchedulerConfig::from_json_str(r#"{"default_start_hour": 25}"#).unwrap_err();
        assert!(matches!(err, ScheduleError::Config(_)));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(SchedulerConfig::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_start_on() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let c = SchedulerConfig::new().with_default_start_hour(6);
        assert_eq!(c.start_on(date), date.and_hms_opt(6, 0, 0).unwrap());
    }
}
