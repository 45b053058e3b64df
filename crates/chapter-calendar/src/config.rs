//! Calendar configuration loaded from TOML.
//!
//! Every key is optional. The timezone is resolved into a `Tz` while
//! deserializing, so an unknown zone fails the load instead of surfacing
//! later as a wrong day key.

use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::bucket::DEFAULT_MAX_TIMED_PER_DAY;
use crate::clock::ChronoFormatter;
use crate::error::{CalendarError, Result};
use crate::lanes::LaneTieBreak;
use crate::upcoming::MAX_UPCOMING_DAYS;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Chicago;
pub const DEFAULT_LOCALE: &str = "en-US";
pub const DEFAULT_UPCOMING_DAYS: i64 = 30;
pub const DEFAULT_UPCOMING_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    /// Display timezone; day keys, grid boundaries and labels use it.
    pub timezone: Tz,
    pub locale: String,
    pub max_timed_per_day: usize,
    pub lane_tie_break: LaneTieBreak,
    pub upcoming_days: i64,
    pub upcoming_limit: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            locale: DEFAULT_LOCALE.to_string(),
            max_timed_per_day: DEFAULT_MAX_TIMED_PER_DAY,
            lane_tie_break: LaneTieBreak::default(),
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }
}

impl CalendarConfig {
    /// Parse a TOML document, filling omitted keys with defaults.
    ///
    /// # Errors
    /// Returns `CalendarError::Config` for malformed TOML, unknown keys or an
    /// unknown timezone, and `CalendarError::InvalidLocale` for an unknown locale.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut config: CalendarConfig =
            toml::from_str(source).map_err(|e| CalendarError::Config(e.to_string()))?;
        config.sanitize();
        config.formatter()?;
        Ok(config)
    }

    /// Parse the same keys from a JSON object (used by the WASM bindings).
    ///
    /// # Errors
    /// As [`CalendarConfig::from_toml_str`], with `CalendarError::Json` for
    /// malformed JSON.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let mut config: CalendarConfig = serde_json::from_str(source)?;
        config.sanitize();
        config.formatter()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    /// Returns `CalendarError::Io` if the file cannot be read, otherwise as
    /// [`CalendarConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(
            path = %path.display(),
            timezone = %config.timezone,
            locale = %config.locale,
            "loaded calendar config"
        );
        Ok(config)
    }

    /// Formatter for the configured locale.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidLocale` if the locale is unknown.
    pub fn formatter(&self) -> Result<ChronoFormatter> {
        ChronoFormatter::new(&self.locale)
    }

    fn sanitize(&mut self) {
        if self.locale.trim().is_empty() {
            tracing::warn!("empty locale in calendar config; using {DEFAULT_LOCALE}");
            self.locale = DEFAULT_LOCALE.to_string();
        }
        if self.max_timed_per_day == 0 {
            tracing::warn!("max_timed_per_day must be positive; using default");
            self.max_timed_per_day = DEFAULT_MAX_TIMED_PER_DAY;
        }
        if self.upcoming_days <= 0 {
            tracing::warn!("upcoming_days must be positive; using default");
            self.upcoming_days = DEFAULT_UPCOMING_DAYS;
        } else if self.upcoming_days > MAX_UPCOMING_DAYS {
            tracing::warn!("upcoming_days above {MAX_UPCOMING_DAYS}; capping");
            self.upcoming_days = MAX_UPCOMING_DAYS;
        }
        if self.upcoming_limit == 0 {
            tracing::warn!("upcoming_limit must be positive; using default");
            self.upcoming_limit = DEFAULT_UPCOMING_LIMIT;
        }
    }
}
