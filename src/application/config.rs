use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::rotation::DutyRotation;
use crate::domain::schedule::WeeklySlot;
use crate::domain::value_objects::{AlertThresholds, FeedFormat};

/// Environment variable holding the Telegram bot token.
pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";
/// Environment variable holding the destination chat id.
pub const ENV_CHAT_ID: &str = "GROUP_ID";
/// Environment variable overriding the feed URL.
pub const ENV_FEED_URL: &str = "SAUNABOT_FEED_URL";

/// Upper bound for the staleness window (one week).
const MAX_STALE_AFTER_MINS: u32 = 7 * 24 * 60;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("bot token missing: set {ENV_BOT_TOKEN} or [telegram].bot_token")]
    MissingBotToken,
    #[error("destination chat missing: set {ENV_CHAT_ID} or [telegram].chat_id")]
    MissingChatId,
    #[error("reset threshold ({reset}°C) must be below hot threshold ({hot}°C)")]
    InvalidThresholds { hot: f64, reset: f64 },
    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),
    #[error("stale_after_mins must be at most {MAX_STALE_AFTER_MINS}, got {0}")]
    StaleWindowTooLong(u32),
    #[error("invalid feed URL '{0}': expected an http(s) URL")]
    InvalidFeedUrl(String),
    #[error("invalid duty weekday '{0}'")]
    InvalidWeekday(String),
    #[error("invalid duty time '{0}': expected HH:MM")]
    InvalidTime(String),
}

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub duty: DutyConfig,
}

/// Temperature feed endpoint and layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_url")]
    pub url: String,
    #[serde(default)]
    pub format: FeedFormat,
    #[serde(default = "default_feed_timeout")]
    pub timeout_secs: u64,
}

/// Polling cadence, hysteresis band and freshness window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_hot_threshold")]
    pub hot_threshold: f64,
    #[serde(default = "default_reset_threshold")]
    pub reset_threshold: f64,
    #[serde(default = "default_stale_after")]
    pub stale_after_mins: u32,
}

/// Bot API access. Credentials usually come from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_long_poll")]
    pub long_poll_secs: u64,
}

/// Weekly duty rotation announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_weekday")]
    pub weekday: String,
    #[serde(default = "default_time")]
    pub time: String,
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    #[serde(default = "default_offset")]
    pub offset: i64,
    #[serde(default = "default_cycle_len")]
    pub cycle_len: u32,
}

/// Validated Bot API credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct TelegramCredentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramCredentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

// --- Defaults ---

fn default_feed_url() -> String {
    "https://api.thingspeak.com/channels/1068855/fields/1.csv".into()
}

const fn default_feed_timeout() -> u64 {
    10
}

const fn default_poll_interval() -> u64 {
    60
}

const fn default_hot_threshold() -> f64 {
    70.0
}

const fn default_reset_threshold() -> f64 {
    65.0
}

const fn default_stale_after() -> u32 {
    60
}

fn default_api_url() -> String {
    "https://api.telegram.org".into()
}

const fn default_request_timeout() -> u64 {
    10
}

const fn default_long_poll() -> u64 {
    30
}

const fn default_true() -> bool {
    true
}

fn default_weekday() -> String {
    "Mon".into()
}

fn default_time() -> String {
    "10:00".into()
}

// First Monday of 2021.
fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 4).unwrap_or_default()
}

const fn default_offset() -> i64 {
    4
}

const fn default_cycle_len() -> u32 {
    21
}

// --- Default impls ---

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            format: FeedFormat::default(),
            timeout_secs: default_feed_timeout(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            hot_threshold: default_hot_threshold(),
            reset_threshold: default_reset_threshold(),
            stale_after_mins: default_stale_after(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            bot_token: None,
            chat_id: None,
            timeout_secs: default_request_timeout(),
            long_poll_secs: default_long_poll(),
        }
    }
}

impl Default for DutyConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            weekday: default_weekday(),
            time: default_time(),
            start_date: default_start_date(),
            offset: default_offset(),
            cycle_len: default_cycle_len(),
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Default location: `<config dir>/saunabot/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("saunabot").join("config.toml"))
    }

    /// Overlay values from the process environment.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_env(|key| std::env::var(key).ok());
        self
    }

    /// Overlay values from `lookup`; empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(token) = get(ENV_BOT_TOKEN) {
            self.telegram.bot_token = Some(token);
        }
        if let Some(chat_id) = get(ENV_CHAT_ID) {
            self.telegram.chat_id = Some(chat_id);
        }
        if let Some(url) = get(ENV_FEED_URL) {
            self.feed.url = url;
        }
    }

    /// Check everything except credentials.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.feed.url)
            .map_err(|_| ConfigError::InvalidFeedUrl(self.feed.url.clone()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidFeedUrl(self.feed.url.clone()));
        }
        if self.feed.timeout_secs == 0 {
            return Err(ConfigError::ZeroValue("feed.timeout_secs"));
        }
        if self.alerts.poll_interval_secs == 0 {
            return Err(ConfigError::ZeroValue("alerts.poll_interval_secs"));
        }
        if self.alerts.stale_after_mins == 0 {
            return Err(ConfigError::ZeroValue("alerts.stale_after_mins"));
        }
        if self.alerts.stale_after_mins > MAX_STALE_AFTER_MINS {
            return Err(ConfigError::StaleWindowTooLong(self.alerts.stale_after_mins));
        }
        let thresholds = AlertThresholds::from(&self.alerts);
        // Also rejects NaN thresholds.
        if thresholds.reset.partial_cmp(&thresholds.hot) != Some(std::cmp::Ordering::Less) {
            return Err(ConfigError::InvalidThresholds {
                hot: thresholds.hot,
                reset: thresholds.reset,
            });
        }
        if self.telegram.timeout_secs == 0 {
            return Err(ConfigError::ZeroValue("telegram.timeout_secs"));
        }
        if self.duty.enabled {
            self.duty_slot()?;
            self.duty_rotation()?;
        }
        Ok(())
    }

    /// Credentials required to talk to the chat.
    ///
    /// # Errors
    ///
    /// Returns `MissingBotToken` or `MissingChatId` if either is absent or blank.
    pub fn telegram_credentials(&self) -> Result<TelegramCredentials, ConfigError> {
        let present = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let bot_token = present(&self.telegram.bot_token).ok_or(ConfigError::MissingBotToken)?;
        let chat_id = present(&self.telegram.chat_id).ok_or(ConfigError::MissingChatId)?;
        Ok(TelegramCredentials { bot_token, chat_id })
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.alerts.poll_interval_secs)
    }

    #[must_use]
    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed.timeout_secs)
    }

    #[must_use]
    pub fn telegram_timeout(&self) -> Duration {
        Duration::from_secs(self.telegram.timeout_secs)
    }

    #[must_use]
    pub fn long_poll(&self) -> Duration {
        Duration::from_secs(self.telegram.long_poll_secs)
    }

    #[must_use]
    pub fn stale_after(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(
            self.alerts.stale_after_mins.min(MAX_STALE_AFTER_MINS),
        ))
    }

    /// # Errors
    ///
    /// Returns `InvalidWeekday` or `InvalidTime` for unparseable values.
    pub fn duty_slot(&self) -> Result<WeeklySlot, ConfigError> {
        let weekday: Weekday = self
            .duty
            .weekday
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidWeekday(self.duty.weekday.clone()))?;
        let time = NaiveTime::parse_from_str(self.duty.time.trim(), "%H:%M")
            .map_err(|_| ConfigError::InvalidTime(self.duty.time.clone()))?;
        Ok(WeeklySlot::new(weekday, time))
    }

    /// # Errors
    ///
    /// Returns `ZeroValue` if `duty.cycle_len` is zero.
    pub fn duty_rotation(&self) -> Result<DutyRotation, ConfigError> {
        let cycle_len =
            NonZeroU32::new(self.duty.cycle_len).ok_or(ConfigError::ZeroValue("duty.cycle_len"))?;
        Ok(DutyRotation::new(
            self.duty.start_date,
            self.duty.offset,
            cycle_len,
        ))
    }
}

impl From<&AlertConfig> for AlertThresholds {
    fn from(config: &AlertConfig) -> Self {
        Self {
            hot: config.hot_threshold,
            reset: config.reset_threshold,
        }
    }
}
