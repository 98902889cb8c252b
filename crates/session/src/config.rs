use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::time::Duration;

/// Presentation depth of the swipe window
pub const DEFAULT_WINDOW_SIZE: usize = 3;
/// Visual-settle delay between a decision and the cursor advancing
pub const DEFAULT_SETTLE_MS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_JOURNAL_DIR: &str = ".swipe-deck";

/// Session configuration loaded from environment variables.
///
/// | Variable | Default |
/// |---|---|
/// | `SWIPE_BACKEND_URL` | unset (offline: catalog pools only) |
/// | `SWIPE_REQUEST_TIMEOUT_SECS` | 10 |
/// | `SWIPE_WINDOW_SIZE` | 3 |
/// | `SWIPE_SETTLE_MS` | 300 |
/// | `SWIPE_JOURNAL_DIR` | `.swipe-deck` |
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub backend_url: Option<String>,
    pub request_timeout: Duration,
    pub window_size: usize,
    pub settle_delay: Duration,
    pub journal_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            window_size: DEFAULT_WINDOW_SIZE,
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_MS),
            journal_dir: PathBuf::from(DEFAULT_JOURNAL_DIR),
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = SessionConfig {
            backend_url: lookup("SWIPE_BACKEND_URL")
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            request_timeout: match lookup("SWIPE_REQUEST_TIMEOUT_SECS") {
                Some(raw) => Duration::from_secs(
                    raw.trim()
                        .parse::<u64>()
                        .context("SWIPE_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                None => defaults.request_timeout,
            },
            window_size: match lookup("SWIPE_WINDOW_SIZE") {
                Some(raw) => raw
                    .trim()
                    .parse::<usize>()
                    .context("SWIPE_WINDOW_SIZE must be a positive integer")?,
                None => defaults.window_size,
            },
            settle_delay: match lookup("SWIPE_SETTLE_MS") {
                Some(raw) => Duration::from_millis(
                    raw.trim()
                        .parse::<u64>()
                        .context("SWIPE_SETTLE_MS must be a whole number of milliseconds")?,
                ),
                None => defaults.settle_delay,
            },
            journal_dir: lookup("SWIPE_JOURNAL_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.journal_dir),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            bail!("window size must be at least 1");
        }
        Ok(())
    }
}
