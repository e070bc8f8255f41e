//! Configuration management
//!
//! One explicit configuration object, validated once at process entry and
//! passed by reference to every component that needs it.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::constants::{
    DEFAULT_CUSTOM_WAIT_MS, DEFAULT_ROW_COUNT_ATTEMPTS, DEFAULT_ROW_COUNT_DELAY_MS,
    ENV_BUY_ORDER_ENDPOINT,
};
use crate::errors::{Result, SyncError};
use crate::types::Credentials;

/// Harness configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HarnessConfig {
    pub credentials: Credentials,
    pub buy_order_endpoint: String,
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI synchronization settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Ceiling for visibility and hidden-state assertions.
    pub custom_wait_ms: u64,
    /// Row-count probes per search.
    pub row_count_attempts: u32,
    /// Pause between row-count probes.
    pub row_count_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            custom_wait_ms: DEFAULT_CUSTOM_WAIT_MS,
            row_count_attempts: DEFAULT_ROW_COUNT_ATTEMPTS,
            row_count_delay_ms: DEFAULT_ROW_COUNT_DELAY_MS,
        }
    }
}

impl UiConfig {
    pub fn custom_wait(&self) -> Duration {
        Duration::from_millis(self.custom_wait_ms)
    }

    pub fn row_count_delay(&self) -> Duration {
        Duration::from_millis(self.row_count_delay_ms)
    }
}

impl HarnessConfig {
    /// Build and validate a configuration.
    ///
    /// # Errors
    /// See [`HarnessConfig::validate`].
    pub fn new(credentials: Credentials, buy_order_endpoint: impl Into<String>) -> Result<Self> {
        let config = Self {
            credentials,
            buy_order_endpoint: buy_order_endpoint.into(),
            ui: UiConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the UI settings.
    pub fn with_ui(mut self, ui: UiConfig) -> Self {
        self.ui = ui;
        self
    }

    /// Run every static check once.
    ///
    /// # Errors
    /// Returns `SyncError::Config` when credentials are incomplete, the order
    /// endpoint is blank or not a URL, or the row-count budget is zero.
    pub fn validate(&self) -> Result<()> {
        self.credentials.validate()?;
        validate_endpoint(ENV_BUY_ORDER_ENDPOINT, &self.buy_order_endpoint)?;

        if self.ui.row_count_attempts == 0 {
            return Err(SyncError::Config("row_count_attempts must be at least 1".to_string()));
        }

        Ok(())
    }
}

/// Check that `value` is a non-blank absolute URL.
///
/// # Errors
/// Returns `SyncError::Config` naming `variable`.
pub fn validate_endpoint(variable: &str, value: &str) -> Result<Url> {
    if value.trim().is_empty() {
        return Err(SyncError::Config(format!(
            "{variable} is not set or invalid in environment variables."
        )));
    }

    Url::parse(value.trim())
        .map_err(|e| SyncError::Config(format!("{variable} is not a valid URL ({e})")))
}
