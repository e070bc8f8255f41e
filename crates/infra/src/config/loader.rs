//! Configuration loader
//!
//! Loads harness configuration from a `.env` file, environment variables or
//! a config file.
//!
//! ## Loading Strategy
//! 1. Loads `.env` from the working directory when present
//! 2. Attempts to load from environment variables
//! 3. If incomplete, falls back to loading from file
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CLIENT_ID`: OAuth2 client id (required)
//! - `CLIENT_SECRET`: OAuth2 client secret (required)
//! - `API_AUTH_URL`: Token endpoint (required)
//! - `BUY_ORDER_ENDPOINT`: Order API endpoint (required)
//! - `UI_CUSTOM_WAIT_MS`: Visible/hidden wait ceiling in milliseconds
//! - `ROW_COUNT_MAX_ATTEMPTS`: Row-count poll attempts
//! - `ROW_COUNT_DELAY_MS`: Delay between row-count attempts in milliseconds
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./statesync.toml` or `./statesync.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use statesync_domain::constants::{
    ENV_API_AUTH_URL, ENV_BUY_ORDER_ENDPOINT, ENV_CLIENT_ID, ENV_CLIENT_SECRET,
    ENV_ROW_COUNT_DELAY_MS, ENV_ROW_COUNT_MAX_ATTEMPTS, ENV_UI_CUSTOM_WAIT_MS,
};
use statesync_domain::{Credentials, HarnessConfig, Result, SyncError, UiConfig};

const REQUIRED_VARS: [&str; 4] =
    [ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_API_AUTH_URL, ENV_BUY_ORDER_ENDPOINT];

/// Load configuration with automatic fallback strategy
///
/// Loads `.env`, then attempts the environment. If that fails, falls back to
/// a config file in the working directory.
///
/// # Errors
/// Returns `SyncError::Config` if:
/// - The environment is incomplete and no config file exists; the error is
///   the environment error, naming every missing variable
/// - A config file exists but is invalid; the message carries both the file
///   error and the environment error
pub fn load() -> Result<HarnessConfig> {
    load_dotenv();

    let env_err = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            return Ok(config);
        }
        Err(e) => e,
    };

    let Some(path) = probe_config_paths() else {
        tracing::error!(error = %env_err, "No usable configuration in the environment or on disk");
        return Err(env_err);
    };

    tracing::debug!(error = %env_err, "Failed to load from environment, trying file");
    load_from_file(Some(path)).map_err(|file_err| {
        SyncError::Config(format!("{}; environment: {}", config_message(file_err), config_message(env_err)))
    })
}

fn config_message(err: SyncError) -> String {
    match err {
        SyncError::Config(message) => message,
        other => other.to_string(),
    }
}

/// Load a `.env` file from the working directory (or a parent) into the
/// process environment. Variables already set are not overridden.
///
/// Returns `true` when a file was loaded.
pub fn load_dotenv() -> bool {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            true
        }
        Err(e) => {
            tracing::debug!(error = %e, "No .env file loaded");
            false
        }
    }
}

/// Load configuration from environment variables
///
/// Every required variable must be set and non-blank; all missing ones are
/// named in one error.
///
/// # Errors
/// Returns `SyncError::Config` if required variables are missing, a URL is
/// invalid, or an optional number does not parse.
pub fn load_from_env() -> Result<HarnessConfig> {
    let missing: Vec<&str> =
        REQUIRED_VARS.into_iter().filter(|key| env_var(key).is_none()).collect();
    if !missing.is_empty() {
        return Err(SyncError::Config(format!(
            "{} not set. Please set them before running the tests.",
            missing.join(", ")
        )));
    }

    let credentials = Credentials::new(
        env_var(ENV_CLIENT_ID).unwrap_or_default(),
        env_var(ENV_CLIENT_SECRET).unwrap_or_default(),
        env_var(ENV_API_AUTH_URL).unwrap_or_default(),
    )?;

    let defaults = UiConfig::default();
    let ui = UiConfig {
        custom_wait_ms: env_number(ENV_UI_CUSTOM_WAIT_MS)?.unwrap_or(defaults.custom_wait_ms),
        row_count_attempts: env_number(ENV_ROW_COUNT_MAX_ATTEMPTS)?
            .unwrap_or(defaults.row_count_attempts),
        row_count_delay_ms: env_number(ENV_ROW_COUNT_DELAY_MS)?
            .unwrap_or(defaults.row_count_delay_ms),
    };

    let config = HarnessConfig::new(credentials, env_var(ENV_BUY_ORDER_ENDPOINT).unwrap_or_default())?
        .with_ui(ui);
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Supports both JSON
/// and TOML formats (detected by file extension). The loaded configuration
/// is validated before it is returned.
///
/// # Errors
/// Returns `SyncError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing or invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<HarnessConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SyncError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SyncError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SyncError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<HarnessConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SyncError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SyncError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SyncError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the working directory for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;

    ["statesync.toml", "statesync.json", "config.toml", "config.json"]
        .into_iter()
        .map(|name| cwd.join(name))
        .find(|path| path.exists())
}

/// Non-blank environment variable value.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an optional numeric environment variable.
///
/// # Errors
/// Returns `SyncError::Config` when the variable is set but not a number.
fn env_number<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| SyncError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}
