//! Harness constants
//!
//! Centralized location for environment variable names, wire-level field
//! names, and default timeouts.

use std::time::Duration;

// Environment variables (required)
pub const ENV_CLIENT_ID: &str = "CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "CLIENT_SECRET";
pub const ENV_API_AUTH_URL: &str = "API_AUTH_URL";
pub const ENV_BUY_ORDER_ENDPOINT: &str = "BUY_ORDER_ENDPOINT";

// Environment variables (optional, defaulted)
pub const ENV_UI_CUSTOM_WAIT_MS: &str = "UI_CUSTOM_WAIT_MS";
pub const ENV_ROW_COUNT_MAX_ATTEMPTS: &str = "ROW_COUNT_MAX_ATTEMPTS";
pub const ENV_ROW_COUNT_DELAY_MS: &str = "ROW_COUNT_DELAY_MS";

// Client-credentials grant
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";
pub const ACCESS_TOKEN_FIELD: &str = "access_token";
pub const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Order API
pub const ORDER_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// UI synchronization
pub const DEFAULT_CUSTOM_WAIT_MS: u64 = 30_000;
pub const DEFAULT_ROW_COUNT_ATTEMPTS: u32 = 3;
pub const DEFAULT_ROW_COUNT_DELAY_MS: u64 = 0;
