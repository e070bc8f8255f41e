//! Client credentials and bearer tokens
//!
//! Neither type ever prints its secret material: `Debug` is implemented by
//! hand and there is no `Display`.

use std::fmt;

use serde::Deserialize;
use url::Url;

use super::is_blank;
use crate::constants::{ENV_API_AUTH_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET};
use crate::errors::{Result, SyncError};

/// Static client-credentials triple for the token endpoint.
///
/// Sourced once at process start. [`Credentials::new`] validates eagerly;
/// values deserialized from a config file are validated by
/// [`Credentials::validate`] before first use.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    token_endpoint: String,
}

impl Credentials {
    /// Build and validate a credentials triple.
    ///
    /// # Errors
    /// Returns `SyncError::Config` naming every missing or blank field, or
    /// the endpoint when it is not a valid URL.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_endpoint: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_endpoint: token_endpoint.into(),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Check that all three fields are present and the endpoint parses.
    ///
    /// # Errors
    /// Returns `SyncError::Config`; the message names the variables, never
    /// their values.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            (ENV_CLIENT_ID, &self.client_id),
            (ENV_CLIENT_SECRET, &self.client_secret),
            (ENV_API_AUTH_URL, &self.token_endpoint),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(SyncError::Config(format!(
                "{} not set. Please set them before running the tests.",
                missing.join(", ")
            )));
        }

        Url::parse(self.token_endpoint.trim()).map_err(|e| {
            SyncError::Config(format!("{ENV_API_AUTH_URL} is not a valid URL: {e}"))
        })?;

        Ok(())
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The raw secret. Callers must not log it.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn token_endpoint(&self) -> &str {
        self.token_endpoint.trim()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_endpoint", &self.token_endpoint)
            .finish()
    }
}

/// Short-lived bearer token.
///
/// No expiry tracking and no refresh: a token lives for one call chain and
/// is fetched again for the next.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a token value, rejecting blank strings.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if is_blank(&value) {
            None
        } else {
            Some(Self(value))
        }
    }

    /// The raw token value. Callers must not log it.
    pub fn value(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value for bearer authentication.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(<redacted, {} chars>)", self.0.len())
    }
}
