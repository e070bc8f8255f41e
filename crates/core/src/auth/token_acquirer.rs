//! OAuth2 client-credentials grant
//!
//! Exchanges a client id/secret pair for a bearer token with a single POST.
//! There is no internal retry: a failing token endpoint is almost always a
//! configuration problem, and callers decide whether to try again.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;
use statesync_domain::constants::{
    ACCESS_TOKEN_FIELD, GRANT_TYPE_CLIENT_CREDENTIALS, TOKEN_REQUEST_TIMEOUT,
};
use statesync_domain::{Credentials, Result, SyncError, Token};
use tracing::{debug, error, info, instrument};

use super::ports::AccessTokenProvider;
use crate::http::{HttpRequest, HttpTransport, AUTHORIZATION, CONTENT_TYPE, FORM_URLENCODED};

/// Fetches bearer tokens from the auth server.
#[derive(Clone)]
pub struct TokenAcquirer {
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
}

impl TokenAcquirer {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport, timeout: TOKEN_REQUEST_TIMEOUT }
    }

    /// Override the request timeout (10 s by default).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exchange `credentials` for a fresh bearer token.
    ///
    /// # Errors
    /// - `Config` when a credential field is missing or the endpoint is not a
    ///   URL; no request is sent
    /// - `AuthServer` for a non-2xx response
    /// - `MalformedResponse` when `access_token` is absent, not a string, or
    ///   blank
    /// - `TokenAcquisition` wrapping any transport or body-decoding failure
    #[instrument(skip_all, fields(client_id = %credentials.client_id()))]
    pub async fn acquire_token(&self, credentials: &Credentials) -> Result<Token> {
        info!("Requesting bearer token from auth server using client credentials");

        if let Err(err) = credentials.validate() {
            error!(error = %err, "Token request aborted: credentials incomplete");
            return Err(err);
        }

        let authorization = basic_authorization(credentials);
        info!("Credentials encoded in Base64 format");

        let endpoint = credentials.token_endpoint();
        let request = HttpRequest::post(endpoint)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, FORM_URLENCODED)
            .form([("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS)])
            .timeout(self.timeout);

        info!(%endpoint, "Sending POST request to auth URL for token");
        let response = self.transport.execute(request).await.map_err(|err| {
            error!(error = %err, "Token request failed in transport");
            SyncError::token_acquisition(err)
        })?;
        debug!(status = response.status, "Token response received");

        if !response.is_success() {
            let status_text = if response.status_text.trim().is_empty() {
                "Unknown Error".to_string()
            } else {
                response.status_text.clone()
            };
            let err = SyncError::AuthServer { status: response.status, status_text };
            error!(error = %err, "Auth server rejected token request");
            return Err(err);
        }

        let body: Value = response.json().map_err(|err| {
            error!(error = %err, "Token response body could not be parsed");
            SyncError::token_acquisition(err)
        })?;
        debug!("Token response parsed");

        let token = extract_token(&body)?;
        info!("Bearer token retrieved successfully");
        Ok(token)
    }
}

fn basic_authorization(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.client_id(), credentials.client_secret());
    format!("Basic {}", STANDARD.encode(pair))
}

fn extract_token(body: &Value) -> Result<Token> {
    let field = body.get(ACCESS_TOKEN_FIELD);
    let problem = match field {
        None => "field is absent",
        Some(Value::String(value)) => match Token::new(value.as_str()) {
            Some(token) => return Ok(token),
            None => "field is blank",
        },
        Some(_) => "field is not a string",
    };

    error!(field = ACCESS_TOKEN_FIELD, problem, "Access token is missing or invalid in the response");
    Err(SyncError::MalformedResponse(format!("{ACCESS_TOKEN_FIELD} {problem}")))
}

/// [`AccessTokenProvider`] that runs a fresh client-credentials exchange on
/// every call.
#[derive(Clone)]
pub struct ClientCredentialsTokens {
    acquirer: TokenAcquirer,
    credentials: Credentials,
}

impl ClientCredentialsTokens {
    pub fn new(acquirer: TokenAcquirer, credentials: Credentials) -> Self {
        Self { acquirer, credentials }
    }
}

#[async_trait]
impl AccessTokenProvider for ClientCredentialsTokens {
    async fn access_token(&self) -> Result<Token> {
        self.acquirer.acquire_token(&self.credentials).await
    }
}
