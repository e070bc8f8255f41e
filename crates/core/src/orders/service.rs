//! Authenticated order creation
//!
//! [`ResourceCreator`] posts an order payload with a fresh bearer token and
//! hands the raw response back. It logs success or a warning from the status
//! code but never turns a non-2xx response into an error, so the same creator
//! serves both "expect success" and "expect rejection" scenarios.

use std::sync::Arc;
use std::time::Duration;

use statesync_domain::config::validate_endpoint;
use statesync_domain::constants::{ENV_BUY_ORDER_ENDPOINT, ORDER_REQUEST_TIMEOUT};
use statesync_domain::{HarnessConfig, OrderPayload, Result, SyncError};
use tracing::{error, info, instrument, warn};
use url::Url;

use crate::auth::AccessTokenProvider;
use crate::http::{HttpRequest, HttpResponse, HttpTransport, APPLICATION_JSON, AUTHORIZATION, CONTENT_TYPE};

/// Posts orders to one fixed endpoint with a bearer token per request.
pub struct ResourceCreator {
    endpoint: Url,
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<dyn AccessTokenProvider>,
    timeout: Duration,
}

impl ResourceCreator {
    /// Resolve the order endpoint once, up front.
    ///
    /// # Errors
    /// Returns `SyncError::Config` naming `BUY_ORDER_ENDPOINT` when `endpoint`
    /// is blank or not a URL.
    pub fn new(
        endpoint: &str,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self> {
        let endpoint = validate_endpoint(ENV_BUY_ORDER_ENDPOINT, endpoint).map_err(|err| {
            error!(error = %err, "Order creator construction failed");
            err
        })?;
        info!(%endpoint, "Order creator initialized");

        Ok(Self { endpoint, transport, tokens, timeout: ORDER_REQUEST_TIMEOUT })
    }

    /// Creator for `config.buy_order_endpoint`.
    ///
    /// # Errors
    /// Same as [`ResourceCreator::new`].
    pub fn from_config(
        config: &HarnessConfig,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self> {
        Self::new(&config.buy_order_endpoint, transport, tokens)
    }

    /// Per-request timeout for the order call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolved order endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Create an order and return the transport response as-is.
    ///
    /// # Errors
    /// - `InvalidPayload` when the payload is structurally empty; neither a
    ///   token nor the order request is attempted
    /// - token acquisition errors, unchanged
    /// - transport errors, unchanged
    #[instrument(skip_all, fields(endpoint = %self.endpoint, intent = %payload.intent))]
    pub async fn create_order(&self, payload: &OrderPayload) -> Result<HttpResponse> {
        if let Err(err) = payload.validate() {
            error!(error = %err, "Invalid payload provided for creating Buy Order");
            return Err(err);
        }

        let body = serde_json::to_value(payload).map_err(|e| {
            SyncError::InvalidPayload(format!("payload could not be serialized: {e}"))
        })?;
        let pretty = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
        info!(payload = %pretty, "Creating Buy Order");

        let token = self.tokens.access_token().await?;

        let request = HttpRequest::post(self.endpoint.as_str())
            .header(AUTHORIZATION, token.bearer_header())
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .json(body)
            .timeout(self.timeout);

        let response = self.transport.execute(request).await.map_err(|err| {
            error!(error = %err, "Error occurred while creating Buy Order");
            err
        })?;

        if response.is_success() {
            let order_id = response
                .json_value()
                .ok()
                .and_then(|value| value.get("id").and_then(|id| id.as_str()).map(str::to_owned))
                .unwrap_or_else(|| "N/A".to_string());
            info!(status = response.status, %order_id, "Buy Order created");
        } else {
            warn!(
                status = response.status,
                status_text = %response.status_text,
                "Buy Order request was not successful"
            );
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use statesync_domain::{ErrorKind, OrderIntent};

    use super::*;
    use crate::http::RequestBody;
    use crate::testing::{RecordingTransport, StaticTokens};

    const ENDPOINT: &str = "https://api.example.com/v2/checkout/orders";

    fn creator(transport: &Arc<RecordingTransport>, tokens: Arc<StaticTokens>) -> ResourceCreator {
        ResourceCreator::new(ENDPOINT, transport.clone(), tokens).unwrap()
    }

    fn payload() -> OrderPayload {
        OrderPayload::new(OrderIntent::Capture).with_unit("USD", "100.00")
    }

    #[test]
    fn blank_endpoint_fails_construction() {
        for endpoint in ["", "   ", "not a url"] {
            let result = ResourceCreator::new(
                endpoint,
                Arc::new(RecordingTransport::new()),
                Arc::new(StaticTokens::new("t")),
            );
            let err = result.err().unwrap();
            assert_eq!(err.kind(), ErrorKind::Configuration);
            assert!(err.to_string().contains("BUY_ORDER_ENDPOINT"));
        }
    }

    #[tokio::test]
    async fn posts_payload_with_bearer_token() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_response(HttpResponse::new(201).with_json(&json!({ "id": "5O190127TN364715T" })));
        let creator = creator(&transport, Arc::new(StaticTokens::new("A21AAF")));

        let response = creator.create_order(&payload()).await.unwrap();

        assert_eq!(response.status, 201);
        let request = transport.requests().remove(0);
        assert_eq!(request.url, ENDPOINT);
        assert_eq!(request.header_value("Authorization"), Some("Bearer A21AAF"));
        assert_eq!(request.header_value("Content-Type"), Some("application/json"));
        assert_eq!(request.timeout, Some(Duration::from_secs(30)));
        assert_eq!(
            request.body,
            RequestBody::Json(json!({
                "intent": "CAPTURE",
                "purchase_units": [{ "amount": { "currency_code": "USD", "value": "100.00" } }]
            }))
        );
    }

    #[tokio::test]
    async fn empty_payload_fails_without_any_network_call() {
        let transport = Arc::new(RecordingTransport::new());
        let tokens = Arc::new(StaticTokens::new("t"));
        let creator = creator(&transport, tokens.clone());

        let err = creator.create_order(&OrderPayload::new(OrderIntent::Capture)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidPayload);
        assert_eq!(transport.call_count(), 0);
        assert_eq!(tokens.call_count(), 0);
    }

    #[tokio::test]
    async fn rejection_is_returned_not_raised() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_response(
            HttpResponse::new(422)
                .with_status_text("Unprocessable Entity")
                .with_json(&json!({ "name": "UNPROCESSABLE_ENTITY" })),
        );
        let creator = creator(&transport, Arc::new(StaticTokens::new("t")));

        let response = creator.create_order(&payload()).await.unwrap();

        assert_eq!(response.status, 422);
        assert!(!response.is_success());
        assert_eq!(response.json_value().unwrap()["name"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn token_failure_propagates_unchanged() {
        let transport = Arc::new(RecordingTransport::new());
        let tokens = Arc::new(StaticTokens::failing(SyncError::AuthServer {
            status: 401,
            status_text: "Unauthorized".into(),
        }));
        let creator = creator(&transport, tokens);

        let err = creator.create_order(&payload()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AuthServer);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn transport_failure_propagates_unchanged() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_error(SyncError::Transport("connection refused".into()));
        let creator = creator(&transport, Arc::new(StaticTokens::new("t")));

        let err = creator.create_order(&payload()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn success_without_id_still_returns_response() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_response(HttpResponse::new(200).with_body("created"));
        let creator = creator(&transport, Arc::new(StaticTokens::new("t")));

        let response = creator.create_order(&payload()).await.unwrap();

        assert_eq!(response.text(), "created");
    }
}
