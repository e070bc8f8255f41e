use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, RequestBuilder};
use statesync_core::http::{HttpRequest, HttpResponse, HttpTransport, RequestBody};
use statesync_domain::{Result, SyncError};
use tracing::debug;

use crate::errors::InfraError;

/// reqwest-backed [`HttpTransport`].
///
/// Sends exactly one request per call. Per-request timeouts set on an
/// [`HttpRequest`] override the client-wide default.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Same as [`HttpClientBuilder::build`].
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    fn prepare(&self, request: HttpRequest) -> RequestBuilder {
        let mut builder = self.client.post(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(pairs) => builder.form(&pairs),
            RequestBody::Json(body) => builder.json(&body),
        };

        match request.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }
}

#[async_trait]
impl HttpTransport for HttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        debug!(%url, "sending HTTP request");

        let response = self.prepare(request).send().await.map_err(|err| {
            debug!(%url, error = %err, "HTTP request failed");
            SyncError::from(InfraError::from(err))
        })?;

        let status = response.status();
        debug!(%url, %status, "received HTTP response");

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(|err| SyncError::from(InfraError::from(err)))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body: body.to_vec(),
        })
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    /// Client-wide timeout, used when a request carries none.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `SyncError::Transport` when the TLS backend or the underlying
    /// reqwest client cannot be initialized.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            SyncError::from(infra)
        })?;

        Ok(HttpClient { client })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use serde_json::json;
    use statesync_domain::ErrorKind;
    use wiremock::matchers::{body_json, body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client() -> HttpClient {
        HttpClient::builder().timeout(Duration::from_secs(5)).build().expect("http client")
    }

    #[tokio::test]
    async fn posts_form_body_with_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .and(header("authorization", "Basic abc"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "t" })))
            .expect(1)
            .mount(&server)
            .await;

        let request = HttpRequest::post(format!("{}/v1/oauth2/token", server.uri()))
            .header("Authorization", "Basic abc")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form([("grant_type", "client_credentials")]);
        let response = client().execute(request).await.expect("response");

        assert!(response.is_success());
        assert_eq!(response.status_text, "OK");
        assert_eq!(response.json_value().unwrap()["access_token"], "t");
    }

    #[tokio::test]
    async fn posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "intent": "CAPTURE" })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let request = HttpRequest::post(server.uri()).json(json!({ "intent": "CAPTURE" }));
        let response = client().execute(request).await.expect("response");

        assert_eq!(response.status, 201);
    }

    #[tokio::test]
    async fn non_success_status_is_returned_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let response = client().execute(HttpRequest::post(server.uri())).await.expect("response");

        assert_eq!(response.status, 500);
        assert_eq!(response.status_text, "Internal Server Error");
        assert_eq!(response.text(), "boom");
    }

    #[tokio::test]
    async fn request_timeout_overrides_client_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let request = HttpRequest::post(server.uri()).timeout(Duration::from_millis(50));
        let err = client().execute(request).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn network_failure_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED

        let err = client().execute(HttpRequest::post(format!("http://{addr}"))).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
