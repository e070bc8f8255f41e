//! Shared fixtures for infra integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::json;
use statesync_core::TokenAcquirer;
use statesync_domain::Credentials;
use statesync_infra::HttpClient;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "harness-client";
pub const CLIENT_SECRET: &str = "harness-secret";
pub const TOKEN_PATH: &str = "/v1/oauth2/token";
pub const ORDERS_PATH: &str = "/v2/checkout/orders";
pub const ACCESS_TOKEN: &str = "A21AAFEpH4PsADK7qSS7pSRsgzfENtu";

pub fn credentials(server: &MockServer) -> Credentials {
    Credentials::new(CLIENT_ID, CLIENT_SECRET, format!("{}{TOKEN_PATH}", server.uri()))
        .expect("credentials should be valid")
}

pub fn transport() -> Arc<HttpClient> {
    Arc::new(HttpClient::new().expect("http client should build"))
}

pub fn acquirer() -> TokenAcquirer {
    TokenAcquirer::new(transport())
}

pub fn basic_auth() -> String {
    format!("Basic {}", STANDARD.encode(format!("{CLIENT_ID}:{CLIENT_SECRET}")))
}

/// Token endpoint mock that only answers a well-formed client-credentials
/// request.
pub fn token_endpoint(response: ResponseTemplate) -> Mock {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("authorization", basic_auth().as_str()))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("grant_type=client_credentials"))
        .respond_with(response)
}

pub fn token_granted() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "scope": "https://uri.paypal.com/services/payments/payment",
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 32400
    }))
}
