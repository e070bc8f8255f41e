//! Example: Creating a buy order against a sandbox API
//!
//! Loads configuration the same way a test harness does (`.env`, then the
//! environment, then `statesync.toml`), exchanges the client credentials for
//! a bearer token and posts a single order.
//!
//! # Setup
//!
//! 1. Export `CLIENT_ID`, `CLIENT_SECRET`, `API_AUTH_URL` and
//!    `BUY_ORDER_ENDPOINT`, or put them in `.env`
//!
//! 2. Run this example: ```bash cargo run -p statesync-infra --example
//!    order_smoke ```

use std::sync::Arc;

use statesync_core::{ClientCredentialsTokens, ResourceCreator, TokenAcquirer};
use statesync_domain::{OrderIntent, OrderPayload};
use statesync_infra::{config, init_tracing, HttpClient, LogFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let format = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|f| f.parse::<LogFormat>().ok())
        .unwrap_or_default();
    init_tracing(format);

    let config = config::load()?;
    let transport = Arc::new(HttpClient::builder().user_agent("statesync-smoke/0.1").build()?);

    let tokens = ClientCredentialsTokens::new(
        TokenAcquirer::new(transport.clone()),
        config.credentials.clone(),
    );
    let creator = ResourceCreator::from_config(&config, transport, Arc::new(tokens))?;

    let payload = OrderPayload::new(OrderIntent::Capture).with_unit("USD", "100.00");
    let response = creator.create_order(&payload).await?;

    println!("{} {}", response.status, response.status_text);
    println!("{}", response.text());

    if response.is_success() {
        Ok(())
    } else {
        Err(format!("order request returned {}", response.status).into())
    }
}
