//! Port interface for bearer-token sources

use async_trait::async_trait;
use statesync_domain::{Result, Token};

/// Trait for providing access tokens
///
/// Implementations return a token valid for the current call chain. Callers
/// must not hold a token across logical test boundaries.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<Token>;
}
