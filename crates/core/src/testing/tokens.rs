use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use statesync_domain::{Result, SyncError, Token};

use crate::auth::AccessTokenProvider;

/// [`AccessTokenProvider`] returning a fixed token, or queued errors first.
#[derive(Default)]
pub struct StaticTokens {
    token: Option<Token>,
    errors: Mutex<VecDeque<SyncError>>,
    calls: AtomicUsize,
}

impl StaticTokens {
    pub fn new(token: &str) -> Self {
        Self { token: Token::new(token), ..Self::default() }
    }

    /// Provider whose next call fails with `error`.
    pub fn failing(error: SyncError) -> Self {
        let provider = Self::default();
        provider.push_error(error);
        provider
    }

    pub fn push_error(&self, error: SyncError) {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner).push_back(error);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokens {
    async fn access_token(&self) -> Result<Token> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.errors.lock().unwrap_or_else(PoisonError::into_inner).pop_front() {
            return Err(error);
        }
        self.token
            .clone()
            .ok_or_else(|| SyncError::MalformedResponse("no token scripted".into()))
    }
}
