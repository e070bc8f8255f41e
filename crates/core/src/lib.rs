//! # statesync core
//!
//! Synchronization logic for black-box test harnesses - no infrastructure
//! dependencies.
//!
//! This crate contains:
//! - Port interfaces for the browser driver and the HTTP client
//! - The token exchange, order creation and record lifecycle services
//! - Bounded polling for eventually-consistent UI state
//!
//! ## Architecture Principles
//! - Only depends on `statesync-domain`
//! - No browser, socket or filesystem code
//! - All external dependencies via traits

pub mod auth;
pub mod http;
pub mod orders;
pub mod polling;
pub mod records;
pub mod ui;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use auth::{AccessTokenProvider, ClientCredentialsTokens, TokenAcquirer};
pub use http::{HttpRequest, HttpResponse, HttpTransport, RequestBody};
pub use orders::ResourceCreator;
pub use polling::{PollPolicy, PollPolicyBuilder};
pub use records::{PimLocators, RecordLifecycleCoordinator};
pub use ui::{ElementRef, Selector, TextMatch, UiHandle};
