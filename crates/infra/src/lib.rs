//! # statesync infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP transport
//! - Configuration loading (`.env`, environment, TOML/JSON files)
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `statesync-core`
//! - Contains all "impure" code (sockets, environment, filesystem)

pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::{init_tracing, LogFormat};
