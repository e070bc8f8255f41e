//! # Statesync Domain
//!
//! Data model for the workflow-validation harness.
//!
//! This crate contains:
//! - Credentials, tokens, record keys and order payloads
//! - The `SyncError` taxonomy and `Result` alias
//! - The harness configuration object
//! - Environment variable names and default timeouts
//!
//! ## Architecture
//! - No dependencies on other statesync crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::{HarnessConfig, UiConfig};
pub use errors::*;
pub use types::*;
