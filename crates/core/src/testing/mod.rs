//! Deterministic port fakes for unit and integration tests
//!
//! Enabled for this crate's own tests and, through the `test-utils` feature,
//! for downstream crates.

mod tokens;
mod transport;
mod ui;

pub use tokens::StaticTokens;
pub use transport::RecordingTransport;
pub use ui::{ScriptedUi, UiCall};
