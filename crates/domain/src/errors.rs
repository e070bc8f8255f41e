//! Error types used throughout the harness
//!
//! Every component reports failures through [`SyncError`]. Context added at a
//! component boundary wraps the original error in [`SyncError::Operation`], so
//! the underlying cause stays reachable through
//! [`std::error::Error::source`] and [`SyncError::kind`].

use std::time::Duration;

use thiserror::Error;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Navigation via '{link}' failed: {reason}")]
    Navigation { link: String, reason: String },

    #[error("Element {element} was not {state} within {timeout:?}")]
    ElementNotReady { element: String, state: String, timeout: Duration },

    /// Raw failure reported by a UI driver implementation.
    #[error("UI driver error: {0}")]
    Driver(String),

    #[error("Failed to get token: {status_text} (Status Code: {status})")]
    AuthServer { status: u16, status_text: String },

    #[error("Access token is missing or invalid in the response: {0}")]
    MalformedResponse(String),

    #[error("Error occurred while retrieving bearer token: {source}")]
    TokenAcquisition {
        #[source]
        source: Box<SyncError>,
    },

    /// Raw HTTP-layer failure (connect, timeout, body decode).
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Delete of row {row_index} was not confirmed within {timeout:?}")]
    DeleteNotConfirmed { row_index: usize, timeout: Duration },

    #[error("{operation} failed for '{target}': {source}")]
    Operation {
        operation: &'static str,
        target: String,
        #[source]
        source: Box<SyncError>,
    },
}

/// Stable classification of a [`SyncError`], independent of context wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    InvalidArgument,
    InvalidPayload,
    Navigation,
    ElementNotReady,
    Driver,
    AuthServer,
    MalformedResponse,
    TokenAcquisition,
    Transport,
    DeleteNotConfirmed,
}

crate::impl_domain_status_conversions!(ErrorKind {
    Configuration => "configuration",
    InvalidArgument => "invalid_argument",
    InvalidPayload => "invalid_payload",
    Navigation => "navigation",
    ElementNotReady => "element_not_ready",
    Driver => "driver",
    AuthServer => "auth_server",
    MalformedResponse => "malformed_response",
    TokenAcquisition => "token_acquisition",
    Transport => "transport",
    DeleteNotConfirmed => "delete_not_confirmed",
});

impl SyncError {
    /// Wrap `self` with the name of the failing operation and its target.
    pub fn context(self, operation: &'static str, target: impl Into<String>) -> Self {
        Self::Operation { operation, target: target.into(), source: Box::new(self) }
    }

    /// Wrap a transport-level failure raised during token acquisition.
    pub fn token_acquisition(source: SyncError) -> Self {
        Self::TokenAcquisition { source: Box::new(source) }
    }

    /// Classification of the innermost error, looking through
    /// [`SyncError::Operation`] wrappers.
    ///
    /// [`SyncError::TokenAcquisition`] is reported as itself: it is the
    /// taxonomy member callers see for any transport-level token failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Configuration,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::InvalidPayload(_) => ErrorKind::InvalidPayload,
            Self::Navigation { .. } => ErrorKind::Navigation,
            Self::ElementNotReady { .. } => ErrorKind::ElementNotReady,
            Self::Driver(_) => ErrorKind::Driver,
            Self::AuthServer { .. } => ErrorKind::AuthServer,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::TokenAcquisition { .. } => ErrorKind::TokenAcquisition,
            Self::Transport(_) => ErrorKind::Transport,
            Self::DeleteNotConfirmed { .. } => ErrorKind::DeleteNotConfirmed,
            Self::Operation { source, .. } => source.kind(),
        }
    }

    /// Status code carried by an auth server rejection, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::AuthServer { status, .. } => Some(*status),
            Self::Operation { source, .. } | Self::TokenAcquisition { source } => {
                source.status_code()
            }
            _ => None,
        }
    }
}

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, SyncError>;
