//! Port interface for the browser driver
//!
//! Implementations wrap a concrete automation session. One session has one
//! focused UI state, so a handle must not be driven by two coordinators at
//! once.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use statesync_domain::Result;

use super::selector::Selector;

/// A located (but not necessarily resolved) element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef {
    selector: Selector,
}

impl ElementRef {
    pub fn new(selector: Selector) -> Self {
        Self { selector }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.selector, f)
    }
}

/// Capability set consumed from the browser automation layer.
///
/// The `is_*` waits return `Ok(false)` when the state is not reached within
/// `timeout`; `Err` is reserved for driver failures.
#[async_trait]
pub trait UiHandle: Send + Sync {
    /// Create a lazy reference to the elements matching `selector`.
    fn locate(&self, selector: Selector) -> ElementRef {
        ElementRef::new(selector)
    }

    /// Wait until the element is visible.
    async fn is_visible(&self, element: &ElementRef, timeout: Duration) -> Result<bool>;

    /// Wait until the element is attached to the DOM (visible or not).
    async fn is_attached(&self, element: &ElementRef, timeout: Duration) -> Result<bool>;

    /// Wait until the element is hidden or detached.
    async fn is_hidden(&self, element: &ElementRef, timeout: Duration) -> Result<bool>;

    async fn click(&self, element: &ElementRef) -> Result<()>;

    /// Replace the element's input value with `text`.
    async fn type_text(&self, element: &ElementRef, text: &str) -> Result<()>;

    /// Text content of the first matching element.
    async fn text(&self, element: &ElementRef) -> Result<String>;

    /// Live number of elements currently matching.
    async fn count(&self, element: &ElementRef) -> Result<usize>;

    /// Wait until the page has no in-flight network requests.
    async fn wait_for_network_idle(&self) -> Result<()>;
}
