//! Browser-side capability boundary
//!
//! The coordinator drives the remote UI only through [`UiHandle`]; element
//! addressing is expressed as a [`Selector`] that the driver resolves.

pub mod ports;
pub mod selector;

pub use ports::{ElementRef, UiHandle};
pub use selector::{Selector, TextMatch};
