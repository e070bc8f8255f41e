//! Order API client

pub mod service;

pub use service::ResourceCreator;
