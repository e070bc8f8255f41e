//! Record lifecycle on the employee-management screen

pub mod locators;
pub mod service;

pub use locators::PimLocators;
pub use service::RecordLifecycleCoordinator;
