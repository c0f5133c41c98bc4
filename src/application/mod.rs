//! Application layer: services and use cases
//!
//! Services bind the configured defaults (field names, precision, fill
//! interval) to the domain operations.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::{ArrayService, ChartService, TreeService};
