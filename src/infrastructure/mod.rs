//! Infrastructure layer: JSON documents from files or stdin

pub mod error;
pub mod json;

pub use error::{InfraError, InfraResult};
pub use json::{read_json, read_json_from, to_pretty_json};
