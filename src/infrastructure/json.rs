//! Reading and writing JSON documents.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::infrastructure::error::{InfraError, InfraResult};

/// Path that selects stdin instead of a file.
pub const STDIN_PATH: &str = "-";

/// Read a JSON document from `path`, or from stdin when `path` is `-`.
#[instrument(level = "debug")]
pub fn read_json(path: &Path) -> InfraResult<Value> {
    if path == Path::new(STDIN_PATH) {
        return read_json_from(io::stdin().lock(), "stdin");
    }
    let content = fs::read_to_string(path)
        .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?;
    debug!(bytes = content.len(), "input read");
    serde_json::from_str(&content).map_err(|e| InfraError::json(format!("parse {}", path.display()), e))
}

/// Read a JSON document from any reader; `source` names it in errors.
pub fn read_json_from<R: Read>(mut reader: R, source: &str) -> InfraResult<Value> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| InfraError::io(format!("read {source}"), e))?;
    serde_json::from_str(&content).map_err(|e| InfraError::json(format!("parse {source}"), e))
}

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> InfraResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| InfraError::json("serialize output", e))
}
