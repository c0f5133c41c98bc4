//! Array service: reordering and lookup over JSON arrays

use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::reorder::{self, unused_min_serial_number};
use crate::domain::search::{binary_search_index, SearchBias};
use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayService;

impl ArrayService {
    pub fn new() -> Self {
        Self
    }

    /// Array items of `document`; anything else is rejected.
    pub fn items(document: Value) -> ApplicationResult<Vec<Value>> {
        match document {
            Value::Array(items) => Ok(items),
            other => Err(DomainError::invalid_argument(format!(
                "expected a JSON array, got {}",
                kind_of(&other)
            ))
            .into()),
        }
    }

    #[instrument(level = "debug", skip(self, items))]
    pub fn move_group(&self, items: &[Value], indices: &[usize], destination: usize) -> Vec<Value> {
        let ignored = indices.iter().filter(|&&idx| idx >= items.len()).count();
        if ignored > 0 {
            debug!(ignored, "out-of-range indices skipped");
        }
        reorder::move_group(items, indices, destination)
    }

    /// Copy with the first item whose `field` equals `value` moved to the front.
    pub fn to_start(&self, items: &[Value], field: &str, value: &Value) -> Vec<Value> {
        reorder::move_to_start(items, |item| item.get(field) == Some(value))
    }

    /// Single-element move with negative indices counting from the end.
    pub fn shift(&self, items: &[Value], from: isize, to: isize) -> Vec<Value> {
        reorder::move_immutable(items, from, to)
    }

    pub fn serial(&self, items: &[Value], field: &str, prefix: &str, default_no: u64) -> u64 {
        unused_min_serial_number(items, field, prefix, default_no)
    }

    /// Position of `target` in an ascending array of numbers or of strings.
    #[instrument(level = "debug", skip(self, items))]
    pub fn search(&self, items: &[Value], target: &Value, bias: SearchBias) -> ApplicationResult<usize> {
        let found = match target {
            Value::Number(n) => {
                let target = n.as_f64().unwrap_or(f64::NAN);
                let sorted = items
                    .iter()
                    .map(Value::as_f64)
                    .collect::<Option<Vec<f64>>>()
                    .ok_or_else(|| mixed_items("numbers"))?;
                binary_search_index(&sorted, &target, bias)
            }
            Value::String(s) => {
                let sorted = items
                    .iter()
                    .map(Value::as_str)
                    .collect::<Option<Vec<&str>>>()
                    .ok_or_else(|| mixed_items("strings"))?;
                binary_search_index(&sorted, &s.as_str(), bias)
            }
            other => {
                return Err(DomainError::invalid_argument(format!(
                    "cannot search for a {}",
                    kind_of(other)
                ))
                .into())
            }
        };
        found.ok_or_else(|| ApplicationError::not_found(format!("{target} ({bias:?})")))
    }
}

fn mixed_items(expected: &str) -> ApplicationError {
    DomainError::invalid_argument(format!("search needs an array of {expected} only")).into()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn given_object_document_when_taking_items_then_rejected() {
        assert!(ArrayService::items(json!({"a": 1})).is_err());
        assert_eq!(ArrayService::items(json!([1, 2])).unwrap().len(), 2);
    }

    #[test]
    fn given_matching_field_when_moving_to_start_then_first_match_leads() {
        let items = vec![json!({"k": "b"}), json!({"k": "a"}), json!({"k": "a", "n": 2})];
        let moved = ArrayService::new().to_start(&items, "k", &json!("a"));
        assert_eq!(moved, vec![items[1].clone(), items[0].clone(), items[2].clone()]);
    }

    #[rstest]
    #[case(json!(6), SearchBias::Forward, Some(2))]
    #[case(json!(6), SearchBias::Backward, Some(3))]
    #[case(json!(7), SearchBias::Exact, Some(3))]
    #[case(json!(6), SearchBias::Exact, None)]
    fn given_numbers_when_searching_then_respects_bias(
        #[case] target: Value,
        #[case] bias: SearchBias,
        #[case] expected: Option<usize>,
    ) {
        let items = vec![json!(1), json!(3), json!(5), json!(7.0), json!(9)];
        let result = ArrayService::new().search(&items, &target, bias);
        assert_eq!(result.ok(), expected);
    }

    #[test]
    fn given_strings_when_searching_then_compares_lexically() {
        let items = vec![json!("apple"), json!("kiwi"), json!("pear")];
        let result = ArrayService::new().search(&items, &json!("lime"), SearchBias::Backward);
        assert_eq!(result.unwrap(), 2);
    }

    #[test]
    fn given_mixed_items_when_searching_then_invalid_argument() {
        let items = vec![json!(1), json!("two")];
        let result = ArrayService::new().search(&items, &json!(1), SearchBias::Exact);
        assert!(matches!(result, Err(ApplicationError::Domain(_))));
    }
}
