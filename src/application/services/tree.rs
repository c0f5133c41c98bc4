//! Tree service: tree toolkit operations bound to configured field names

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::TreeSettings;
use crate::domain::{self, TreeNodeConvert};

/// Runs tree searches over JSON forests using the configured children and
/// identity field names.
#[derive(Debug, Clone, Default)]
pub struct TreeService {
    settings: TreeSettings,
}

impl TreeService {
    pub fn new(settings: TreeSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TreeSettings {
        &self.settings
    }

    /// A JSON document as a forest: arrays as is, anything else as one root.
    pub fn as_forest(document: Value) -> Vec<Value> {
        match document {
            Value::Array(roots) => roots,
            Value::Null => Vec::new(),
            root => vec![root],
        }
    }

    /// Node count at `depth`, summed over all roots of the forest.
    #[instrument(level = "debug", skip(self, forest))]
    pub fn count_at_depth(&self, forest: &[Value], depth: usize) -> usize {
        forest
            .iter()
            .map(|root| domain::count_nodes_at_depth(root, depth, &self.settings.children_field))
            .sum()
    }

    /// First node (queue order) whose `field` equals `value`.
    #[instrument(level = "debug", skip(self, forest))]
    pub fn find_by_field<'a>(
        &self,
        forest: &'a [Value],
        field: &str,
        value: &Value,
    ) -> ApplicationResult<&'a Value> {
        domain::find_node(
            forest,
            |node| node.get(field) == Some(value),
            &self.settings.children_field,
        )
        .ok_or_else(|| ApplicationError::not_found(format!("node with {field} = {value}")))
    }

    /// Parent of the node whose identity field equals `id`, searched in
    /// every root of the forest.
    #[instrument(level = "debug", skip(self, forest))]
    pub fn parent_of<'a>(&self, forest: &'a [Value], id: &Value) -> ApplicationResult<&'a Value> {
        let mut identity = Map::new();
        identity.insert(self.settings.identity_field.clone(), id.clone());
        let identity = Value::Object(identity);

        forest
            .iter()
            .find_map(|root| {
                domain::find_parent(
                    Some(root),
                    Some(&identity),
                    &self.settings.identity_field,
                    &self.settings.children_field,
                )
            })
            .ok_or_else(|| {
                ApplicationError::not_found(format!(
                    "parent of {} = {id}",
                    self.settings.identity_field
                ))
            })
    }

    /// Root-to-node path to the first node whose `field` equals `value`.
    #[instrument(level = "debug", skip(self, forest))]
    pub fn path_to<'a>(
        &self,
        forest: &'a [Value],
        field: &str,
        value: &Value,
    ) -> ApplicationResult<Vec<&'a Value>> {
        let path = domain::find_path(
            forest,
            |node| node.get(field) == Some(value),
            &self.settings.children_field,
        )
        .ok_or_else(|| ApplicationError::not_found(format!("path to {field} = {value}")))?;
        debug!(len = path.len(), "path resolved");
        Ok(path)
    }

    pub fn flatten(&self, forest: &[Value]) -> Vec<Value> {
        domain::flatten(forest, &self.settings.children_field)
    }

    /// Text rendering of every root, labelled by the identity field.
    pub fn render(&self, forest: &[Value]) -> String {
        forest
            .iter()
            .map(|root| {
                root.to_tree_string(&self.settings.identity_field, &self.settings.children_field)
                    .to_string()
            })
            .collect()
    }
}
