/*
Loosely shaped tree nodes.

Trees arrive as field bags (typically JSON) where one named field holds the
child nodes and another named field identifies a node. The traversal code
only talks to this trait, so a typed node struct works as well as a raw
`serde_json::Value`.
 */
use serde_json::Value;
use termtree::Tree;

pub const DEFAULT_CHILDREN_FIELD: &str = "children";
pub const DEFAULT_IDENTITY_FIELD: &str = "id";

pub trait TreeNode: Sized {
    /// Identity value compared by value in parent lookups.
    type Key: PartialEq + ?Sized;

    /// Child nodes stored under `field`; anything that is not a list counts
    /// as no children.
    fn children(&self, field: &str) -> &[Self];

    fn key(&self, field: &str) -> Option<&Self::Key>;

    /// Copy of this node with the `field` entry removed.
    fn detached(&self, field: &str) -> Self;
}

impl TreeNode for Value {
    type Key = Value;

    fn children(&self, field: &str) -> &[Value] {
        self.get(field)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn key(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }

    fn detached(&self, field: &str) -> Value {
        match self {
            Value::Object(map) => {
                let mut map = map.clone();
                map.remove(field);
                Value::Object(map)
            }
            other => other.clone(),
        }
    }
}

/// Conversion into a printable `termtree` structure.
pub trait TreeNodeConvert {
    fn to_tree_string(&self, label_field: &str, children_field: &str) -> Tree<String>;
}

impl TreeNodeConvert for Value {
    fn to_tree_string(&self, label_field: &str, children_field: &str) -> Tree<String> {
        let label = match self.get(label_field) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "?".to_string(),
        };

        let leaves: Vec<_> = self
            .children(children_field)
            .iter()
            .map(|c| c.to_tree_string(label_field, children_field))
            .collect();

        Tree::new(label).with_leaves(leaves)
    }
}
