//! Integration tests for the tree toolkit over JSON nodes.

use rstest::{fixture, rstest};
use serde_json::{json, Value};

use utilkit::application::TreeService;
use utilkit::config::TreeSettings;
use utilkit::domain::tree::iter_preorder;
use utilkit::domain::{count_nodes_at_depth, find_node, find_parent, find_path, flatten, TreeNode};

const CHILDREN: &str = "children";

#[fixture]
fn forest() -> Vec<Value> {
    vec![
        json!({"id": 1, "children": [
            {"id": 2, "children": [{"id": 4}, {"id": 5}, {"id": 6}]},
            {"id": 3, "children": [{"id": 7}, {"id": 8}, {"id": 9}]}
        ]}),
        json!({"id": 10, "children": [{"id": 11, "children": [{"id": 12}]}]}),
    ]
}

fn id_of(node: &Value) -> i64 {
    node["id"].as_i64().unwrap_or(-1)
}

#[rstest]
fn given_forest_when_counting_per_root_then_levels_match(forest: Vec<Value>) {
    assert_eq!(count_nodes_at_depth(&forest[0], 0, CHILDREN), 1);
    assert_eq!(count_nodes_at_depth(&forest[0], 1, CHILDREN), 2);
    assert_eq!(count_nodes_at_depth(&forest[0], 2, CHILDREN), 6);
    assert_eq!(count_nodes_at_depth(&forest[1], 2, CHILDREN), 1);
    assert_eq!(count_nodes_at_depth(&forest[1], 3, CHILDREN), 0);
}

#[rstest]
fn given_forest_when_finding_then_roots_are_tried_before_children(forest: Vec<Value>) {
    let mut visited = Vec::new();
    let found = find_node(
        &forest,
        |node| {
            visited.push(id_of(node));
            id_of(node) == 12
        },
        CHILDREN,
    );
    assert_eq!(found.map(id_of), Some(12));
    assert_eq!(visited, vec![1, 10, 2, 3, 11, 4, 5, 6, 7, 8, 9, 12]);
}

#[rstest]
fn given_leaf_when_finding_parent_then_immediate_parent_returned(forest: Vec<Value>) {
    let child = json!({"id": 8});
    let parent = find_parent(Some(&forest[0]), Some(&child), "id", CHILDREN);
    assert_eq!(parent.map(id_of), Some(3));
    assert!(find_parent(Some(&forest[1]), Some(&child), "id", CHILDREN).is_none());
    assert!(find_parent::<Value>(None, Some(&child), "id", CHILDREN).is_none());
    assert!(find_parent(Some(&forest[0]), None, "id", CHILDREN).is_none());
}

#[rstest]
fn given_deep_target_when_finding_path_then_root_to_node(forest: Vec<Value>) {
    let path = find_path(&forest, |node| id_of(node) == 12, CHILDREN).unwrap();
    assert_eq!(path.into_iter().map(id_of).collect::<Vec<_>>(), vec![10, 11, 12]);

    let path = find_path(&forest, |node| id_of(node) == 9, CHILDREN).unwrap();
    assert_eq!(path.into_iter().map(id_of).collect::<Vec<_>>(), vec![1, 3, 9]);

    assert!(find_path(&forest, |node| id_of(node) == 99, CHILDREN).is_none());
}

#[rstest]
fn given_forest_when_flattening_then_preorder_without_children(forest: Vec<Value>) {
    let flat = flatten(&forest, CHILDREN);

    let ids: Vec<i64> = flat.iter().map(id_of).collect();
    assert_eq!(ids, vec![1, 2, 4, 5, 6, 3, 7, 8, 9, 10, 11, 12]);
    assert_eq!(flat.len(), iter_preorder(&forest, CHILDREN).count());
    assert!(flat.iter().all(|node| node.get(CHILDREN).is_none()));
}

#[test]
fn given_malformed_children_when_walking_then_treated_as_leaves() {
    let forest = vec![json!({"id": 1, "children": "oops"}), json!(42)];

    assert_eq!(count_nodes_at_depth(&forest[0], 1, CHILDREN), 0);
    assert_eq!(flatten(&forest, CHILDREN).len(), 2);
    assert!(forest[1].children(CHILDREN).is_empty());
    assert!(find_node(&forest, |node| node == &json!(42), CHILDREN).is_some());
}

#[rstest]
fn given_service_with_defaults_when_querying_then_matches_domain(forest: Vec<Value>) {
    let service = TreeService::new(TreeSettings::default());

    assert_eq!(service.count_at_depth(&forest, 1), 3);
    assert_eq!(id_of(service.parent_of(&forest, &json!(12)).unwrap()), 11);
    assert_eq!(
        id_of(service.find_by_field(&forest, "id", &json!(7)).unwrap()),
        7
    );
    assert_eq!(service.flatten(&forest).len(), 12);
}

#[rstest]
fn given_forest_when_rendering_then_every_label_is_present(forest: Vec<Value>) {
    let rendered = TreeService::default().render(&forest);
    for id in [1, 5, 9, 12] {
        assert!(rendered.contains(&id.to_string()), "missing {id} in\n{rendered}");
    }
}
