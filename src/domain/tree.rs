//! Search and traversal over loosely shaped trees and forests.
//!
//! Every function takes the name of the children field; malformed children
//! (missing, `null`, not a list) are treated as a leaf. Misses are `None`.

use std::collections::VecDeque;

use tracing::{debug, instrument, trace};

use crate::domain::node::TreeNode;

/// Counts the nodes exactly `depth` levels below `root` (root is depth 0).
///
/// Nodes at the target depth are never expanded. Returns 0 when the tree
/// is shallower than `depth`.
#[instrument(level = "debug", skip(root))]
pub fn count_nodes_at_depth<N: TreeNode>(root: &N, depth: usize, children_field: &str) -> usize {
    if depth == 0 {
        return 1;
    }

    let mut frontier: Vec<&N> = vec![root];
    for level in 1..depth {
        frontier = frontier
            .iter()
            .flat_map(|&node| node.children(children_field))
            .collect();
        if frontier.is_empty() {
            trace!(level, "tree ends above requested depth");
            return 0;
        }
    }

    frontier
        .iter()
        .map(|node| node.children(children_field).len())
        .sum()
}

/// Returns the first node matching `predicate`, searching the forest with a
/// FIFO queue: roots first, then each visited node's children appended as a
/// block behind whatever is already queued.
#[instrument(level = "debug", skip(forest, predicate))]
pub fn find_node<'a, N, P>(forest: &'a [N], mut predicate: P, children_field: &str) -> Option<&'a N>
where
    N: TreeNode,
    P: FnMut(&N) -> bool,
{
    let mut queue: VecDeque<&'a N> = forest.iter().collect();

    while let Some(node) = queue.pop_front() {
        if predicate(node) {
            return Some(node);
        }
        queue.extend(node.children(children_field));
    }

    debug!("no node matched");
    None
}

/// Returns the direct parent of `child` inside `tree`, comparing nodes by
/// the value of their identity field.
///
/// Each node's direct children are checked before descending into them.
/// `None` when either argument is absent, `child` has no identity value, or
/// nothing matches.
#[instrument(level = "debug", skip(tree, child))]
pub fn find_parent<'a, N: TreeNode>(
    tree: Option<&'a N>,
    child: Option<&N>,
    identity_field: &str,
    children_field: &str,
) -> Option<&'a N> {
    let target = child?.key(identity_field)?;
    parent_of(tree?, target, identity_field, children_field)
}

fn parent_of<'a, N: TreeNode>(
    node: &'a N,
    target: &N::Key,
    identity_field: &str,
    children_field: &str,
) -> Option<&'a N> {
    let children = node.children(children_field);
    if children
        .iter()
        .any(|c| c.key(identity_field) == Some(target))
    {
        return Some(node);
    }
    children
        .iter()
        .find_map(|c| parent_of(c, target, identity_field, children_field))
}

/// Returns the nodes from a root down to the first node (pre-order) that
/// matches `predicate`, both ends included.
///
/// Walks with an explicit stack of `(node, next child)` frames; the frames
/// on the stack are exactly the current root path.
#[instrument(level = "debug", skip(forest, predicate))]
pub fn find_path<'a, N, P>(forest: &'a [N], mut predicate: P, children_field: &str) -> Option<Vec<&'a N>>
where
    N: TreeNode,
    P: FnMut(&N) -> bool,
{
    for root in forest {
        if predicate(root) {
            return Some(vec![root]);
        }

        let mut stack: Vec<(&'a N, usize)> = vec![(root, 0)];
        while let Some(frame) = stack.last_mut() {
            let node: &'a N = frame.0;
            let next = frame.1;
            frame.1 += 1;

            match node.children(children_field).get(next) {
                Some(child) => {
                    if predicate(child) {
                        let mut path: Vec<&'a N> = stack.iter().map(|(n, _)| *n).collect();
                        path.push(child);
                        trace!(len = path.len(), "path found");
                        return Some(path);
                    }
                    stack.push((child, 0));
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    debug!("no path matched");
    None
}

/// All nodes of the forest in pre-order, each copied without its children
/// field.
#[instrument(level = "debug", skip(forest))]
pub fn flatten<N: TreeNode>(forest: &[N], children_field: &str) -> Vec<N> {
    iter_preorder(forest, children_field)
        .map(|node| node.detached(children_field))
        .collect()
}

/// Borrowing pre-order iterator over a forest.
pub fn iter_preorder<'a, N: TreeNode>(forest: &'a [N], children_field: &'a str) -> PreOrderIterator<'a, N> {
    PreOrderIterator {
        children_field,
        stack: forest.iter().rev().collect(),
    }
}

pub struct PreOrderIterator<'a, N> {
    children_field: &'a str,
    stack: Vec<&'a N>,
}

impl<'a, N: TreeNode> Iterator for PreOrderIterator<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack
            .extend(node.children(self.children_field).iter().rev());
        Some(node)
    }
}
