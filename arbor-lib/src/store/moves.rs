//! Subtree relocation

use std::sync::Arc;

use crate::dnd::DropPosition;
use crate::model::Forest;
use crate::model::TreeNode;

impl Forest {
    /// Moves the subtree rooted at `dragged_id` next to or into `target_id`.
    ///
    /// The dragged subtree is first extracted, then spliced before the target,
    /// after it, or appended to its children, depending on `position`.
    ///
    /// Returns the forest unchanged when the dragged node does not exist, or
    /// when the target cannot be found once the dragged subtree is taken out
    /// (the target is the dragged node or lives inside it). A move never drops
    /// nodes.
    ///
    /// # Example
    ///
    /// ```
    /// use arbor_lib::dnd::DropPosition;
    /// use arbor_lib::model::Forest;
    /// use arbor_lib::model::TreeNode;
    ///
    /// let forest = Forest::new(vec![TreeNode::branch(
    ///     "r",
    ///     "Root",
    ///     vec![TreeNode::leaf("c1", "A"), TreeNode::leaf("c2", "B")],
    /// )]);
    ///
    /// let moved = forest.move_node("c2", "c1", DropPosition::Before);
    /// let order: Vec<_> = moved.find("r").unwrap().children().iter().map(|c| c.id.as_str()).collect();
    /// assert_eq!(order, ["c2", "c1"]);
    /// ```
    pub fn move_node(&self, dragged_id: &str, target_id: &str, position: DropPosition) -> Forest {
        let mut dragged = None;
        let Some(without) = extract_in(self.roots(), dragged_id, &mut dragged) else {
            return self.clone();
        };
        let Some(dragged) = dragged else {
            return self.clone();
        };

        match insert_in(&without, target_id, position, &dragged) {
            Some(roots) => Forest::from_shared(roots),
            None => {
                log::debug!(
                    "move of '{}' abandoned: target '{}' not reachable",
                    dragged_id,
                    target_id
                );
                self.clone()
            }
        }
    }
}

/// Takes the first node with `id` out of `nodes`, storing it in `taken`.
fn extract_in(
    nodes: &[Arc<TreeNode>],
    id: &str,
    taken: &mut Option<Arc<TreeNode>>,
) -> Option<Vec<Arc<TreeNode>>> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id == id {
            *taken = Some(Arc::clone(node));
            let mut rest = nodes.to_vec();
            rest.remove(index);
            return Some(rest);
        }
        if let Some(children) = extract_in(node.children(), id, taken) {
            let mut rebuilt = nodes.to_vec();
            rebuilt[index] = Arc::new(node.with_children(children));
            return Some(rebuilt);
        }
    }
    None
}

/// Splices `dragged` relative to the first node with `target_id`.
fn insert_in(
    nodes: &[Arc<TreeNode>],
    target_id: &str,
    position: DropPosition,
    dragged: &Arc<TreeNode>,
) -> Option<Vec<Arc<TreeNode>>> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id == target_id {
            let mut rebuilt = nodes.to_vec();
            match position {
                DropPosition::Before => rebuilt.insert(index, Arc::clone(dragged)),
                DropPosition::After => rebuilt.insert(index + 1, Arc::clone(dragged)),
                DropPosition::Inside => {
                    let mut children = node.children().to_vec();
                    children.push(Arc::clone(dragged));
                    rebuilt[index] = Arc::new(node.with_children(children));
                }
            }
            return Some(rebuilt);
        }
        if let Some(children) = insert_in(node.children(), target_id, position, dragged) {
            let mut rebuilt = nodes.to_vec();
            rebuilt[index] = Arc::new(node.with_children(children));
            return Some(rebuilt);
        }
    }
    None
}
