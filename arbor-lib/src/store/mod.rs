//! Tree store
//!
//! Pure operations on an immutable [`Forest`](crate::model::Forest). Every
//! operation takes `&self` and returns a new forest; the input is never
//! touched. Only the nodes on the path to the affected id are rebuilt, all
//! other subtrees are shared with the input.
//!
//! Operations are total: an id that is not in the forest is a no-op, never an
//! error. A no-op returns a forest that shares every root with the input, so
//! [`Forest::ptr_eq`](crate::model::Forest::ptr_eq) tells whether anything
//! changed.

mod moves;
mod mutate;
mod query;

use std::sync::Arc;

use crate::model::TreeNode;

/// Rebuilds the path to the first node with `id`, applying `edit` to it.
///
/// Returns `None` when `id` is not under `nodes`, so the caller can keep
/// sharing its original slice.
pub(crate) fn update_in(
    nodes: &[Arc<TreeNode>],
    id: &str,
    edit: &mut dyn FnMut(&mut TreeNode),
) -> Option<Vec<Arc<TreeNode>>> {
    for (index, node) in nodes.iter().enumerate() {
        let replacement = if node.id == id {
            let mut edited = TreeNode::clone(node);
            edit(&mut edited);
            edited
        } else {
            match update_in(node.children(), id, edit) {
                Some(children) => node.with_children(children),
                None => continue,
            }
        };

        let mut rebuilt = nodes.to_vec();
        rebuilt[index] = Arc::new(replacement);
        return Some(rebuilt);
    }
    None
}
