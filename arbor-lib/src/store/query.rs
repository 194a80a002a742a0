//! Read-only lookups

use std::collections::HashSet;

use crate::model::Forest;
use crate::model::Preorder;
use crate::model::TreeNode;

impl Forest {
    /// Finds the first node with `id` in depth-first pre-order.
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        self.iter().find(|node| node.id == id)
    }

    /// Returns `true` if a node with `id` exists anywhere in the forest.
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Finds the direct parent of the node with `id`.
    ///
    /// Returns `None` for root nodes and for ids that are not in the forest.
    pub fn find_parent(&self, id: &str) -> Option<&TreeNode> {
        self.iter()
            .find(|node| node.children().iter().any(|child| child.id == id))
    }

    /// Returns `true` if `id` is `ancestor_id` itself or one of its
    /// descendants.
    pub fn is_in_subtree(&self, ancestor_id: &str, id: &str) -> bool {
        self.find(ancestor_id).is_some_and(|ancestor| {
            ancestor.id == id || Preorder::new(ancestor.children()).any(|node| node.id == id)
        })
    }

    /// Collects the ids of the subtree rooted at `id`, in pre-order and
    /// starting with `id` itself. Empty if `id` is not in the forest.
    pub fn subtree_ids(&self, id: &str) -> Vec<String> {
        let Some(root) = self.find(id) else {
            return Vec::new();
        };
        std::iter::once(root)
            .chain(Preorder::new(root.children()))
            .map(|node| node.id.clone())
            .collect()
    }

    /// Counts every node in the forest, loaded children included.
    pub fn count_nodes(&self) -> usize {
        self.iter().count()
    }

    /// Returns each id that occurs more than once, in order of its second
    /// occurrence.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.iter()
            .filter(|node| !seen.insert(node.id.as_str()))
            .filter(|node| reported.insert(node.id.as_str()))
            .map(|node| node.id.clone())
            .collect()
    }
}
