//! Single-node mutations

use std::sync::Arc;

use super::update_in;
use crate::model::Forest;
use crate::model::TreeNode;

impl Forest {
    /// Applies `edit` to the node with `id`, or returns an unchanged forest.
    fn update(&self, id: &str, mut edit: impl FnMut(&mut TreeNode)) -> Forest {
        match update_in(self.roots(), id, &mut edit) {
            Some(roots) => Forest::from_shared(roots),
            None => self.clone(),
        }
    }

    /// Removes the node with `id` together with its whole subtree, wherever it
    /// occurs.
    pub fn remove(&self, id: &str) -> Forest {
        match remove_in(self.roots(), id) {
            Some(roots) => Forest::from_shared(roots),
            None => self.clone(),
        }
    }

    /// Appends `node` to the end of the children of `parent_id`.
    ///
    /// A parent whose children were never loaded gets a one-element child
    /// list. The `has_children` hint of the parent is left alone.
    pub fn add_child(&self, parent_id: &str, node: TreeNode) -> Forest {
        let node = Arc::new(node);
        self.update(parent_id, |parent| {
            parent
                .children
                .get_or_insert_with(Vec::new)
                .push(Arc::clone(&node));
        })
    }

    /// Replaces the name of the node with `id`.
    pub fn rename(&self, id: &str, name: &str) -> Forest {
        self.update(id, |node| node.name = name.to_string())
    }

    /// Flips the expanded flag of the node with `id`.
    pub fn toggle_expanded(&self, id: &str) -> Forest {
        self.update(id, |node| node.is_expanded = !node.is_expanded)
    }

    /// Sets the expanded flag of the node with `id`.
    pub fn set_expanded(&self, id: &str, expanded: bool) -> Forest {
        self.update(id, |node| node.is_expanded = expanded)
    }

    /// Sets the loading flag of the node with `id`.
    pub fn set_loading(&self, id: &str, loading: bool) -> Forest {
        self.update(id, |node| node.is_loading = loading)
    }

    /// Installs loaded children on the node with `id`.
    ///
    /// Also updates the `has_children` hint to match and clears the loading
    /// flag.
    pub fn set_children(&self, id: &str, children: Vec<TreeNode>) -> Forest {
        let children: Vec<_> = children.into_iter().map(Arc::new).collect();
        self.update(id, |node| {
            node.has_children = !children.is_empty();
            node.children = Some(children.clone());
            node.is_loading = false;
        })
    }

    /// Clears the loading flag on every node.
    ///
    /// Used when a forest is adopted without the loads that set those flags,
    /// so the affected nodes can be expanded again.
    pub fn clear_loading(&self) -> Forest {
        match clear_loading_in(self.roots()) {
            Some(roots) => Forest::from_shared(roots),
            None => self.clone(),
        }
    }
}

/// Rebuilds only the paths that lead to a loading node.
fn clear_loading_in(nodes: &[Arc<TreeNode>]) -> Option<Vec<Arc<TreeNode>>> {
    let mut changed = false;
    let rebuilt: Vec<_> = nodes
        .iter()
        .map(|node| {
            let children = clear_loading_in(node.children());
            if !node.is_loading && children.is_none() {
                return Arc::clone(node);
            }
            changed = true;
            let mut cleared = match children {
                Some(children) => node.with_children(children),
                None => TreeNode::clone(node),
            };
            cleared.is_loading = false;
            Arc::new(cleared)
        })
        .collect();

    changed.then_some(rebuilt)
}

/// Drops every node with `id` below `nodes`, or `None` if there is none.
fn remove_in(nodes: &[Arc<TreeNode>], id: &str) -> Option<Vec<Arc<TreeNode>>> {
    let mut changed = false;
    let mut kept = Vec::with_capacity(nodes.len());

    for node in nodes {
        if node.id == id {
            changed = true;
            continue;
        }
        match remove_in(node.children(), id) {
            Some(children) => {
                changed = true;
                kept.push(Arc::new(node.with_children(children)));
            }
            None => kept.push(Arc::clone(node)),
        }
    }

    changed.then_some(kept)
}
