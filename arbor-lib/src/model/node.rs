//! Tree node

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

/// A single labeled node in the tree.
///
/// Nodes are immutable once placed in a [`Forest`](super::Forest): every store
/// operation builds new nodes along the path to its target and shares the
/// untouched subtrees through `Arc`.
///
/// `children` distinguishes "not loaded yet" (`None`) from "loaded, no
/// children" (`Some` of an empty vec). `has_children` is only a hint used to
/// offer expansion before anything has been fetched. When it is missing from
/// JSON the node counts as expandable; only an explicit `false` marks it as a
/// leaf.
///
/// # Example
///
/// ```
/// use arbor_lib::model::TreeNode;
///
/// let folder = TreeNode::branch("src", "src", vec![TreeNode::leaf("main", "main.rs")]);
/// assert!(folder.is_loaded());
/// assert_eq!(folder.children().len(), 1);
///
/// let remote = TreeNode::new("remote", "Remote");
/// assert!(!remote.is_loaded());
/// assert!(remote.can_expand());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Unique, stable identifier.
    pub id: String,

    /// Display label.
    pub name: String,

    /// Child nodes, or `None` if they have not been loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Arc<TreeNode>>>,

    /// Whether the children are shown.
    #[serde(default)]
    pub is_expanded: bool,

    /// Whether a fetch for the children is in flight.
    #[serde(default)]
    pub is_loading: bool,

    /// Hint that the node has children, even before they are loaded.
    #[serde(default = "expandable_by_default")]
    pub has_children: bool,
}

impl TreeNode {
    /// Creates a collapsed node whose children have not been loaded.
    ///
    /// The node offers expansion; use [`with_has_children`](Self::with_has_children)
    /// to mark it as a leaf.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: None,
            is_expanded: false,
            is_loading: false,
            has_children: true,
        }
    }

    /// Creates a node that is known to have no children.
    pub fn leaf(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            children: Some(Vec::new()),
            has_children: false,
            ..Self::new(id, name)
        }
    }

    /// Creates a node with loaded children.
    pub fn branch(id: impl Into<String>, name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            has_children: !children.is_empty(),
            children: Some(children.into_iter().map(Arc::new).collect()),
            ..Self::new(id, name)
        }
    }

    /// Sets the expanded flag.
    pub fn expanded(mut self, expanded: bool) -> Self {
        self.is_expanded = expanded;
        self
    }

    /// Sets the `has_children` hint.
    pub fn with_has_children(mut self, has_children: bool) -> Self {
        self.has_children = has_children;
        self
    }

    /// Returns the loaded children, or an empty slice if none are loaded.
    pub fn children(&self) -> &[Arc<TreeNode>] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Returns `true` once the children have been loaded (even if empty).
    pub fn is_loaded(&self) -> bool {
        self.children.is_some()
    }

    /// Returns `true` if the expand affordance should be offered.
    pub fn can_expand(&self) -> bool {
        self.has_children || !self.children().is_empty()
    }

    /// Returns `true` if expanding this node must fetch its children first.
    pub fn needs_load(&self) -> bool {
        self.has_children && self.children.is_none() && !self.is_loading
    }

    /// Copy of this node with `children` replaced.
    pub(crate) fn with_children(&self, children: Vec<Arc<TreeNode>>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            children: Some(children),
            is_expanded: self.is_expanded,
            is_loading: self.is_loading,
            has_children: self.has_children,
        }
    }
}

fn expandable_by_default() -> bool {
    true
}
