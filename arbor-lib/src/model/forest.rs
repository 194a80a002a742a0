//! Forest of root nodes

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::TreeNode;

/// An ordered sequence of root nodes.
///
/// `Forest` is the unit of state passed between store operations. Cloning is
/// cheap: only the root `Arc`s are copied.
///
/// # Example
///
/// ```
/// use arbor_lib::model::Forest;
/// use arbor_lib::model::TreeNode;
///
/// let forest = Forest::new(vec![TreeNode::branch(
///     "r",
///     "Root",
///     vec![TreeNode::leaf("c1", "A"), TreeNode::leaf("c2", "B")],
/// )]);
///
/// let ids: Vec<_> = forest.iter().map(|n| n.id.as_str()).collect();
/// assert_eq!(ids, ["r", "c1", "c2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<Arc<TreeNode>>,
}

impl Forest {
    /// Creates a forest from owned root nodes.
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Self {
            roots: roots.into_iter().map(Arc::new).collect(),
        }
    }

    /// Creates a forest from already shared root nodes.
    pub fn from_shared(roots: Vec<Arc<TreeNode>>) -> Self {
        Self { roots }
    }

    /// Parses a forest from its JSON representation (an array of nodes).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the forest as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Returns the root nodes.
    pub fn roots(&self) -> &[Arc<TreeNode>] {
        &self.roots
    }

    /// Returns the number of root nodes.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns `true` if there are no root nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Iterates over every node (including collapsed and unexpanded ones) in
    /// depth-first pre-order.
    pub fn iter(&self) -> Preorder<'_> {
        Preorder::new(&self.roots)
    }

    /// Returns `true` if both forests share the very same root nodes.
    ///
    /// Store operations that change nothing return a forest for which this
    /// holds, so it doubles as a cheap "did anything change" check.
    pub fn ptr_eq(&self, other: &Forest) -> bool {
        self.roots.len() == other.roots.len()
            && self
                .roots
                .iter()
                .zip(&other.roots)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl From<Vec<TreeNode>> for Forest {
    fn from(roots: Vec<TreeNode>) -> Self {
        Self::new(roots)
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = &'a TreeNode;
    type IntoIter = Preorder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth-first pre-order iterator over a forest.
///
/// Uses an explicit stack, so arbitrarily deep trees cannot overflow the call
/// stack.
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Preorder<'a> {
    pub(crate) fn new(nodes: &'a [Arc<TreeNode>]) -> Self {
        Self {
            stack: nodes.iter().rev().map(Arc::as_ref).collect(),
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(Arc::as_ref));
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Forest {
        Forest::new(vec![
            TreeNode::branch(
                "a",
                "A",
                vec![
                    TreeNode::branch("a1", "A1", vec![TreeNode::leaf("a1x", "A1X")]),
                    TreeNode::leaf("a2", "A2"),
                ],
            ),
            TreeNode::new("b", "B"),
        ])
    }

    #[test]
    fn test_preorder_visits_collapsed_children() {
        let ids: Vec<_> = sample().iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, ["a", "a1", "a1x", "a2", "b"]);
    }

    #[test]
    fn test_ptr_eq() {
        let forest = sample();
        let clone = forest.clone();
        assert!(forest.ptr_eq(&clone));
        assert!(!forest.ptr_eq(&sample()));
        assert_eq!(forest, sample());
    }

    #[test]
    fn test_json_is_an_array() {
        let forest = Forest::from_json(r#"[{"id":"x","name":"X","hasChildren":true}]"#).unwrap();
        assert_eq!(forest.len(), 1);
        assert!(forest.roots()[0].has_children);

        let json = forest.to_json_pretty().unwrap();
        assert!(json.trim_start().starts_with('['));
        assert_eq!(Forest::from_json(&json).unwrap(), forest);
    }
}
