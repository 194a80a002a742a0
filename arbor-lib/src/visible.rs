//! Flattened view of the visible rows.
//!
//! A renderer draws the forest as a list of rows: every root, and below each
//! expanded node its loaded children. This module produces that list with an
//! explicit stack, independent of how the rows end up on screen.

use std::sync::Arc;

use crate::model::Forest;
use crate::model::TreeNode;

/// Badge letters by depth; deeper rows reuse the last one.
const LEVEL_BADGES: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// What the expand control of a row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// Children are being fetched.
    Loading,
    /// Children are shown; activating collapses.
    Expanded,
    /// Children are hidden (or not loaded yet); activating expands.
    Collapsed,
    /// Nothing to expand.
    Leaf,
}

/// A row in the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    /// Id of the node drawn on this row.
    pub id: String,
    /// Label.
    pub name: String,
    /// Depth in the tree (0 = root).
    pub depth: usize,
    /// State of the expand control.
    pub affordance: Affordance,
}

impl VisibleRow {
    fn from_node(node: &TreeNode, depth: usize) -> Self {
        let affordance = if node.is_loading {
            Affordance::Loading
        } else if !node.can_expand() {
            Affordance::Leaf
        } else if node.is_expanded {
            Affordance::Expanded
        } else {
            Affordance::Collapsed
        };

        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            depth,
            affordance,
        }
    }

    /// Letter badge for this row's depth.
    pub fn badge(&self) -> char {
        level_badge(self.depth)
    }
}

/// Returns the badge letter for a depth.
pub fn level_badge(depth: usize) -> char {
    LEVEL_BADGES[depth.min(LEVEL_BADGES.len() - 1)]
}

/// Flattens `forest` into the rows currently visible.
pub fn visible_rows(forest: &Forest) -> Vec<VisibleRow> {
    let mut rows = Vec::new();
    let mut stack: Vec<(&Arc<TreeNode>, usize)> =
        forest.roots().iter().rev().map(|node| (node, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        rows.push(VisibleRow::from_node(node, depth));

        if node.is_expanded && !node.is_loading {
            stack.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
        }
    }

    rows
}

/// Renders the visible rows as an indented outline, one row per line.
///
/// ```
/// use arbor_lib::model::Forest;
/// use arbor_lib::model::TreeNode;
/// use arbor_lib::visible::outline;
///
/// let forest = Forest::new(vec![
///     TreeNode::branch("r", "Root", vec![TreeNode::leaf("c", "Child")]).expanded(true),
/// ]);
/// assert_eq!(outline(&forest), "- [A] Root\n    • [B] Child\n");
/// ```
pub fn outline(forest: &Forest) -> String {
    let mut out = String::new();
    for row in visible_rows(forest) {
        let marker = match row.affordance {
            Affordance::Loading => '⟳',
            Affordance::Expanded => '-',
            Affordance::Collapsed => '+',
            Affordance::Leaf => '•',
        };
        out.push_str(&"    ".repeat(row.depth));
        out.push_str(&format!("{} [{}] {}\n", marker, row.badge(), row.name));
    }
    out
}
