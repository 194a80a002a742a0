//! Drop validation

use std::fmt;

use super::DropBounds;
use super::DropPosition;
use super::resolve_drop_zone;
use crate::model::Forest;

/// Why a drop did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejection {
    /// The node was dropped onto itself.
    SameNode,
    /// The dragged node is not in the forest.
    DraggedNotFound,
    /// The target is not in the forest.
    TargetNotFound,
    /// The target is inside the dragged subtree; the move would create a cycle.
    IntoOwnSubtree,
    /// The target's children are being loaded, so it cannot take a child yet.
    TargetLoading,
}

impl fmt::Display for DropRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::SameNode => "dropped onto itself",
            Self::DraggedNotFound => "dragged node not found",
            Self::TargetNotFound => "target node not found",
            Self::IntoOwnSubtree => "target is inside the dragged subtree",
            Self::TargetLoading => "target is still loading its children",
        };
        f.write_str(reason)
    }
}

/// Outcome of a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropDecision {
    /// The dragged subtree was moved.
    Moved {
        dragged_id: String,
        target_id: String,
        position: DropPosition,
    },
    /// The drop was suppressed and the forest left unchanged.
    Rejected(DropRejection),
}

impl DropDecision {
    /// Returns `true` if the forest changed.
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Checks whether dropping `dragged_id` at `position` relative to
/// `target_id` is allowed.
pub fn validate_drop(
    forest: &Forest,
    dragged_id: &str,
    target_id: &str,
    position: DropPosition,
) -> Result<(), DropRejection> {
    if dragged_id == target_id {
        return Err(DropRejection::SameNode);
    }
    if !forest.contains(dragged_id) {
        return Err(DropRejection::DraggedNotFound);
    }
    let Some(target) = forest.find(target_id) else {
        return Err(DropRejection::TargetNotFound);
    };
    if forest.is_in_subtree(dragged_id, target_id) {
        return Err(DropRejection::IntoOwnSubtree);
    }
    if position == DropPosition::Inside && target.is_loading {
        return Err(DropRejection::TargetLoading);
    }
    Ok(())
}

/// Validates a drop and applies it.
///
/// Returns the new forest (the input, shared, when rejected) and the
/// decision.
///
/// # Example
///
/// ```
/// use arbor_lib::dnd::apply_drop;
/// use arbor_lib::dnd::DropDecision;
/// use arbor_lib::dnd::DropPosition;
/// use arbor_lib::dnd::DropRejection;
/// use arbor_lib::model::Forest;
/// use arbor_lib::model::TreeNode;
///
/// let forest = Forest::new(vec![TreeNode::branch(
///     "a",
///     "A",
///     vec![TreeNode::leaf("a1", "A1")],
/// )]);
///
/// let (after, decision) = apply_drop(&forest, "a", "a1", DropPosition::Inside);
/// assert_eq!(decision, DropDecision::Rejected(DropRejection::IntoOwnSubtree));
/// assert_eq!(after, forest);
/// ```
pub fn apply_drop(
    forest: &Forest,
    dragged_id: &str,
    target_id: &str,
    position: DropPosition,
) -> (Forest, DropDecision) {
    if let Err(rejection) = validate_drop(forest, dragged_id, target_id, position) {
        log::debug!(
            "Drop of '{}' {} '{}' rejected: {}",
            dragged_id,
            position,
            target_id,
            rejection
        );
        return (forest.clone(), DropDecision::Rejected(rejection));
    }

    let moved = forest.move_node(dragged_id, target_id, position);
    let decision = DropDecision::Moved {
        dragged_id: dragged_id.to_string(),
        target_id: target_id.to_string(),
        position,
    };
    (moved, decision)
}

/// Receives drops from a drag-and-drop gesture source.
pub trait DropHandler {
    /// Handles a drop whose position is already classified.
    fn on_drop(&mut self, dragged_id: &str, target_id: &str, position: DropPosition) -> DropDecision;

    /// Handles a drop given the target's bounds and the pointer position.
    fn on_drop_at(
        &mut self,
        dragged_id: &str,
        target_id: &str,
        bounds: DropBounds,
        pointer_y: f32,
    ) -> DropDecision {
        let position = resolve_drop_zone(bounds, pointer_y);
        self.on_drop(dragged_id, target_id, position)
    }
}
