//! Editor input errors

/// Errors returned by [`TreeEditor`](crate::editor::TreeEditor) operations
/// that take user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    /// A node name was empty after trimming.
    #[error("Node name must not be empty")]
    EmptyName,

    /// A child cannot be added while the parent's children are loading.
    #[error("Children of '{id}' are still loading")]
    Loading { id: String },
}
