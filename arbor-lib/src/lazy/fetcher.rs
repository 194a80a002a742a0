//! Child fetcher trait

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::TreeNode;

/// Source of children for nodes that are loaded on demand.
///
/// Implementations decide latency and failure behaviour. Returned nodes are
/// installed as-is below the requested node, so they should carry ids that
/// are unique across the whole forest.
///
/// # Example
///
/// ```
/// use arbor_lib::error::FetchError;
/// use arbor_lib::lazy::ChildFetcher;
/// use arbor_lib::model::TreeNode;
/// use async_trait::async_trait;
///
/// struct Directory;
///
/// #[async_trait]
/// impl ChildFetcher for Directory {
///     async fn fetch_children(&self, node_id: &str) -> Result<Vec<TreeNode>, FetchError> {
///         Ok(vec![TreeNode::leaf(format!("{node_id}/readme"), "README")])
///     }
/// }
/// ```
#[async_trait]
pub trait ChildFetcher: Send + Sync {
    /// Fetches the children of `node_id`.
    async fn fetch_children(&self, node_id: &str) -> Result<Vec<TreeNode>, FetchError>;
}
