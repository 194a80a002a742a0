//! Mock child fetcher

use std::time::Duration;

use async_trait::async_trait;

use super::ChildFetcher;
use crate::error::FetchError;
use crate::model::TreeNode;

/// Letters used for generated names, indexed by the parent's depth.
const LETTERS: [char; 7] = ['B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// A fetcher that invents children after a fixed delay.
///
/// Stands in for a real data source in demos and tests. The children of
/// `parent` are named `"{letter}{n}"` and get the ids `"{parent}-child-{i}"`.
/// The depth of a parent is the number of `-` separators in its id; children
/// shallower than `max_depth` advertise further children.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use arbor_lib::lazy::MockFetcher;
///
/// let fetcher = MockFetcher::new()
///     .with_delay(Duration::ZERO)
///     .with_child_count(3);
///
/// let children = fetcher.generate("root-1");
/// assert_eq!(children.len(), 3);
/// assert_eq!(children[0].id, "root-1-child-0");
/// assert_eq!(children[0].name, "C1");
/// ```
#[derive(Debug, Clone)]
pub struct MockFetcher {
    delay: Duration,
    child_count: usize,
    max_depth: usize,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(800),
            child_count: 2,
            max_depth: 3,
        }
    }
}

impl MockFetcher {
    /// Creates a fetcher with an 800 ms delay producing two children per node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the simulated latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets how many children each fetch produces.
    pub fn with_child_count(mut self, count: usize) -> Self {
        self.child_count = count;
        self
    }

    /// Sets the depth below which generated children advertise children.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Returns the simulated latency.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Generates the children of `parent_id` without waiting.
    pub fn generate(&self, parent_id: &str) -> Vec<TreeNode> {
        let depth = parent_id.matches('-').count();
        let letter = LETTERS[depth.min(LETTERS.len() - 1)];

        (0..self.child_count)
            .map(|i| {
                TreeNode::new(format!("{parent_id}-child-{i}"), format!("{letter}{}", i + 1))
                    .with_has_children(depth < self.max_depth)
            })
            .collect()
    }
}

#[async_trait]
impl ChildFetcher for MockFetcher {
    async fn fetch_children(&self, node_id: &str) -> Result<Vec<TreeNode>, FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.generate(node_id))
    }
}
