//! Cancellable load tasks

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::ChildFetcher;
use crate::error::FetchError;
use crate::model::TreeNode;

/// Result of one finished load.
#[derive(Debug)]
pub struct LoadEvent {
    /// The node whose children were requested.
    pub node_id: String,
    /// Identifies the load attempt; stale attempts are never delivered.
    pub generation: u64,
    /// Fetched children, or why there are none.
    pub result: Result<Vec<TreeNode>, FetchError>,
}

/// Bookkeeping for a load that has not been delivered yet.
#[derive(Debug)]
struct PendingLoad {
    generation: u64,
    cancel: CancellationToken,
}

/// Runs child fetches as tasks keyed by node id.
///
/// At most one load per node is pending at a time. Finished loads are queued
/// and handed out by [`next_event`](Self::next_event) one at a time, so the
/// owner applies them on its own logical thread. Cancelling a load (or starting
/// a newer one) guarantees its result is never delivered.
///
/// Loads are spawned onto the current tokio runtime, so [`start`](Self::start)
/// must be called from within one.
pub struct LazyLoader {
    fetcher: Arc<dyn ChildFetcher>,
    timeout: Option<Duration>,
    pending: HashMap<String, PendingLoad>,
    next_generation: u64,
    tx: mpsc::UnboundedSender<LoadEvent>,
    rx: mpsc::UnboundedReceiver<LoadEvent>,
}

impl LazyLoader {
    /// Creates a loader backed by `fetcher`.
    pub fn new(fetcher: Arc<dyn ChildFetcher>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            fetcher,
            timeout: None,
            pending: HashMap::new(),
            next_generation: 0,
            tx,
            rx,
        }
    }

    /// Sets an upper bound for each fetch.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Starts loading the children of `node_id`.
    ///
    /// Returns the generation of the new load, or `None` if a load for this
    /// node is already pending.
    pub fn start(&mut self, node_id: &str) -> Option<u64> {
        if self.pending.contains_key(node_id) {
            return None;
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        let cancel = CancellationToken::new();
        self.pending.insert(
            node_id.to_string(),
            PendingLoad {
                generation,
                cancel: cancel.clone(),
            },
        );

        log::debug!("Loading children of '{}' (generation {})", node_id, generation);

        let fetcher = Arc::clone(&self.fetcher);
        let timeout = self.timeout;
        let tx = self.tx.clone();
        let node_id = node_id.to_string();

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => Err(FetchError::Cancelled),
                result = fetch(fetcher.as_ref(), &node_id, timeout) => result,
            };
            // The receiver lives as long as the loader; a send error only
            // means the loader was dropped.
            let _ = tx.send(LoadEvent {
                node_id,
                generation,
                result,
            });
        });

        Some(generation)
    }

    /// Cancels the pending load of `node_id`, if any.
    pub fn cancel(&mut self, node_id: &str) -> bool {
        match self.pending.remove(node_id) {
            Some(load) => {
                load.cancel.cancel();
                log::debug!("Cancelled load of '{}' (generation {})", node_id, load.generation);
                true
            }
            None => false,
        }
    }

    /// Cancels the pending loads of every id in `node_ids`.
    ///
    /// Returns how many loads were cancelled.
    pub fn cancel_all<I, S>(&mut self, node_ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        node_ids
            .into_iter()
            .filter(|id| self.cancel(id.as_ref()))
            .count()
    }

    /// Returns `true` if a load for `node_id` is pending.
    pub fn is_pending(&self, node_id: &str) -> bool {
        self.pending.contains_key(node_id)
    }

    /// Returns the number of pending loads.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Waits for the next finished load.
    ///
    /// Results of cancelled or superseded loads are skipped. Returns `None`
    /// once nothing is pending, after discarding whatever stale results are
    /// already queued.
    pub async fn next_event(&mut self) -> Option<LoadEvent> {
        loop {
            if self.pending.is_empty() {
                while let Ok(event) = self.rx.try_recv() {
                    self.accept(&event);
                }
                return None;
            }
            let event = self.rx.recv().await?;
            if self.accept(&event) {
                return Some(event);
            }
        }
    }

    /// Returns the next finished load without waiting.
    pub fn try_next_event(&mut self) -> Option<LoadEvent> {
        while let Ok(event) = self.rx.try_recv() {
            if self.accept(&event) {
                return Some(event);
            }
        }
        None
    }

    /// Marks `event` delivered if it belongs to the current pending load.
    fn accept(&mut self, event: &LoadEvent) -> bool {
        let current = self
            .pending
            .get(&event.node_id)
            .is_some_and(|load| load.generation == event.generation);

        if current {
            self.pending.remove(&event.node_id);
        } else {
            log::debug!(
                "Discarding stale load of '{}' (generation {})",
                event.node_id,
                event.generation
            );
        }
        current
    }
}

impl Drop for LazyLoader {
    fn drop(&mut self) {
        for load in self.pending.values() {
            load.cancel.cancel();
        }
    }
}

impl std::fmt::Debug for LazyLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyLoader")
            .field("timeout", &self.timeout)
            .field("pending", &self.pending)
            .field("next_generation", &self.next_generation)
            .finish_non_exhaustive()
    }
}

async fn fetch(
    fetcher: &dyn ChildFetcher,
    node_id: &str,
    timeout: Option<Duration>,
) -> Result<Vec<TreeNode>, FetchError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fetcher.fetch_children(node_id))
            .await
            .map_err(|_| FetchError::Timeout(limit))?,
        None => fetcher.fetch_children(node_id).await,
    }
}
