//! Editor session.
//!
//! [`TreeEditor`] is the single owner of the current forest. UI events call
//! its methods; each method runs one store operation, replaces the current
//! forest with the result and notifies the change listeners. Lazy loads are
//! started here and their results are applied back on the same logical
//! thread through [`TreeEditor::next_load_event`] and
//! [`TreeEditor::apply_load_event`].

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::config::EditorConfig;
use crate::dnd::DropBounds;
use crate::dnd::DropDecision;
use crate::dnd::DropHandler;
use crate::dnd::DropPosition;
use crate::dnd::apply_drop;
use crate::error::EditorError;
use crate::error::LoadError;
use crate::lazy::ChildFetcher;
use crate::lazy::LazyLoader;
use crate::lazy::LoadEvent;
use crate::model::Forest;
use crate::model::Preorder;
use crate::model::TreeNode;
use crate::visible::VisibleRow;
use crate::visible::visible_rows;

/// Callback notified with every new forest.
pub type ChangeListener = Box<dyn FnMut(&Forest) + Send>;

/// Result of [`TreeEditor::toggle_expand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// The node was expanded or collapsed synchronously.
    Toggled { expanded: bool },
    /// The children are being fetched; the node expands once they arrive.
    LoadStarted,
    /// A fetch for this node is already in flight.
    AlreadyLoading,
    /// No node has this id.
    NotFound,
}

/// An editing session over a forest.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use arbor_lib::editor::ExpandOutcome;
/// use arbor_lib::editor::TreeEditor;
/// use arbor_lib::lazy::MockFetcher;
/// use arbor_lib::model::Forest;
/// use arbor_lib::model::TreeNode;
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let forest = Forest::new(vec![TreeNode::new("root", "Root")]);
/// let fetcher = MockFetcher::new().with_delay(std::time::Duration::ZERO);
/// let mut editor = TreeEditor::new(forest, Arc::new(fetcher));
///
/// assert_eq!(editor.toggle_expand("root"), ExpandOutcome::LoadStarted);
/// assert!(editor.run_until_idle().await.is_empty());
///
/// let root = editor.forest().find("root").unwrap();
/// assert!(root.is_expanded);
/// assert_eq!(root.children().len(), 2);
/// # });
/// ```
pub struct TreeEditor {
    forest: Forest,
    loader: LazyLoader,
    config: EditorConfig,
    listeners: Vec<ChangeListener>,
}

impl TreeEditor {
    /// Creates an editor with the default configuration.
    pub fn new(forest: Forest, fetcher: Arc<dyn ChildFetcher>) -> Self {
        Self::with_config(forest, fetcher, EditorConfig::default())
    }

    /// Creates an editor with the given configuration.
    ///
    /// Loading flags in `forest` are cleared: no load of this editor set them,
    /// so nothing would ever finish them.
    pub fn with_config(forest: Forest, fetcher: Arc<dyn ChildFetcher>, config: EditorConfig) -> Self {
        let cleared = forest.clear_loading();
        if !cleared.ptr_eq(&forest) {
            log::debug!("Cleared stale loading flags from the initial forest");
        }
        let forest = cleared;

        let loader = LazyLoader::new(fetcher).with_timeout(config.load_timeout);
        Self {
            forest,
            loader,
            config,
            listeners: Vec::new(),
        }
    }

    /// Returns the current forest.
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Registers a listener notified with every new forest.
    pub fn on_change(&mut self, listener: impl FnMut(&Forest) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Returns the rows a renderer should draw.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        visible_rows(&self.forest)
    }

    /// Returns `true` if a lazy load for `id` is in flight.
    pub fn is_load_pending(&self, id: &str) -> bool {
        self.loader.is_pending(id)
    }

    /// Returns the number of lazy loads in flight.
    pub fn pending_loads(&self) -> usize {
        self.loader.pending_count()
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Expands or collapses a node.
    ///
    /// Expanding a node that advertises children which were never loaded
    /// starts a fetch instead; the node expands when the result is applied.
    /// Must be called from within a tokio runtime when a fetch may start.
    pub fn toggle_expand(&mut self, id: &str) -> ExpandOutcome {
        let Some(node) = self.forest.find(id) else {
            return ExpandOutcome::NotFound;
        };
        if node.is_loading {
            return ExpandOutcome::AlreadyLoading;
        }

        if !node.is_expanded && node.needs_load() {
            if self.loader.start(id).is_none() {
                return ExpandOutcome::AlreadyLoading;
            }
            let next = self.forest.set_loading(id, true);
            self.commit(next);
            return ExpandOutcome::LoadStarted;
        }

        let expanded = !node.is_expanded;
        let next = self.forest.toggle_expanded(id);
        self.commit(next);
        ExpandOutcome::Toggled { expanded }
    }

    /// Adds a child named `name` at the end of `parent_id`'s children.
    ///
    /// The name is trimmed. Returns the generated id of the new node, or
    /// `None` if the parent does not exist.
    pub fn add_child(&mut self, parent_id: &str, name: &str) -> Result<Option<String>, EditorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::EmptyName);
        }
        let Some(parent) = self.forest.find(parent_id) else {
            return Ok(None);
        };
        if parent.is_loading {
            return Err(EditorError::Loading {
                id: parent_id.to_string(),
            });
        }

        let id = self.generate_id();
        let next = self.forest.add_child(parent_id, TreeNode::leaf(id.clone(), name));
        self.commit(next);
        Ok(Some(id))
    }

    /// Renames a node.
    ///
    /// The name is trimmed. Returns `false` if the node does not exist or
    /// already has this name.
    pub fn rename(&mut self, id: &str, name: &str) -> Result<bool, EditorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::EmptyName);
        }
        match self.forest.find(id) {
            Some(node) if node.name != name => {
                let next = self.forest.rename(id, name);
                Ok(self.commit(next))
            }
            _ => Ok(false),
        }
    }

    /// Deletes a node and its subtree.
    ///
    /// Pending loads anywhere in the subtree are cancelled first, so their
    /// results are never applied. Asking the user for confirmation is up to
    /// the caller.
    pub fn delete(&mut self, id: &str) -> bool {
        let subtree = self.forest.subtree_ids(id);
        if subtree.is_empty() {
            return false;
        }

        let cancelled = self.loader.cancel_all(&subtree);
        if cancelled > 0 {
            log::info!("Deleting '{}' cancelled {} pending load(s)", id, cancelled);
        }

        let next = self.forest.remove(id);
        self.commit(next)
    }

    /// Moves `dragged_id` relative to `target_id` if the drop is valid.
    pub fn move_node(&mut self, dragged_id: &str, target_id: &str, position: DropPosition) -> DropDecision {
        let (next, decision) = apply_drop(&self.forest, dragged_id, target_id, position);
        self.commit(next);
        decision
    }

    /// Classifies a drop from pointer geometry, then moves like
    /// [`move_node`](Self::move_node).
    pub fn drop_at(
        &mut self,
        dragged_id: &str,
        target_id: &str,
        bounds: DropBounds,
        pointer_y: f32,
    ) -> DropDecision {
        self.on_drop_at(dragged_id, target_id, bounds, pointer_y)
    }

    // -------------------------------------------------------------------------
    // Lazy loading
    // -------------------------------------------------------------------------

    /// Waits for the next finished load. Returns `None` once nothing is
    /// pending.
    pub async fn next_load_event(&mut self) -> Option<LoadEvent> {
        self.loader.next_event().await
    }

    /// Returns a finished load without waiting, if one is ready.
    pub fn try_next_load_event(&mut self) -> Option<LoadEvent> {
        self.loader.try_next_event()
    }

    /// Applies a finished load to the forest.
    ///
    /// On success the children are installed and the node expands. On failure
    /// the loading flag is cleared and the node stays unloaded so expanding it
    /// again retries. Returns whether the forest changed.
    pub fn apply_load_event(&mut self, event: LoadEvent) -> Result<bool, LoadError> {
        let LoadEvent {
            node_id, result, ..
        } = event;

        match result {
            Ok(children) => {
                let children = self.admit_children(&node_id, children);
                log::debug!("Loaded {} child(ren) of '{}'", children.len(), node_id);
                let next = self
                    .forest
                    .set_children(&node_id, children)
                    .set_expanded(&node_id, true);
                Ok(self.commit(next))
            }
            Err(source) => {
                log::warn!("Loading children of '{}' failed: {}", node_id, source);
                let next = self.forest.set_loading(&node_id, false);
                self.commit(next);
                Err(LoadError { node_id, source })
            }
        }
    }

    /// Applies finished loads until none are pending.
    ///
    /// Returns the loads that failed.
    pub async fn run_until_idle(&mut self) -> Vec<LoadError> {
        let mut errors = Vec::new();
        while let Some(event) = self.next_load_event().await {
            if let Err(error) = self.apply_load_event(event) {
                errors.push(error);
            }
        }
        errors
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Replaces the forest and notifies listeners, unless nothing changed.
    fn commit(&mut self, next: Forest) -> bool {
        if next.ptr_eq(&self.forest) {
            return false;
        }
        self.forest = next;
        for listener in &mut self.listeners {
            listener(&self.forest);
        }
        true
    }

    fn generate_id(&self) -> String {
        format!("{}-{}", self.config.id_prefix, Uuid::new_v4().simple())
    }

    /// Drops fetched children whose subtree would reuse an id already in the
    /// forest (or in an earlier fetched sibling).
    fn admit_children(&self, parent_id: &str, children: Vec<TreeNode>) -> Vec<TreeNode> {
        let mut taken: HashSet<String> = self.forest.iter().map(|node| node.id.clone()).collect();

        children
            .into_iter()
            .filter(|child| {
                let ids: Vec<&str> = std::iter::once(child)
                    .chain(Preorder::new(child.children()))
                    .map(|node| node.id.as_str())
                    .collect();
                let unique: HashSet<&str> = ids.iter().copied().collect();

                if unique.len() != ids.len() || ids.iter().any(|id| taken.contains(*id)) {
                    log::warn!(
                        "Dropping fetched child '{}' of '{}': id already in use",
                        child.id,
                        parent_id
                    );
                    return false;
                }
                taken.extend(ids.into_iter().map(str::to_string));
                true
            })
            .collect()
    }
}

impl DropHandler for TreeEditor {
    fn on_drop(&mut self, dragged_id: &str, target_id: &str, position: DropPosition) -> DropDecision {
        self.move_node(dragged_id, target_id, position)
    }
}

impl std::fmt::Debug for TreeEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeEditor")
            .field("forest", &self.forest)
            .field("loader", &self.loader)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
