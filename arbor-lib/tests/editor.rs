//! Editor session: change notification, lazy loading and drops.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use arbor_lib::dnd::DropBounds;
use arbor_lib::dnd::DropDecision;
use arbor_lib::dnd::DropHandler;
use arbor_lib::dnd::DropPosition;
use arbor_lib::dnd::DropRejection;
use arbor_lib::error::EditorError;
use arbor_lib::error::FetchError;
use arbor_lib::lazy::ChildFetcher;
use arbor_lib::lazy::MockFetcher;
use arbor_lib::model::Forest;
use arbor_lib::model::TreeNode;
use arbor_lib::visible::Affordance;
use arbor_lib::EditorConfig;
use arbor_lib::ExpandOutcome;
use arbor_lib::TreeEditor;
use async_trait::async_trait;

// =============================================================================
// Helpers
// =============================================================================

/// Serves fixed children per node id; ids without an entry fail.
struct TableFetcher {
    table: HashMap<String, Vec<TreeNode>>,
}

impl TableFetcher {
    fn new(entries: Vec<(&str, Vec<TreeNode>)>) -> Self {
        Self {
            table: entries
                .into_iter()
                .map(|(id, children)| (id.to_string(), children))
                .collect(),
        }
    }
}

#[async_trait]
impl ChildFetcher for TableFetcher {
    async fn fetch_children(&self, node_id: &str) -> Result<Vec<TreeNode>, FetchError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.table
            .get(node_id)
            .cloned()
            .ok_or_else(|| FetchError::unavailable(format!("no children for {node_id}")))
    }
}

fn initial() -> Forest {
    Forest::new(vec![
        TreeNode::branch(
            "root-1",
            "Level A",
            vec![
                TreeNode::branch("root-1-child-1", "Level B", vec![TreeNode::leaf("leaf", "Level C")])
                    .expanded(true),
                TreeNode::new("root-1-child-2", "Level B"),
            ],
        )
        .expanded(true),
    ])
}

fn mock_editor() -> TreeEditor {
    TreeEditor::new(initial(), Arc::new(MockFetcher::new()))
}

// =============================================================================
// Change notification
// =============================================================================

#[test]
fn test_listeners_see_every_change_and_only_changes() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut editor = mock_editor();
    let sink = Arc::clone(&seen);
    editor.on_change(move |forest| sink.lock().unwrap().push(forest.clone()));

    assert!(editor.rename("leaf", "Renamed").unwrap());
    assert!(!editor.rename("leaf", "Renamed").unwrap());
    assert!(!editor.rename("missing", "X").unwrap());
    assert!(editor.delete("leaf"));
    assert!(!editor.delete("leaf"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].find("leaf").unwrap().name, "Renamed");
    assert_eq!(&seen[1], editor.forest());
}

// =============================================================================
// Editing
// =============================================================================

#[test]
fn test_add_child_generates_unique_ids() {
    let mut editor = TreeEditor::with_config(
        initial(),
        Arc::new(MockFetcher::new()),
        EditorConfig::default().with_id_prefix("item"),
    );

    let first = editor.add_child("leaf", "  First  ").unwrap().unwrap();
    let second = editor.add_child("leaf", "Second").unwrap().unwrap();

    assert!(first.starts_with("item-"));
    assert_ne!(first, second);
    let parent = editor.forest().find("leaf").unwrap();
    let names: Vec<_> = parent.children().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["First", "Second"]);
    assert!(editor.forest().duplicate_ids().is_empty());
}

#[test]
fn test_add_child_validation() {
    let mut editor = mock_editor();
    assert_eq!(editor.add_child("leaf", "   "), Err(EditorError::EmptyName));
    assert_eq!(editor.add_child("missing", "X"), Ok(None));
    assert_eq!(editor.rename("leaf", ""), Err(EditorError::EmptyName));
}

#[test]
fn test_synchronous_toggle_for_loaded_nodes() {
    let mut editor = mock_editor();
    assert_eq!(
        editor.toggle_expand("root-1-child-1"),
        ExpandOutcome::Toggled { expanded: false }
    );
    assert_eq!(
        editor.toggle_expand("leaf"),
        ExpandOutcome::Toggled { expanded: true }
    );
    assert_eq!(editor.toggle_expand("missing"), ExpandOutcome::NotFound);
    assert_eq!(editor.pending_loads(), 0);
}

#[test]
fn test_drop_handler_uses_pointer_geometry() {
    let mut editor = mock_editor();
    let bounds = DropBounds::new(100.0, 30.0);

    let decision = editor.on_drop_at("leaf", "root-1-child-2", bounds, 115.0);
    assert_eq!(
        decision,
        DropDecision::Moved {
            dragged_id: "leaf".to_string(),
            target_id: "root-1-child-2".to_string(),
            position: DropPosition::Inside,
        }
    );
    assert_eq!(
        editor.forest().find_parent("leaf").map(|p| p.id.as_str()),
        Some("root-1-child-2")
    );

    let decision = editor.drop_at("root-1", "leaf", bounds, 115.0);
    assert_eq!(decision, DropDecision::Rejected(DropRejection::IntoOwnSubtree));
    assert_eq!(editor.forest().count_nodes(), 4);
}

#[test]
fn test_visible_rows_follow_edits() {
    let mut editor = mock_editor();
    let ids: Vec<_> = editor.visible_rows().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, ["root-1", "root-1-child-1", "leaf", "root-1-child-2"]);

    editor.toggle_expand("root-1");
    assert_eq!(editor.visible_rows().len(), 1);
    assert_eq!(editor.visible_rows()[0].affordance, Affordance::Collapsed);
}

// =============================================================================
// Lazy loading
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_lazy_load_expands_node() {
    let mut editor = mock_editor();

    assert_eq!(editor.toggle_expand("root-1-child-2"), ExpandOutcome::LoadStarted);
    let node = editor.forest().find("root-1-child-2").unwrap();
    assert!(node.is_loading);
    assert!(!node.is_loaded());
    assert_eq!(editor.toggle_expand("root-1-child-2"), ExpandOutcome::AlreadyLoading);

    let rows = editor.visible_rows();
    assert_eq!(rows.last().unwrap().affordance, Affordance::Loading);

    assert!(editor.run_until_idle().await.is_empty());

    let node = editor.forest().find("root-1-child-2").unwrap();
    assert!(!node.is_loading);
    assert!(node.is_expanded);
    assert!(node.has_children);
    let ids: Vec<_> = node.children().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["root-1-child-2-child-0", "root-1-child-2-child-1"]);
}

#[tokio::test(start_paused = true)]
async fn test_nodes_without_hint_load_on_expand() {
    let forest = Forest::from_json(
        r#"[{"id":"r","name":"Root","children":[{"id":"c1","name":"A"},{"id":"c2","name":"B"}]}]"#,
    )
    .unwrap();
    let mut editor = TreeEditor::new(forest, Arc::new(MockFetcher::new()));

    assert_eq!(editor.toggle_expand("r"), ExpandOutcome::Toggled { expanded: true });
    assert_eq!(editor.visible_rows()[1].affordance, Affordance::Collapsed);

    assert_eq!(editor.toggle_expand("c1"), ExpandOutcome::LoadStarted);
    assert!(editor.run_until_idle().await.is_empty());
    assert_eq!(editor.forest().find("c1").unwrap().children().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_stale_loading_flag_is_retryable() {
    let forest = Forest::from_json(r#"[{"id":"r","name":"R","hasChildren":true,"isLoading":true}]"#).unwrap();
    let mut editor = TreeEditor::new(forest, Arc::new(MockFetcher::new()));

    let node = editor.forest().find("r").unwrap();
    assert!(!node.is_loading);
    assert_eq!(editor.visible_rows()[0].affordance, Affordance::Collapsed);

    assert_eq!(editor.toggle_expand("r"), ExpandOutcome::LoadStarted);
    assert!(editor.run_until_idle().await.is_empty());
    let node = editor.forest().find("r").unwrap();
    assert!(node.is_expanded);
    assert_eq!(node.children().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_loaded_node_toggles_without_fetching() {
    let mut editor = mock_editor();
    editor.toggle_expand("root-1-child-2");
    editor.run_until_idle().await;

    assert_eq!(
        editor.toggle_expand("root-1-child-2"),
        ExpandOutcome::Toggled { expanded: false }
    );
    assert_eq!(
        editor.toggle_expand("root-1-child-2"),
        ExpandOutcome::Toggled { expanded: true }
    );
    assert_eq!(editor.pending_loads(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_delete_cancels_pending_load() {
    let changes = Arc::new(Mutex::new(0usize));
    let mut editor = mock_editor();
    let counter = Arc::clone(&changes);
    editor.on_change(move |_| *counter.lock().unwrap() += 1);

    editor.toggle_expand("root-1-child-2");
    assert!(editor.is_load_pending("root-1-child-2"));

    assert!(editor.delete("root-1"));
    assert!(!editor.is_load_pending("root-1-child-2"));
    assert!(editor.next_load_event().await.is_none());

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(editor.try_next_load_event().is_none());
    assert!(editor.forest().is_empty());
    assert_eq!(*changes.lock().unwrap(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_failed_load_is_retryable() {
    let fetcher = TableFetcher::new(vec![]);
    let mut editor = TreeEditor::new(initial(), Arc::new(fetcher));

    editor.toggle_expand("root-1-child-2");
    let errors = editor.run_until_idle().await;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].node_id, "root-1-child-2");
    assert!(matches!(errors[0].source, FetchError::Unavailable(_)));

    let node = editor.forest().find("root-1-child-2").unwrap();
    assert!(!node.is_loading);
    assert!(node.has_children);
    assert!(!node.is_loaded());
    assert!(!node.is_expanded);

    assert_eq!(editor.toggle_expand("root-1-child-2"), ExpandOutcome::LoadStarted);
}

#[tokio::test(start_paused = true)]
async fn test_load_timeout() {
    let mut editor = TreeEditor::with_config(
        initial(),
        Arc::new(MockFetcher::new().with_delay(Duration::from_secs(10))),
        EditorConfig::default().with_load_timeout(Duration::from_secs(1)),
    );

    editor.toggle_expand("root-1-child-2");
    let errors = editor.run_until_idle().await;
    assert_eq!(errors[0].source, FetchError::Timeout(Duration::from_secs(1)));
}

#[tokio::test(start_paused = true)]
async fn test_fetched_children_with_taken_ids_are_dropped() {
    let fetcher = TableFetcher::new(vec![(
        "root-1-child-2",
        vec![
            TreeNode::leaf("leaf", "Clash"),
            TreeNode::leaf("fresh", "Fresh"),
            TreeNode::leaf("fresh", "Fresh twin"),
        ],
    )]);
    let mut editor = TreeEditor::new(initial(), Arc::new(fetcher));

    editor.toggle_expand("root-1-child-2");
    assert!(editor.run_until_idle().await.is_empty());

    let node = editor.forest().find("root-1-child-2").unwrap();
    let names: Vec<_> = node.children().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Fresh"]);
    assert!(editor.forest().duplicate_ids().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_loading_parent_refuses_new_children_and_inside_drops() {
    let mut editor = mock_editor();
    editor.toggle_expand("root-1-child-2");

    assert_eq!(
        editor.add_child("root-1-child-2", "Early"),
        Err(EditorError::Loading {
            id: "root-1-child-2".to_string()
        })
    );
    assert_eq!(
        editor.move_node("leaf", "root-1-child-2", DropPosition::Inside),
        DropDecision::Rejected(DropRejection::TargetLoading)
    );

    editor.run_until_idle().await;
    assert!(editor.add_child("root-1-child-2", "Late").unwrap().is_some());
    assert_eq!(editor.forest().find("root-1-child-2").unwrap().children().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_moving_a_loading_node_keeps_its_load() {
    let mut editor = mock_editor();
    editor.toggle_expand("root-1-child-2");

    let decision = editor.move_node("root-1-child-2", "root-1", DropPosition::Before);
    assert!(decision.is_moved());

    editor.run_until_idle().await;
    let node = editor.forest().find("root-1-child-2").unwrap();
    assert!(editor.forest().find_parent("root-1-child-2").is_none());
    assert_eq!(node.children().len(), 2);
}
