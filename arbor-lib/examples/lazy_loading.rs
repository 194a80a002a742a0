//! Lazy loading walkthrough.
//!
//! Run with: cargo run --example lazy_loading
//!
//! Expands a node whose children are fetched on demand, prints the outline
//! while the load is in flight and again once it has been applied.

use std::sync::Arc;

use arbor_lib::lazy::MockFetcher;
use arbor_lib::model::Forest;
use arbor_lib::model::TreeNode;
use arbor_lib::visible::outline;
use arbor_lib::ExpandOutcome;
use arbor_lib::TreeEditor;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let forest = Forest::new(vec![
        TreeNode::branch(
            "root-1",
            "Level A",
            vec![
                TreeNode::leaf("root-1-child-1", "Level B"),
                TreeNode::new("root-1-child-2", "Level B"),
            ],
        )
        .expanded(true),
    ]);

    let mut editor = TreeEditor::new(forest, Arc::new(MockFetcher::new()));
    editor.on_change(|forest| println!("-- forest changed ({} nodes)", forest.count_nodes()));

    println!("{}", outline(editor.forest()));

    if editor.toggle_expand("root-1-child-2") == ExpandOutcome::LoadStarted {
        println!("{}", outline(editor.forest()));
    }

    for error in editor.run_until_idle().await {
        eprintln!("{}", error);
    }

    println!("{}", outline(editor.forest()));
    println!("{}", editor.forest().to_json_pretty()?);
    Ok(())
}
