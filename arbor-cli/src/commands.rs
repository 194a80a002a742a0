//! Command execution.
//!
//! Each invocation loads the tree file into a [`TreeEditor`], runs one
//! command through it and writes the file back if the forest changed.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use arbor_lib::Forest;
use arbor_lib::TreeEditor;
use arbor_lib::TreeNode;
use arbor_lib::dnd::DropBounds;
use arbor_lib::dnd::DropDecision;
use arbor_lib::visible::outline;

use crate::cli::Cli;
use crate::cli::Command;
use crate::cli::EditCommand;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::paths;

/// Runs the parsed command line and returns the text to print.
pub async fn run(cli: Cli, config: &CliConfig) -> Result<String, CliError> {
    let path = match cli.file {
        Some(path) => path,
        None => paths::tree_file().ok_or(CliError::NoDefaultPath)?,
    };

    match cli.command {
        Command::Init { force } => init(&path, force),
        Command::Edit(command) => {
            let forest = load_forest(&path)?;
            let mut editor = TreeEditor::with_config(
                forest,
                Arc::new(config.mock_fetcher()),
                config.editor_config(),
            );
            let output = execute(&mut editor, command).await?;
            if output.changed {
                save_forest(&path, editor.forest())?;
                log::info!("Saved {}", path.display());
            }
            Ok(output.text)
        }
    }
}

/// Result of one edit command.
#[derive(Debug)]
pub struct Output {
    pub text: String,
    pub changed: bool,
}

/// Runs one command against the editor.
pub async fn execute(editor: &mut TreeEditor, command: EditCommand) -> Result<Output, CliError> {
    let before = editor.forest().clone();

    let message = match command {
        EditCommand::Show => None,
        EditCommand::Find { id } => {
            let node = editor
                .forest()
                .find(&id)
                .ok_or_else(|| CliError::NodeNotFound(id.clone()))?;
            return Ok(Output {
                text: outline(&Forest::new(vec![node.clone()])),
                changed: false,
            });
        }
        EditCommand::Rename { id, name } => {
            require(editor, &id)?;
            editor.rename(&id, &name)?;
            None
        }
        EditCommand::Add { parent, name } => {
            let id = editor
                .add_child(&parent, &name)?
                .ok_or(CliError::NodeNotFound(parent))?;
            Some(format!("added {}", id))
        }
        EditCommand::Delete { id, yes } => {
            require(editor, &id)?;
            if !yes {
                return Err(CliError::NotConfirmed(id));
            }
            editor.delete(&id);
            None
        }
        EditCommand::Toggle { id } => {
            require(editor, &id)?;
            editor.toggle_expand(&id);
            if let Some(error) = editor.run_until_idle().await.into_iter().next() {
                return Err(error.into());
            }
            None
        }
        EditCommand::Move {
            dragged,
            target,
            position,
        } => accept_drop(editor.move_node(&dragged, &target, position))?,
        EditCommand::Drop {
            dragged,
            target,
            top,
            height,
            y,
        } => {
            let decision = editor.drop_at(&dragged, &target, DropBounds::new(top, height), y);
            accept_drop(decision)?
        }
    };

    let mut text = outline(editor.forest());
    if let Some(message) = message {
        text = format!("{}\n{}", message, text);
    }
    Ok(Output {
        text,
        changed: !before.ptr_eq(editor.forest()),
    })
}

fn require(editor: &TreeEditor, id: &str) -> Result<(), CliError> {
    if editor.forest().contains(id) {
        Ok(())
    } else {
        Err(CliError::NodeNotFound(id.to_string()))
    }
}

fn accept_drop(decision: DropDecision) -> Result<Option<String>, CliError> {
    match decision {
        DropDecision::Moved {
            dragged_id,
            target_id,
            position,
        } => Ok(Some(format!("moved {} {} {}", dragged_id, position, target_id))),
        DropDecision::Rejected(reason) => Err(CliError::DropRejected(reason.to_string())),
    }
}

fn init(path: &Path, force: bool) -> Result<String, CliError> {
    if path.exists() && !force {
        return Err(CliError::AlreadyExists(path.to_path_buf()));
    }
    let forest = sample_forest();
    save_forest(path, &forest)?;
    log::info!("Wrote sample tree to {}", path.display());
    Ok(outline(&forest))
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CliError {
    let path = path.to_path_buf();
    move |source| CliError::Io { path, source }
}

pub fn load_forest(path: &Path) -> Result<Forest, CliError> {
    let json = fs::read_to_string(path).map_err(io_error(path))?;
    let forest = Forest::from_json(&json)?;

    let duplicates = forest.duplicate_ids();
    if !duplicates.is_empty() {
        return Err(CliError::DuplicateIds(duplicates));
    }
    Ok(forest)
}

pub fn save_forest(path: &Path, forest: &Forest) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    let json = forest.to_json_pretty()?;
    fs::write(path, json).map_err(io_error(path))
}

/// Four levels of nodes, the first three expanded.
pub fn sample_forest() -> Forest {
    let expanded = |id: &str, name: &str, children: Vec<TreeNode>| {
        TreeNode::branch(id, name, children).expanded(true)
    };
    let leaf = |id: &str, name: &str| TreeNode::new(id, name).with_has_children(false);

    Forest::new(vec![expanded(
        "root-1",
        "Level A",
        vec![
            expanded(
                "root-1-child-1",
                "Level B",
                vec![
                    expanded(
                        "root-1-child-1-child-1",
                        "Level C",
                        vec![leaf("root-1-child-1-child-1-child-1", "Level D")],
                    ),
                    leaf("root-1-child-1-child-2", "Level C"),
                    leaf("root-1-child-1-child-3", "Level C"),
                ],
            ),
            leaf("root-1-child-2", "Level B"),
        ],
    )])
}
