//! Hierarchical tree editor core
//!
//! An immutable, structurally shared tree store with drag-and-drop resolution
//! and cancellable lazy loading of children. Rendering is left to the caller:
//! [`visible::visible_rows`] yields the rows to draw, and every edit goes
//! through a [`TreeEditor`].

pub mod dnd;
pub mod editor;
pub mod error;
pub mod lazy;
pub mod model;
mod store;
pub mod visible;

mod config;

pub use config::*;
pub use editor::ExpandOutcome;
pub use editor::TreeEditor;
pub use model::Forest;
pub use model::TreeNode;
