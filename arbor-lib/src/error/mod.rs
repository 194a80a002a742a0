//! Error types
//!
//! Store operations never fail; these cover the lazy-load collaborator and
//! the input validation done by the editor session.

mod editor;
mod fetch;

pub use editor::*;
pub use fetch::*;
