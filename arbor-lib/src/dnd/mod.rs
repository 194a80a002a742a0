//! Drag-and-drop resolution
//!
//! The gesture library that produces drags is an external collaborator. It
//! reports the pointer position over a target's bounds; [`resolve_drop_zone`]
//! turns that into a [`DropPosition`], and a [`DropHandler`] validates and
//! applies the resulting move.

mod resolver;
mod zone;

pub use resolver::*;
pub use zone::*;
