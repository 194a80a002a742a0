//! Lazy loading of children
//!
//! A node whose children are unknown is loaded through a [`ChildFetcher`] the
//! first time it is expanded. Each fetch runs as its own task, keyed by node id
//! and cancellable through the [`LazyLoader`].

mod fetcher;
mod loader;
mod mock;

pub use fetcher::*;
pub use loader::*;
pub use mock::*;
