//! Tree data model

mod forest;
mod node;

pub use forest::*;
pub use node::*;
