//! Tree store domain models

mod tree_store;

pub use tree_store::{LoadStats, TreeStore};
