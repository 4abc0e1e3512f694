//! Feature modules
//!
//! - `parsing`     : C# source -> declaration trees (L1)
//! - `tree_store`  : corpus discovery, load-once store, session scope
//! - `query_engine`: pipeline builder, translator, walker, materializer

pub mod parsing;
pub mod query_engine;
pub mod tree_store;
