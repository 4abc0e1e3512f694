//! Query engine infrastructure

mod materializer;
mod walker;

pub use materializer::{distinct, finalize, Materialize};
pub use walker::{TreeWalker, WalkPhase};
