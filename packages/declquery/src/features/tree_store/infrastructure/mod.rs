//! Tree store infrastructure

mod discovery;
mod sinks;

pub use discovery::discover_sources;
pub use sinks::{CollectingSink, TracingSink};
