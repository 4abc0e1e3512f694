//! Parsed-Tree Store Feature
//!
//! Loads the source corpus once and keeps the parsed trees for queries.
//!
//! ## Structure
//! - `domain/` - TreeStore (scoped, releasable), LoadStats
//! - `ports/` - DiagnosticSink
//! - `application/` - LoadStoreUseCase (discover + parse), QuerySession
//! - `infrastructure/` - walkdir discovery, diagnostic sinks

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{LoadStoreUseCase, QuerySession};
pub use domain::{LoadStats, TreeStore};
pub use infrastructure::{discover_sources, CollectingSink, TracingSink};
pub use ports::{Diagnostic, DiagnosticSink, DiagnosticStage};
