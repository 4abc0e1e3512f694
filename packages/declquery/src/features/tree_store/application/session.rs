//! Query session
//!
//! Owns the tree store for the duration of a set of queries and releases it
//! on every exit path, including `?` returns and unwinding.

use std::path::Path;
use std::sync::Arc;

use crate::config::SessionConfig;
use crate::errors::Result;
use crate::features::query_engine::{Declaration, Query};
use crate::features::tree_store::domain::TreeStore;
use crate::features::tree_store::ports::DiagnosticSink;

/// Scoped owner of a loaded tree store
///
/// Queries handed out by a session share its store; once the session is
/// dropped (or released) they fail with `UseAfterRelease`.
#[derive(Debug)]
pub struct QuerySession {
    store: Arc<TreeStore>,
}

impl QuerySession {
    /// Load `root` with the C# parser; skipped files are logged
    pub fn open(root: impl AsRef<Path>, config: &SessionConfig) -> Result<Self> {
        Ok(Self::from_store(TreeStore::load(root, config)?))
    }

    pub fn open_with_sink(
        root: impl AsRef<Path>,
        config: &SessionConfig,
        sink: &dyn DiagnosticSink,
    ) -> Result<Self> {
        Ok(Self::from_store(TreeStore::load_with_sink(root, config, sink)?))
    }

    pub fn from_store(store: TreeStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Start a pipeline over every declaration assignable to `T`
    pub fn query<T: Declaration>(&self) -> Query<T> {
        Query::new(Arc::clone(&self.store))
    }

    pub fn store(&self) -> &Arc<TreeStore> {
        &self.store
    }

    /// Release early; dropping the session afterwards is a no-op
    pub fn release(&self) {
        self.store.release();
    }
}

impl Drop for QuerySession {
    fn drop(&mut self) {
        self.store.release();
    }
}
