//! Parsed-tree store
//!
//! Read-only after construction. Queries take a snapshot of the tree
//! collection under a short read lock and traverse it without locking.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::errors::{DeclQueryError, Result};
use crate::features::parsing::domain::{KindRegistry, ParsedTree};

/// Counters collected while loading a corpus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub files_discovered: usize,
    pub files_parsed: usize,
    pub files_skipped: usize,
    /// Parsed files whose tree carries recovered syntax errors
    pub files_with_syntax_errors: usize,
    pub declarations: usize,
}

impl LoadStats {
    fn from_trees(trees: &[ParsedTree]) -> Self {
        Self {
            files_discovered: trees.len(),
            files_parsed: trees.len(),
            files_skipped: 0,
            files_with_syntax_errors: trees.iter().filter(|t| t.has_errors()).count(),
            declarations: trees.iter().map(ParsedTree::declaration_count).sum(),
        }
    }
}

/// Ordered collection of parsed trees
pub struct TreeStore {
    root: PathBuf,
    trees: RwLock<Option<Arc<[ParsedTree]>>>,
    registry: Arc<KindRegistry>,
    stats: LoadStats,
}

impl TreeStore {
    pub fn new(
        root: impl Into<PathBuf>,
        trees: Vec<ParsedTree>,
        registry: Arc<KindRegistry>,
        stats: LoadStats,
    ) -> Self {
        Self {
            root: root.into(),
            trees: RwLock::new(Some(Arc::from(trees))),
            registry,
            stats,
        }
    }

    /// In-memory store over already parsed trees (built-in kinds only)
    pub fn from_trees(trees: Vec<ParsedTree>) -> Self {
        Self::from_trees_with_registry(trees, Arc::new(KindRegistry::default()))
    }

    pub fn from_trees_with_registry(trees: Vec<ParsedTree>, registry: Arc<KindRegistry>) -> Self {
        let stats = LoadStats::from_trees(&trees);
        Self::new(PathBuf::new(), trees, registry, stats)
    }

    /// Trees in discovery order
    ///
    /// Fails with `UseAfterRelease` once the store has been released.
    pub fn snapshot(&self) -> Result<Arc<[ParsedTree]>> {
        self.trees
            .read()
            .as_ref()
            .cloned()
            .ok_or(DeclQueryError::UseAfterRelease)
    }

    /// Discard the retained trees. Idempotent; returns whether this call released.
    pub fn release(&self) -> bool {
        let released = self.trees.write().take().is_some();
        if released {
            tracing::debug!("Released tree store for {}", self.root.display());
        }
        released
    }

    pub fn is_released(&self) -> bool {
        self.trees.read().is_none()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.snapshot()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registry(&self) -> &Arc<KindRegistry> {
        &self.registry
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }
}

impl std::fmt::Debug for TreeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeStore")
            .field("root", &self.root)
            .field("released", &self.is_released())
            .field("stats", &self.stats)
            .finish()
    }
}
