//! Execute query use case

use crate::errors::Result;
use crate::features::parsing::domain::NodeRef;
use crate::features::query_engine::domain::Pipeline;
use crate::features::query_engine::infrastructure::TreeWalker;
use crate::features::query_engine::translator::Translator;
use crate::features::tree_store::TreeStore;

/// Runs one pipeline against a store
///
/// Each call re-runs translation and the full traversal; nothing is cached.
pub struct ExecuteQueryUseCase<'s> {
    store: &'s TreeStore,
}

impl<'s> ExecuteQueryUseCase<'s> {
    pub fn new(store: &'s TreeStore) -> Self {
        Self { store }
    }

    pub fn execute(&self, pipeline: &Pipeline) -> Result<Vec<NodeRef>> {
        let trees = self.store.snapshot()?;
        let query = Translator::translate(pipeline)?;

        let results = TreeWalker::new(&query, self.store.registry()).run(&trees)?;
        tracing::debug!(
            "Query over {} -> {}: {} results from {} trees",
            query.source,
            query.element,
            results.len(),
            trees.len()
        );
        Ok(results)
    }
}
