// Query<T> - Typed pipeline builder bound to a tree store
//
// Provides fluent API for declaration queries:
// - Filtering: .filter()
// - Projection: .project::<U>()
// - Ordering: .sort_by(), .sort_by_descending()
// - De-duplication: .distinct()
// - Materialization: .collect::<Vec<T>>(), .collect::<Option<T>>(), .collect::<T>()

use std::marker::PhantomData;
use std::sync::Arc;

use super::application::ExecuteQueryUseCase;
use super::domain::{Declaration, Pipeline, PipelineOp, ProjectionFn, SortDirection, SortKey, SortSpec};
use super::infrastructure::Materialize;
use crate::errors::Result;
use crate::features::parsing::domain::NodeRef;
use crate::features::tree_store::TreeStore;

/// Declarative query over the declarations of a store
///
/// `T` is the current element kind; `project` moves it. Building never runs
/// anything. Every execution re-walks the whole store.
///
/// Example:
/// ```rust,ignore
/// let services = session
///     .query::<ClassDeclaration>()
///     .filter(|c| c.name().ends_with("Service"))
///     .sort_by(|c| c.name().to_string())
///     .distinct()
///     .collect::<Vec<_>>()?;
/// ```
pub struct Query<T: Declaration> {
    store: Arc<TreeStore>,
    pipeline: Pipeline,
    _element: PhantomData<fn() -> T>,
}

impl<T: Declaration> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            pipeline: self.pipeline.clone(),
            _element: PhantomData,
        }
    }
}

impl<T: Declaration> std::fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("element", &T::ELEMENT)
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

impl<T: Declaration> Query<T> {
    pub fn new(store: Arc<TreeStore>) -> Self {
        Self {
            store,
            pipeline: Pipeline::of::<T>(),
            _element: PhantomData,
        }
    }

    // Typed steps always carry the current element kind
    fn then(mut self, op: PipelineOp) -> Self {
        self.pipeline.append(op);
        self
    }

    /// Keep declarations for which `predicate` holds (conjunctive with earlier filters)
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.then(PipelineOp::filter::<T, F>(predicate))
    }

    /// Transform every result into a `U`; later steps operate on `U`
    pub fn project<U, R, F>(mut self, transform: F) -> Query<U>
    where
        U: Declaration,
        R: Into<NodeRef>,
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        self.pipeline
            .append(PipelineOp::Project(ProjectionFn::new::<T, U, R, F>(transform)));
        Query {
            store: self.store,
            pipeline: self.pipeline,
            _element: PhantomData,
        }
    }

    /// Sort ascending by `key`, replacing any earlier sort
    pub fn sort_by<K, F>(self, key: F) -> Self
    where
        K: Into<SortKey>,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.then(PipelineOp::SortBy(SortSpec::new::<T, K, F>(key, SortDirection::Ascending)))
    }

    pub fn sort_by_descending<K, F>(self, key: F) -> Self
    where
        K: Into<SortKey>,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.then(PipelineOp::SortBy(SortSpec::new::<T, K, F>(key, SortDirection::Descending)))
    }

    /// Collapse results with identical full text, keeping the first
    pub fn distinct(self) -> Self {
        self.then(PipelineOp::Distinct)
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn store(&self) -> &Arc<TreeStore> {
        &self.store
    }

    /// Run and return the final nodes untyped
    pub fn execute(&self) -> Result<Vec<NodeRef>> {
        ExecuteQueryUseCase::new(&self.store).execute(&self.pipeline)
    }

    /// Run and materialize into `S` (`Vec<T>`, `Option<T>` or `T`)
    pub fn collect<S: Materialize<T>>(&self) -> Result<S> {
        S::materialize(self.execute()?)
    }

    /// Run and materialize into a shape of another view, keeping assignable nodes
    pub fn collect_as<V: Declaration, S: Materialize<V>>(&self) -> Result<S> {
        S::materialize(self.execute()?)
    }

    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.collect()
    }

    /// First result, or `None`
    pub fn first(&self) -> Result<Option<T>> {
        self.collect()
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.execute()?.len())
    }
}
