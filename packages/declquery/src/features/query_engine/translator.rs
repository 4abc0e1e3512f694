//! Query translator
//!
//! Flattens a pipeline into the artifacts the walker consumes. Never touches
//! the store and never runs an operation body.

use crate::errors::Result;
use crate::features::query_engine::domain::{
    ElementKind, FilterPredicate, Pipeline, PipelineOp, ProjectionFn, SortSpec,
};

/// A projection and the filters declared right after it
#[derive(Debug, Clone)]
pub struct ProjectionStep {
    pub projection: ProjectionFn,
    pub filters: Vec<FilterPredicate>,
}

/// Sort spec plus the stage whose node it keys on
///
/// Stage 0 is the traversal node; stage k is the node after k projections.
#[derive(Debug, Clone)]
pub struct StagedSort {
    pub stage: usize,
    pub spec: SortSpec,
}

/// Translation output
#[derive(Debug, Clone)]
pub struct TranslatedQuery {
    /// Candidate set during traversal
    pub source: ElementKind,
    pub traversal_filters: Vec<FilterPredicate>,
    pub projections: Vec<ProjectionStep>,
    pub sort: Option<StagedSort>,
    pub distinct: bool,
    /// Element kind of the final results
    pub element: ElementKind,
}

impl TranslatedQuery {
    /// Match everything of the source kind, identity, visitation order, no distinct
    pub fn is_degenerate(&self) -> bool {
        self.traversal_filters.is_empty()
            && self.projections.is_empty()
            && self.sort.is_none()
            && !self.distinct
    }
}

pub struct Translator;

impl Translator {
    /// Translate a pipeline; a mis-tagged operation is a `TypeMismatch`
    pub fn translate(pipeline: &Pipeline) -> Result<TranslatedQuery> {
        let mut query = TranslatedQuery {
            source: pipeline.source(),
            traversal_filters: Vec::new(),
            projections: Vec::new(),
            sort: None,
            distinct: false,
            element: pipeline.source(),
        };

        for op in pipeline.ops() {
            op.check(query.element)?;

            match op {
                PipelineOp::Filter(predicate) => match query.projections.last_mut() {
                    Some(step) => step.filters.push(predicate.clone()),
                    None => query.traversal_filters.push(predicate.clone()),
                },
                PipelineOp::Project(projection) => {
                    query.element = projection.target();
                    query.projections.push(ProjectionStep {
                        projection: projection.clone(),
                        filters: Vec::new(),
                    });
                }
                // Last write wins
                PipelineOp::SortBy(spec) => {
                    query.sort = Some(StagedSort {
                        stage: query.projections.len(),
                        spec: spec.clone(),
                    });
                }
                PipelineOp::Distinct => query.distinct = true,
            }
        }

        tracing::trace!(
            source = %query.source,
            element = %query.element,
            filters = query.traversal_filters.len(),
            projections = query.projections.len(),
            sorted = query.sort.is_some(),
            distinct = query.distinct,
            "Translated pipeline"
        );

        Ok(query)
    }
}
