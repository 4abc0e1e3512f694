//! Pipeline operation descriptors
//!
//! A pipeline is plain data: an ordered list of operations, each tagged with
//! the element kind it was declared for. Bodies are stored type-erased and
//! only run when the walker applies them to a concrete node.

use std::fmt;
use std::sync::Arc;

use super::element::{Declaration, ElementKind};
use super::sort_key::SortKey;
use crate::errors::{DeclQueryError, Result};
use crate::features::parsing::domain::{KindRegistry, NodeRef};

type PredicateBody = dyn Fn(&NodeRef) -> bool + Send + Sync;
type ProjectionBody = dyn Fn(&NodeRef) -> Option<NodeRef> + Send + Sync;
type KeyBody = dyn Fn(&NodeRef) -> Option<SortKey> + Send + Sync;

/// Filter predicate tagged with the element kind it expects
#[derive(Clone)]
pub struct FilterPredicate {
    element: ElementKind,
    body: Arc<PredicateBody>,
}

impl FilterPredicate {
    pub fn new<T, F>(predicate: F) -> Self
    where
        T: Declaration,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            element: T::ELEMENT,
            body: Arc::new(move |node: &NodeRef| T::cast(node).map_or(false, |view| predicate(&view))),
        }
    }

    pub fn element(&self) -> ElementKind {
        self.element
    }

    /// A node of another kind is a non-match; the body is not invoked
    pub fn evaluate(&self, node: &NodeRef) -> bool {
        self.element.accepts(node.kind()) && (self.body)(node)
    }
}

impl fmt::Debug for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterPredicate")
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}

/// Typed projection `T -> U`
#[derive(Clone)]
pub struct ProjectionFn {
    source: ElementKind,
    target: ElementKind,
    body: Arc<ProjectionBody>,
}

impl ProjectionFn {
    pub fn new<T, U, R, F>(transform: F) -> Self
    where
        T: Declaration,
        U: Declaration,
        R: Into<NodeRef>,
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        Self {
            source: T::ELEMENT,
            target: U::ELEMENT,
            body: Arc::new(move |node: &NodeRef| {
                T::cast(node).map(|view| -> NodeRef { transform(&view).into() })
            }),
        }
    }

    pub fn source(&self) -> ElementKind {
        self.source
    }

    pub fn target(&self) -> ElementKind {
        self.target
    }

    /// Apply to one node
    ///
    /// The result must be a registered declaration kind accepted by the target.
    pub fn apply(&self, node: &NodeRef, registry: &KindRegistry) -> Result<NodeRef> {
        let projected = (self.body)(node).ok_or_else(|| {
            DeclQueryError::projection(
                node.describe(),
                format!("projection expects a {} node", self.source),
            )
        })?;

        if !registry.recognizes(projected.kind()) {
            return Err(DeclQueryError::projection(
                node.describe(),
                format!("result kind '{}' is not a recognized declaration kind", projected.kind()),
            ));
        }
        if !self.target.accepts(projected.kind()) {
            return Err(DeclQueryError::projection(
                node.describe(),
                format!("result {} is not assignable to {}", projected.describe(), self.target),
            ));
        }

        Ok(projected)
    }
}

impl fmt::Debug for ProjectionFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectionFn")
            .field("source", &self.source)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Single-level sort key extractor with direction
#[derive(Clone)]
pub struct SortSpec {
    element: ElementKind,
    direction: SortDirection,
    key: Arc<KeyBody>,
}

impl SortSpec {
    pub fn new<T, K, F>(key: F, direction: SortDirection) -> Self
    where
        T: Declaration,
        K: Into<SortKey>,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self {
            element: T::ELEMENT,
            direction,
            key: Arc::new(move |node: &NodeRef| {
                T::cast(node).map(|view| -> SortKey { key(&view).into() })
            }),
        }
    }

    pub fn element(&self) -> ElementKind {
        self.element
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn key_for(&self, node: &NodeRef) -> Result<SortKey> {
        (self.key)(node).ok_or_else(|| {
            DeclQueryError::sort_key(
                node.describe(),
                format!("sort key expects a {} node", self.element),
            )
        })
    }
}

impl fmt::Debug for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortSpec")
            .field("element", &self.element)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

/// One declarative pipeline operation
#[derive(Debug, Clone)]
pub enum PipelineOp {
    Filter(FilterPredicate),
    Project(ProjectionFn),
    SortBy(SortSpec),
    Distinct,
}

impl PipelineOp {
    pub fn filter<T, F>(predicate: F) -> Self
    where
        T: Declaration,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        PipelineOp::Filter(FilterPredicate::new(predicate))
    }

    pub fn project<T, U, R, F>(transform: F) -> Self
    where
        T: Declaration,
        U: Declaration,
        R: Into<NodeRef>,
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        PipelineOp::Project(ProjectionFn::new::<T, U, R, F>(transform))
    }

    pub fn sort_by<T, K, F>(key: F, direction: SortDirection) -> Self
    where
        T: Declaration,
        K: Into<SortKey>,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        PipelineOp::SortBy(SortSpec::new(key, direction))
    }

    /// Element kind this operation was declared for (`None` for distinct)
    pub fn declared_element(&self) -> Option<ElementKind> {
        match self {
            PipelineOp::Filter(p) => Some(p.element()),
            PipelineOp::Project(p) => Some(p.source()),
            PipelineOp::SortBy(s) => Some(s.element()),
            PipelineOp::Distinct => None,
        }
    }

    /// Check against the pipeline's current element kind
    pub fn check(&self, current: ElementKind) -> Result<()> {
        match self.declared_element() {
            Some(declared) if declared != current => Err(DeclQueryError::type_mismatch(current, declared)),
            _ => Ok(()),
        }
    }
}

/// Ordered operation list scoped to a source element kind
#[derive(Debug, Clone)]
pub struct Pipeline {
    source: ElementKind,
    element: ElementKind,
    ops: Vec<PipelineOp>,
}

impl Pipeline {
    pub fn new(source: ElementKind) -> Self {
        Self {
            source,
            element: source,
            ops: Vec::new(),
        }
    }

    pub fn of<T: Declaration>() -> Self {
        Self::new(T::ELEMENT)
    }

    /// Descriptor list from any origin; validated when translated
    pub fn from_ops(source: ElementKind, ops: Vec<PipelineOp>) -> Self {
        let element = ops
            .iter()
            .filter_map(|op| match op {
                PipelineOp::Project(p) => Some(p.target()),
                _ => None,
            })
            .last()
            .unwrap_or(source);
        Self { source, element, ops }
    }

    /// Append an operation declared for the current element kind
    pub fn push(&mut self, op: PipelineOp) -> Result<()> {
        op.check(self.element)?;
        self.append(op);
        Ok(())
    }

    /// Append without checking. Callers guarantee the kind matches.
    pub(crate) fn append(&mut self, op: PipelineOp) {
        if let PipelineOp::Project(p) = &op {
            self.element = p.target();
        }
        self.ops.push(op);
    }

    pub fn source(&self) -> ElementKind {
        self.source
    }

    /// Element kind after every projection so far
    pub fn element(&self) -> ElementKind {
        self.element
    }

    pub fn ops(&self) -> &[PipelineOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
