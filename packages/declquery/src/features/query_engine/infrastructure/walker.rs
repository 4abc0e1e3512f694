//! Tree walker
//!
//! One depth-first pre-order pass over every tree. Descendants of a node
//! that failed a filter are still visited.

use std::sync::Arc;

use super::materializer::finalize;
use crate::errors::Result;
use crate::features::parsing::domain::{KindRegistry, NodeRef, ParsedTree};
use crate::features::query_engine::translator::TranslatedQuery;

/// Execution phase; entered once each, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkPhase {
    Idle,
    Traversing,
    Finalizing,
}

pub struct TreeWalker<'q> {
    query: &'q TranslatedQuery,
    registry: &'q KindRegistry,
    phase: WalkPhase,
    visited: usize,
}

impl<'q> TreeWalker<'q> {
    pub fn new(query: &'q TranslatedQuery, registry: &'q KindRegistry) -> Self {
        Self {
            query,
            registry,
            phase: WalkPhase::Idle,
            visited: 0,
        }
    }

    pub fn phase(&self) -> WalkPhase {
        self.phase
    }

    /// Traverse then finalize. Consumes the walker.
    pub fn run(mut self, trees: &[ParsedTree]) -> Result<Vec<NodeRef>> {
        self.enter(WalkPhase::Traversing);
        let survivors = self.traverse(trees);

        self.enter(WalkPhase::Finalizing);
        tracing::trace!(
            visited = self.visited,
            survivors = survivors.len(),
            "Traversal complete"
        );
        finalize(survivors, self.query, self.registry)
    }

    fn enter(&mut self, phase: WalkPhase) {
        tracing::trace!("Walk phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Candidates passing every traversal filter, in visitation order across trees
    pub(crate) fn traverse(&mut self, trees: &[ParsedTree]) -> Vec<NodeRef> {
        let mut survivors = Vec::new();
        let mut stack: Vec<&NodeRef> = Vec::new();

        for tree in trees {
            stack.extend(tree.roots.iter().rev());

            while let Some(node) = stack.pop() {
                self.visited += 1;
                if self.is_survivor(node) {
                    survivors.push(Arc::clone(node));
                }
                stack.extend(node.children().iter().rev());
            }
        }

        survivors
    }

    fn is_survivor(&self, node: &NodeRef) -> bool {
        self.query.source.accepts(node.kind())
            && self
                .query
                .traversal_filters
                .iter()
                .all(|predicate| predicate.evaluate(node))
    }
}
