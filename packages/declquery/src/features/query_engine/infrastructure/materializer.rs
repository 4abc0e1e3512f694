//! Materializer
//!
//! Finishes a traversal: projection steps, staged sort, distinct, and the
//! final conversion into the caller's result shape.

use rustc_hash::FxHashSet;

use crate::errors::{DeclQueryError, Result};
use crate::features::parsing::domain::{KindRegistry, NodeRef};
use crate::features::query_engine::domain::{Declaration, KeyOrdering, SortDirection, SortKey};
use crate::features::query_engine::translator::{ProjectionStep, StagedSort, TranslatedQuery};

/// Stage nodes of one survivor: `trail[k]` is the node after k projections
type Trail = Vec<NodeRef>;

/// Result shape built from the final node list
///
/// `Vec<U>` keeps every node assignable to `U`; `Option<U>` takes the first
/// one; a bare view `U` requires one and fails with `NoMatch` otherwise.
pub trait Materialize<U: Declaration>: Sized {
    fn materialize(nodes: Vec<NodeRef>) -> Result<Self>;
}

impl<U: Declaration> Materialize<U> for Vec<U> {
    fn materialize(nodes: Vec<NodeRef>) -> Result<Self> {
        Ok(nodes.iter().filter_map(U::cast).collect())
    }
}

impl<U: Declaration> Materialize<U> for Option<U> {
    fn materialize(nodes: Vec<NodeRef>) -> Result<Self> {
        Ok(nodes.iter().find_map(U::cast))
    }
}

/// Projection, sort and distinct over traversal survivors
pub fn finalize(
    survivors: Vec<NodeRef>,
    query: &TranslatedQuery,
    registry: &KindRegistry,
) -> Result<Vec<NodeRef>> {
    let mut trails = project(survivors, &query.projections, registry)?;

    if let Some(sort) = &query.sort {
        trails = sort_trails(trails, sort)?;
    }

    let nodes: Vec<NodeRef> = trails.into_iter().filter_map(|mut trail| trail.pop()).collect();

    Ok(if query.distinct { distinct(nodes) } else { nodes })
}

fn project(survivors: Vec<NodeRef>, steps: &[ProjectionStep], registry: &KindRegistry) -> Result<Vec<Trail>> {
    let mut trails = Vec::with_capacity(survivors.len());

    'survivors: for node in survivors {
        let mut trail = Vec::with_capacity(steps.len() + 1);
        let mut current = node;

        for step in steps {
            let projected = step.projection.apply(&current, registry)?;
            if !step.filters.iter().all(|predicate| predicate.evaluate(&projected)) {
                continue 'survivors;
            }
            trail.push(std::mem::replace(&mut current, projected));
        }

        trail.push(current);
        trails.push(trail);
    }

    Ok(trails)
}

/// Stable sort on the node at the sort's stage
fn sort_trails(trails: Vec<Trail>, sort: &StagedSort) -> Result<Vec<Trail>> {
    let keys = trails
        .iter()
        .map(|trail| stage_node(trail, sort.stage).and_then(|node| sort.spec.key_for(node)))
        .collect::<Result<Vec<SortKey>>>()?;

    let mode = SortKey::ordering_for(&keys);
    if mode == KeyOrdering::Numeric {
        if let Some(index) = keys.iter().position(SortKey::is_nan) {
            let node = stage_node(&trails[index], sort.stage)?;
            return Err(DeclQueryError::sort_key(node.describe(), "NaN key is not comparable"));
        }
    }

    let direction = sort.spec.direction();
    let mut keyed: Vec<(SortKey, Trail)> = keys.into_iter().zip(trails).collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = a.compare(b, mode);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    Ok(keyed.into_iter().map(|(_, trail)| trail).collect())
}

fn stage_node(trail: &Trail, stage: usize) -> Result<&NodeRef> {
    trail.get(stage).ok_or_else(|| {
        let node = trail.first().map(|n| n.describe()).unwrap_or_default();
        DeclQueryError::sort_key(
            node,
            format!(
                "sort stage {} is past the last projection ({})",
                stage,
                trail.len().saturating_sub(1)
            ),
        )
    })
}

/// Drop later nodes structurally equal to an earlier one; order is kept
pub fn distinct(nodes: Vec<NodeRef>) -> Vec<NodeRef> {
    let mut seen = FxHashSet::default();
    nodes
        .into_iter()
        .filter(|node| seen.insert(node.structural_key().to_string()))
        .collect()
}
