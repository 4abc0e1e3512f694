//! Query semantics: filter conjunction, kind tags, traversal completeness,
//! stable sort and distinct

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use common::*;
use declquery::{
    AnyDeclaration, ClassDeclaration, DeclQueryError, Declaration, DeclarationKind, DeclarationNode,
    MethodDeclaration, NodeRef, ParsedTree, Pipeline, PipelineOp, Query, QuerySession, SessionConfig,
    TreeStore,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn class_store(names: &[String]) -> Arc<TreeStore> {
    let roots: Vec<NodeRef> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            DeclarationNode::new(DeclarationKind::Class, format!("class {} {{ /* {} */ }}", name, i))
                .with_name(name.as_str())
                .into_ref()
        })
        .collect();
    Arc::new(TreeStore::from_trees(vec![ParsedTree::new(roots, "gen.cs", "csharp")]))
}

fn open(corpus: &Corpus) -> QuerySession {
    QuerySession::open(corpus.path(), &SessionConfig::default()).expect("open session")
}

proptest! {
    #[test]
    fn prop_filters_are_conjunctive(
        names in prop::collection::vec("[A-C][a-c]{0,4}", 0..24),
        prefix in "[A-C]",
        min_len in 1usize..5,
    ) {
        let store = class_store(&names);
        let p1 = prefix.clone();

        let both = Query::<ClassDeclaration>::new(Arc::clone(&store))
            .filter(move |c| c.name().starts_with(p1.as_str()))
            .filter(move |c| c.name().len() >= min_len)
            .to_vec()
            .unwrap();
        let expected: Vec<String> = names
            .iter()
            .filter(|n| n.starts_with(prefix.as_str()) && n.len() >= min_len)
            .cloned()
            .collect();
        prop_assert_eq!(common::names(&both), expected);

        // Dropping a filter never shrinks the result
        let p2 = prefix.clone();
        let one = Query::<ClassDeclaration>::new(store)
            .filter(move |c| c.name().starts_with(p2.as_str()))
            .to_vec()
            .unwrap();
        prop_assert!(one.len() >= both.len());
    }

    #[test]
    fn prop_distinct_is_idempotent(names in prop::collection::vec("[A-C]", 0..16)) {
        let roots: Vec<NodeRef> = names
            .iter()
            .map(|n| {
                DeclarationNode::new(DeclarationKind::Class, format!("class {} {{}}", n))
                    .with_name(n.as_str())
                    .into_ref()
            })
            .collect();
        let store = Arc::new(TreeStore::from_trees(vec![ParsedTree::new(roots, "gen.cs", "csharp")]));

        let once = Query::<ClassDeclaration>::new(Arc::clone(&store)).distinct().to_vec().unwrap();
        let twice = Query::<ClassDeclaration>::new(store).distinct().distinct().to_vec().unwrap();
        prop_assert_eq!(common::names(&once), common::names(&twice));

        // First occurrences, in original order
        let mut expected: Vec<String> = Vec::new();
        for n in &names {
            if !expected.contains(n) {
                expected.push(n.clone());
            }
        }
        prop_assert_eq!(common::names(&once), expected);
    }
}

#[test]
fn test_kind_tag_short_circuits_body() {
    let corpus = fixture_nested_corpus();
    let session = open(&corpus);

    let classes = session
        .query::<ClassDeclaration>()
        .filter(|c| {
            assert_eq!(c.kind(), &DeclarationKind::Class, "body ran on {}", c.describe());
            true
        })
        .to_vec()
        .unwrap();
    assert_names(&classes, &["A", "B"]);

    // Applied directly to every node of the forest
    let predicate = declquery::features::query_engine::FilterPredicate::new::<MethodDeclaration, _>(|m| {
        assert_eq!(m.kind(), &DeclarationKind::Method);
        true
    });
    let all = session.query::<AnyDeclaration>().execute().unwrap();
    let matched: Vec<&str> = all.iter().filter(|n| predicate.evaluate(n)).map(|n| n.name()).collect();
    assert_eq!(matched, vec!["M1", "M2"]);
}

#[test]
fn test_methods_found_under_failing_parents() {
    let corpus = fixture_nested_corpus();
    let session = open(&corpus);

    let methods = session.query::<MethodDeclaration>().to_vec().unwrap();
    assert_names(&methods, &["M1", "M2"]);

    // Namespace and classes fail the filter; their methods are still visited
    let only_methods = session
        .query::<AnyDeclaration>()
        .filter(|d| d.kind() == &DeclarationKind::Method)
        .to_vec()
        .unwrap();
    assert_names(&only_methods, &["M1", "M2"]);

    let everything = session.query::<AnyDeclaration>().to_vec().unwrap();
    assert_names(&everything, &["App", "A", "M1", "B", "M2"]);
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let corpus = Corpus::new()
        .file("1.cs", "class Same { void First() { } }\n")
        .file("2.cs", "class Other { }\n")
        .file("3.cs", "class Same { void Second() { } }\n")
        .file("4.cs", "class Same { void Third() { } }\n");
    let session = open(&corpus);

    let sorted = session
        .query::<ClassDeclaration>()
        .sort_by(|c| c.name().to_string())
        .to_vec()
        .unwrap();

    let firsts: Vec<String> = sorted
        .iter()
        .map(|c| c.methods().first().map(|m| m.name().to_string()).unwrap_or_default())
        .collect();
    assert_eq!(firsts, vec!["", "First", "Second", "Third"]);
}

#[test]
fn test_distinct_never_reorders() {
    let corpus = Corpus::new()
        .file("a.cs", "class B { }\nclass A { }\n")
        .file("b.cs", "class B { }\nclass C { }\n");
    let session = open(&corpus);

    let once = session.query::<ClassDeclaration>().distinct().to_vec().unwrap();
    assert_names(&once, &["B", "A", "C"]);

    let twice = session.query::<ClassDeclaration>().distinct().distinct().to_vec().unwrap();
    assert_names(&twice, &["B", "A", "C"]);
}

#[test]
fn test_mistagged_filter_is_rejected() {
    let mut pipeline = Pipeline::of::<ClassDeclaration>();
    let err = pipeline
        .push(PipelineOp::filter::<MethodDeclaration, _>(|_| true))
        .unwrap_err();
    assert!(matches!(err, DeclQueryError::TypeMismatch { .. }));
    assert!(pipeline.is_empty());
}

#[test]
fn test_projection_then_sort_on_projected_kind() {
    let corpus = Corpus::new().file(
        "Svc.cs",
        fixture_class_with_methods("Zed", &["Run"]).to_string()
            + &fixture_class_with_methods("Abe", &["Alpha", "Beta"]),
    );
    let session = open(&corpus);

    let methods = session
        .query::<ClassDeclaration>()
        .project::<MethodDeclaration, _, _>(|c| {
            c.methods()
                .into_iter()
                .last()
                .map_or_else(|| c.node().clone(), NodeRef::from)
        })
        .sort_by(|m| m.name().to_string())
        .to_vec()
        .unwrap();
    assert_names(&methods, &["Beta", "Run"]);
}
