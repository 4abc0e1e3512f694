//! Tree store lifecycle: configuration errors, skipped files, release

#[path = "../common/mod.rs"]
mod common;

use std::path::PathBuf;

use common::*;
use declquery::{
    ClassDeclaration, CollectingSink, DeclQueryError, DiagnosticStage, MethodDeclaration, Preset,
    QuerySession, SessionConfig, TreeStore,
};

#[test]
fn test_empty_and_missing_roots_are_configuration_errors() {
    let corpus = Corpus::new().file("Only.cs", fixture_class("Only"));

    let roots = [
        PathBuf::new(),
        corpus.path().join("does-not-exist"),
        corpus.path().join("Only.cs"),
    ];
    for root in roots {
        let err = QuerySession::open(&root, &SessionConfig::default()).unwrap_err();
        assert!(
            matches!(err, DeclQueryError::Configuration(_)),
            "{}: {}",
            root.display(),
            err
        );
    }
}

#[test]
fn test_parse_failure_is_skipped_and_reported() {
    let corpus = Corpus::new()
        .file("Good.cs", fixture_class("Good"))
        .file("Latin1.cs", [0x63u8, 0x6c, 0x61, 0x73, 0x73, 0x20, 0xe9, 0x20, 0x7b, 0x7d])
        .file("Later.cs", fixture_class("Later"));

    let sink = CollectingSink::new();
    let session = QuerySession::open_with_sink(corpus.path(), &SessionConfig::default(), &sink).unwrap();

    let classes = session.query::<ClassDeclaration>().to_vec().unwrap();
    assert_names(&classes, &["Good", "Later"]);

    let diagnostics = sink.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].path.ends_with("Latin1.cs"));

    let stats = session.store().stats();
    assert_eq!(stats.files_discovered, 3);
    assert_eq!(stats.files_parsed, 2);
    assert_eq!(stats.files_skipped, 1);
}

#[test]
fn test_oversize_file_is_skipped() {
    let corpus = Corpus::new()
        .file("Small.cs", fixture_class("Small"))
        .file("Big.cs", fixture_class_with_methods("Big", &["A", "B", "C", "D"]));

    let mut config = SessionConfig::default();
    config.discovery.max_file_bytes = 32;

    let sink = CollectingSink::new();
    let store = TreeStore::load_with_sink(corpus.path(), &config, &sink).unwrap();
    assert_eq!(store.len().unwrap(), 1);
    assert!(sink.diagnostics()[0].message.contains("limit"));
}

#[test]
fn test_deeply_nested_expression_loads() {
    let terms = vec!["1"; 10_000].join(" + ");
    let corpus = Corpus::new()
        .file("Deep.cs", format!("class Deep {{ int M() {{ return {}; }} }}\n", terms))
        .file("Other.cs", fixture_class_with_methods("Other", &["Run"]));

    let sink = CollectingSink::new();
    let session = QuerySession::open_with_sink(corpus.path(), &SessionConfig::default(), &sink).unwrap();
    assert!(sink.is_empty());

    let methods = session.query::<MethodDeclaration>().to_vec().unwrap();
    assert_names(&methods, &["M", "Run"]);
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_reported_and_skipped() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let corpus = Corpus::new()
        .file("Before.cs", fixture_class("Before"))
        .file("locked/Hidden.cs", fixture_class("Hidden"))
        .file("zafter/After.cs", fixture_class("After"));
    let locked = corpus.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not bind a privileged user
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let sink = CollectingSink::new();
    let result = QuerySession::open_with_sink(corpus.path(), &SessionConfig::default(), &sink);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let session = result.unwrap();

    let diagnostics = sink.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].stage, DiagnosticStage::Discovery);
    assert_eq!(diagnostics[0].path, locked);

    let classes = session.query::<ClassDeclaration>().to_vec().unwrap();
    assert_names(&classes, &["Before", "After"]);
}

#[test]
fn test_excluded_directories_are_not_loaded() {
    let corpus = Corpus::new()
        .file("src/Kept.cs", fixture_class("Kept"))
        .file("obj/Debug/Generated.cs", fixture_class("Generated"))
        .file("gen/Skipped.cs", fixture_class("Skipped"));

    let config = SessionConfig::preset(Preset::Lenient)
        .exclude_dir("gen")
        .build()
        .unwrap();
    let session = QuerySession::open(corpus.path(), &config).unwrap();

    let classes = session.query::<ClassDeclaration>().to_vec().unwrap();
    assert_names(&classes, &["Kept"]);
}

#[test]
fn test_release_invalidates_and_is_idempotent() {
    let corpus = fixture_foo_corpus();
    let session = QuerySession::open(corpus.path(), &SessionConfig::default()).unwrap();
    let query = session.query::<ClassDeclaration>();
    assert_eq!(query.count().unwrap(), 3);

    session.release();
    session.release();

    assert!(matches!(query.to_vec(), Err(DeclQueryError::UseAfterRelease)));
    assert!(matches!(
        session.query::<ClassDeclaration>().first(),
        Err(DeclQueryError::UseAfterRelease)
    ));
}

#[test]
fn test_concurrent_queries_share_store() {
    let corpus = fixture_foo_corpus();
    let session = QuerySession::open(corpus.path(), &SessionConfig::default()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let query = session.query::<ClassDeclaration>().filter(|c| c.name().starts_with("Foo"));
                scope.spawn(move || query.count().unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
    });
}

#[test]
fn test_strict_preset_from_yaml() {
    let corpus = Corpus::new()
        .file("Ok.cs", fixture_class("Ok"))
        .file("Broken.cs", "class Broken { void M( }");

    let config = SessionConfig::from_yaml_str("version: 1\npreset: strict\n").unwrap();
    let sink = CollectingSink::new();
    let session = QuerySession::open_with_sink(corpus.path(), &config, &sink).unwrap();

    let classes = session.query::<ClassDeclaration>().to_vec().unwrap();
    assert_names(&classes, &["Ok"]);
    assert_eq!(sink.len(), 1);
}
