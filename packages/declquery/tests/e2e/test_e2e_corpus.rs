//! End-to-end: on-disk corpus through session, pipeline and materialization

#[path = "../common/mod.rs"]
mod common;

use common::*;
use declquery::{
    ClassDeclaration, DeclQueryError, Declaration, FileScopedNamespaceDeclaration, MethodDeclaration,
    NamespaceDeclaration, QuerySession, SessionConfig, TypeDeclaration, UsingDirective,
};
use pretty_assertions::assert_eq;

fn open(corpus: &Corpus) -> QuerySession {
    QuerySession::open(corpus.path(), &SessionConfig::default()).expect("open session")
}

#[test]
fn test_foo_classes_sorted_and_distinct() {
    let corpus = fixture_foo_corpus();
    let session = open(&corpus);

    let classes = session
        .query::<ClassDeclaration>()
        .filter(|c| c.name().contains("Foo"))
        .sort_by(|c| c.name().to_string())
        .distinct()
        .collect::<Vec<_>>()
        .unwrap();

    assert_names(&classes, &["FooService", "FooWorker"]);
}

#[test]
fn test_scalar_no_match() {
    let corpus = fixture_nested_corpus();
    let session = open(&corpus);
    let query = session
        .query::<MethodDeclaration>()
        .filter(|m| m.name() == "DoesNotExist");

    match query.collect::<MethodDeclaration>() {
        Err(DeclQueryError::NoMatch { element }) => assert_eq!(element, "method"),
        other => panic!("expected NoMatch, got {:?}", other),
    }
    assert!(query.collect::<Option<MethodDeclaration>>().unwrap().is_none());
}

#[test]
fn test_required_scalar_returns_first() {
    let corpus = fixture_nested_corpus();
    let session = open(&corpus);

    let method = session
        .query::<MethodDeclaration>()
        .sort_by_descending(|m| m.name().to_string())
        .collect::<MethodDeclaration>()
        .unwrap();
    assert_eq!(method.name(), "M2");
}

#[test]
fn test_file_scoped_namespace_members() {
    let source = fixture_file_scoped_namespace(
        "Acme.Billing",
        &format!(
            "{}\n{}{}",
            fixture_usings(&["Acme.Core"]),
            fixture_class_with_methods("Invoice", &["Send", "Void"]),
            fixture_class("Ledger"),
        ),
    );
    let corpus = Corpus::new().file("Billing.cs", source);
    let session = open(&corpus);

    let namespace = session
        .query::<FileScopedNamespaceDeclaration>()
        .collect::<FileScopedNamespaceDeclaration>()
        .unwrap();
    assert_eq!(namespace.name(), "Acme.Billing");
    assert_names(&namespace.types(), &["Invoice", "Ledger"]);
    assert_names(&namespace.usings(), &["Acme.Core"]);
    assert_eq!(namespace.members().len(), 3);

    let invoice_methods = session
        .query::<FileScopedNamespaceDeclaration>()
        .project::<MethodDeclaration, _, _>(|ns| {
            ns.types()
                .into_iter()
                .flat_map(|t| t.methods())
                .last()
                .map_or_else(|| ns.node().clone(), Into::into)
        })
        .collect::<Vec<_>>()
        .unwrap();
    assert_names(&invoice_methods, &["Void"]);
}

#[test]
fn test_realistic_file() {
    let source = format!(
        "{}\n{}",
        fixture_usings(&["System", "System.Collections.Generic"]),
        fixture_namespace(
            "Shop.Orders",
            "    public interface IOrderService { }\n\
             \x20   public sealed class OrderService : IOrderService\n    {\n\
             \x20       public static int Count(string customer, int limit) { return 0; }\n\
             \x20       private async void Refresh() { }\n    }\n\
             \x20   public record OrderId(int Value);\n\
             \x20   public enum Status { Open, Closed }\n",
        )
    );
    let corpus = Corpus::new().file("Orders.cs", source);
    let session = open(&corpus);

    let usings = session.query::<UsingDirective>().to_vec().unwrap();
    let imported: Vec<&str> = usings.iter().map(|u| u.namespace()).collect();
    assert_eq!(imported, vec!["System", "System.Collections.Generic"]);

    let namespace = session.query::<NamespaceDeclaration>().collect::<NamespaceDeclaration>().unwrap();
    assert_eq!(namespace.name(), "Shop.Orders");
    assert_eq!(namespace.types().len(), 4);

    let service = session
        .query::<ClassDeclaration>()
        .filter(|c| c.inherits_from("IOrderService"))
        .collect::<ClassDeclaration>()
        .unwrap();
    assert!(service.has_modifier("sealed"));
    assert_eq!(service.methods().len(), 2);

    let statics = session
        .query::<MethodDeclaration>()
        .filter(|m| m.is_static())
        .to_vec()
        .unwrap();
    assert_eq!(statics.len(), 1);
    assert_eq!(statics[0].return_type(), Some("int"));
    assert_eq!(statics[0].arity(), 2);

    let kinds: Vec<String> = session
        .query::<TypeDeclaration>()
        .sort_by(|t| t.name().to_string())
        .to_vec()
        .unwrap()
        .iter()
        .map(|t| t.kind().to_string())
        .collect();
    assert_eq!(kinds, vec!["interface", "record", "class", "enum"]);
}

#[test]
fn test_custom_kind_from_config() {
    use declquery::{declaration_view, Declaration, ElementKind};

    declaration_view! {
        struct PropertyDeclaration => ElementKind::Custom("property");
    }

    let corpus = Corpus::new().file(
        "Model.cs",
        "class Model { public int Id { get; set; } public string Name { get; set; } }\n",
    );
    let config = SessionConfig::default()
        .register_kind("property_declaration", "property")
        .build()
        .unwrap();
    let session = QuerySession::open(corpus.path(), &config).unwrap();

    let properties = session
        .query::<PropertyDeclaration>()
        .sort_by_descending(|p| p.name().to_string())
        .to_vec()
        .unwrap();
    assert_names(&properties, &["Name", "Id"]);
    assert_eq!(PropertyDeclaration::ELEMENT.to_string(), "property");
}
