//! Query engine domain models

mod element;
mod operators;
mod sort_key;

pub use element::{
    AnyDeclaration, BaseNamespaceDeclaration, ClassDeclaration, Declaration, DelegateDeclaration,
    ElementKind, EnumDeclaration, FileScopedNamespaceDeclaration, InterfaceDeclaration,
    MethodDeclaration, NamespaceDeclaration, RecordDeclaration, StructDeclaration,
    TypeDeclaration, UsingDirective,
};
pub use operators::{FilterPredicate, Pipeline, PipelineOp, ProjectionFn, SortDirection, SortSpec};
pub use sort_key::{KeyOrdering, SortKey};
