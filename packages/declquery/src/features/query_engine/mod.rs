//! Query Engine Feature
//!
//! Declarative pipelines over the declarations held by a tree store.
//!
//! ## Structure
//! - `domain/` - element kinds, typed views, pipeline operations, sort keys
//! - `translator` - pipeline -> filters, projection steps, staged sort, distinct
//! - `infrastructure/` - tree walker and materializer
//! - `application/` - ExecuteQueryUseCase
//! - `builder` - `Query<T>` fluent front end

pub mod application;
pub mod builder;
pub mod domain;
pub mod infrastructure;
pub mod translator;

pub use application::ExecuteQueryUseCase;
pub use builder::Query;
pub use domain::{
    AnyDeclaration, BaseNamespaceDeclaration, ClassDeclaration, Declaration, DelegateDeclaration,
    ElementKind, EnumDeclaration, FileScopedNamespaceDeclaration, FilterPredicate,
    InterfaceDeclaration, KeyOrdering, MethodDeclaration, NamespaceDeclaration, Pipeline,
    PipelineOp, ProjectionFn, RecordDeclaration, SortDirection, SortKey, SortSpec,
    StructDeclaration, TypeDeclaration, UsingDirective,
};
pub use infrastructure::{Materialize, TreeWalker, WalkPhase};
pub use translator::{ProjectionStep, StagedSort, TranslatedQuery, Translator};
