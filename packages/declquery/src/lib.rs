//! declquery - declarative queries over C# declarations
//!
//! A session loads a source tree once, then answers typed pipelines of
//! filters, projections, a sort and a distinct flag with one depth-first walk
//! per execution.
//!
//! ```rust,ignore
//! use declquery::{ClassDeclaration, QuerySession, SessionConfig};
//!
//! let session = QuerySession::open("src", &SessionConfig::default())?;
//! let names: Vec<ClassDeclaration> = session
//!     .query::<ClassDeclaration>()
//!     .filter(|c| c.name().contains("Foo"))
//!     .sort_by(|c| c.name().to_string())
//!     .distinct()
//!     .collect()?;
//! ```

#![allow(clippy::should_implement_trait)]

pub mod config;
pub mod errors;
pub mod features;
pub mod shared;

pub use config::{Preset, SessionConfig};
pub use errors::{DeclQueryError, Result};
pub use features::parsing::{
    DeclarationKind, DeclarationNode, KindRegistry, NodeRef, ParsedTree, Parser, TreeSitterParser,
};
pub use features::query_engine::{
    AnyDeclaration, BaseNamespaceDeclaration, ClassDeclaration, Declaration, DelegateDeclaration,
    ElementKind, EnumDeclaration, FileScopedNamespaceDeclaration, InterfaceDeclaration,
    Materialize, MethodDeclaration, NamespaceDeclaration, Pipeline, PipelineOp, Query,
    RecordDeclaration, SortDirection, SortKey, StructDeclaration, TypeDeclaration, UsingDirective,
};
pub use features::tree_store::{
    CollectingSink, Diagnostic, DiagnosticSink, DiagnosticStage, LoadStats, QuerySession,
    TracingSink, TreeStore,
};
pub use shared::models::Span;
