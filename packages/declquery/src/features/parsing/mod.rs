//! Parsing Feature (L1)
//!
//! Turns source text into trees of recognized declarations.
//!
//! ## Structure
//! - `domain/` - DeclarationNode, DeclarationKind, KindRegistry, ParsedTree
//! - `ports/` - Parser trait
//! - `application/` - ParseFileUseCase
//! - `infrastructure/` - TreeSitterParser (C#)

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use domain::{
    DeclarationDetail, DeclarationKind, DeclarationNode, KindRegistry, NodeRef, ParsedTree,
    SyntaxError,
};

pub use infrastructure::TreeSitterParser;
pub use ports::Parser;
