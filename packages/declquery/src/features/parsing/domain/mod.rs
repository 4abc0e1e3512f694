//! Parsing domain models

mod declaration_kind;
mod declaration_node;
mod parsed_tree;

pub use declaration_kind::{DeclarationKind, KindRegistry};
pub use declaration_node::{DeclarationDetail, DeclarationNode, NodeRef};
pub use parsed_tree::{ParsedTree, SyntaxError};
