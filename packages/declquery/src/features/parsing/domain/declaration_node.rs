//! Declaration node representation
//!
//! Language-neutral, immutable view of one recognized declaration.

use std::sync::Arc;

use super::declaration_kind::DeclarationKind;
use crate::shared::models::Span;

/// Shared handle to a declaration node
pub type NodeRef = Arc<DeclarationNode>;

/// Kind-specific data carried by a declaration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeclarationDetail {
    #[default]
    None,
    /// Class, struct, interface, record, enum
    Type {
        base_types: Vec<String>,
        type_parameters: Vec<String>,
    },
    /// Method or delegate
    Signature {
        return_type: Option<String>,
        parameters: Vec<String>,
    },
    Using {
        alias: Option<String>,
        is_static: bool,
        is_global: bool,
    },
}

/// One recognized declaration in a parsed tree
#[derive(Debug, Clone)]
pub struct DeclarationNode {
    kind: DeclarationKind,
    name: Option<String>,
    modifiers: Vec<String>,
    detail: DeclarationDetail,
    /// Full textual rendering
    text: String,
    span: Span,
    file_path: Arc<str>,
    children: Vec<NodeRef>,
}

impl DeclarationNode {
    pub fn new(kind: DeclarationKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            name: None,
            modifiers: Vec::new(),
            detail: DeclarationDetail::None,
            text: text.into(),
            span: Span::zero(),
            file_path: Arc::from(""),
            children: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = modifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_detail(mut self, detail: DeclarationDetail) -> Self {
        self.detail = detail;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_file_path(mut self, file_path: impl Into<Arc<str>>) -> Self {
        self.file_path = file_path.into();
        self
    }

    pub fn with_children(mut self, children: Vec<NodeRef>) -> Self {
        self.children = children;
        self
    }

    pub fn into_ref(self) -> NodeRef {
        Arc::new(self)
    }

    pub fn kind(&self) -> &DeclarationKind {
        &self.kind
    }

    /// Identifier name ("" when the declaration has none)
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Full textual rendering; structural equality is equality of this text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    /// Short description used in error context
    pub fn describe(&self) -> String {
        let name = self.name.as_deref().unwrap_or("<anonymous>");
        if self.file_path.is_empty() {
            format!("{} {}", self.kind, name)
        } else {
            format!(
                "{} {} at {}:{}",
                self.kind, name, self.file_path, self.span.start_line
            )
        }
    }

    pub(crate) fn detail(&self) -> &DeclarationDetail {
        &self.detail
    }

    /// Nested declarations in source order
    pub(crate) fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// Key under which two nodes are structurally equal (identical full rendering)
    pub fn structural_key(&self) -> &str {
        &self.text
    }

    pub fn structurally_eq(&self, other: &DeclarationNode) -> bool {
        self.structural_key() == other.structural_key()
    }
}
