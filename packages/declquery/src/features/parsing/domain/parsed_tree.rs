//! Parsed tree representation
//!
//! One file's declaration hierarchy.

use super::declaration_node::NodeRef;
use crate::shared::models::Span;

/// Parsed declaration tree of one source file
#[derive(Debug, Clone)]
pub struct ParsedTree {
    /// Top-level declarations in source order
    pub roots: Vec<NodeRef>,

    /// File path (for error messages)
    pub file_path: String,

    pub language: String,

    pub line_count: usize,

    /// Syntax errors recovered by the parser (if any)
    pub errors: Vec<SyntaxError>,
}

/// Syntax error recovered inside an otherwise usable tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl ParsedTree {
    pub fn new(roots: Vec<NodeRef>, file_path: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            roots,
            file_path: file_path.into(),
            language: language.into(),
            line_count: 0,
            errors: Vec::new(),
        }
    }

    pub fn with_line_count(mut self, line_count: usize) -> Self {
        self.line_count = line_count;
        self
    }

    pub fn with_errors(mut self, errors: Vec<SyntaxError>) -> Self {
        self.errors = errors;
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of declarations at any depth
    pub fn declaration_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&NodeRef> = self.roots.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
