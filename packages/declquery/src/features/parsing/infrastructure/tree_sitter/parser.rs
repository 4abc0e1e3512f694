//! Tree-sitter parser implementation
//!
//! This is where the tree-sitter dependency lives.

use std::sync::Arc;

use ::tree_sitter::{Node as TSNode, Parser as TSParser, Tree};

use super::languages::csharp::{node_kinds, parse_using_directive};
use crate::errors::{DeclQueryError, Result};
use crate::features::parsing::domain::{
    DeclarationDetail, DeclarationKind, DeclarationNode, KindRegistry, NodeRef, ParsedTree,
    SyntaxError,
};
use crate::features::parsing::ports::Parser;
use crate::shared::models::Span;

/// Tree-sitter based C# parser
///
/// Emits a node only for raw kinds the registry recognizes; declarations
/// nested inside unrecognized nodes attach to the nearest recognized ancestor.
/// A file-scoped namespace owns the declarations that follow it.
pub struct TreeSitterParser {
    registry: Arc<KindRegistry>,
}

/// Per-file conversion state
struct ConvertContext<'s> {
    source: &'s str,
    file_path: Arc<str>,
}

/// Recognized declaration whose subtree is still being walked
struct OpenDeclaration<'t> {
    node: TSNode<'t>,
    kind: DeclarationKind,
    /// Set for a file-scoped namespace: stays open until this node is left
    scope: Option<TSNode<'t>>,
    children: Vec<NodeRef>,
}

impl TreeSitterParser {
    /// Create a C# parser over the given kind registry
    pub fn csharp(registry: Arc<KindRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<KindRegistry> {
        &self.registry
    }

    /// Convert tree-sitter tree to our domain model
    fn convert_tree(&self, tree: &Tree, source: &str, file_path: &str) -> ParsedTree {
        let root_node = tree.root_node();
        let ctx = ConvertContext {
            source,
            file_path: Arc::from(file_path),
        };

        let roots = self.collect_declarations(root_node, &ctx);
        let errors = if root_node.has_error() {
            collect_errors(root_node)
        } else {
            Vec::new()
        };

        ParsedTree::new(roots, file_path, self.language_name())
            .with_line_count(source.lines().count())
            .with_errors(errors)
    }

    /// Every recognized declaration under `root`, nested by recognized ancestry
    ///
    /// Iterative cursor walk; expression nesting in method bodies is unbounded.
    fn collect_declarations(&self, root: TSNode<'_>, ctx: &ConvertContext<'_>) -> Vec<NodeRef> {
        let mut roots = Vec::new();
        let mut open: Vec<OpenDeclaration<'_>> = Vec::new();
        let mut cursor = root.walk();

        loop {
            let node = cursor.node();
            if let Some(kind) = self.registry.resolve(node.kind()) {
                open.push(OpenDeclaration {
                    node,
                    kind,
                    scope: None,
                    children: Vec::new(),
                });
            }

            if cursor.goto_first_child() {
                continue;
            }

            loop {
                self.leave(cursor.node(), &mut open, &mut roots, ctx);
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return roots;
                }
            }
        }
    }

    /// Close the declarations that end at `node`
    fn leave<'t>(
        &self,
        node: TSNode<'t>,
        open: &mut Vec<OpenDeclaration<'t>>,
        roots: &mut Vec<NodeRef>,
        ctx: &ConvertContext<'_>,
    ) {
        // `namespace X;` owns the declarations that follow it in the compilation unit
        while open.last().is_some_and(|d| d.scope.is_some_and(|s| s.id() == node.id())) {
            if let Some(declaration) = open.pop() {
                self.close(declaration, open, roots, ctx);
            }
        }

        if !open.last().is_some_and(|d| d.node.id() == node.id()) {
            return;
        }
        let Some(mut declaration) = open.pop() else {
            return;
        };

        if declaration.kind == DeclarationKind::FileScopedNamespace {
            if let Some(parent) = node.parent().filter(|p| p.kind() == node_kinds::COMPILATION_UNIT) {
                declaration.scope = Some(parent);
                open.push(declaration);
                return;
            }
        }
        self.close(declaration, open, roots, ctx);
    }

    fn close(
        &self,
        declaration: OpenDeclaration<'_>,
        open: &mut [OpenDeclaration<'_>],
        roots: &mut Vec<NodeRef>,
        ctx: &ConvertContext<'_>,
    ) {
        let built = self.build_node(declaration, ctx).into_ref();
        match open.last_mut() {
            Some(parent) => parent.children.push(built),
            None => roots.push(built),
        }
    }

    fn build_node(&self, declaration: OpenDeclaration<'_>, ctx: &ConvertContext<'_>) -> DeclarationNode {
        let OpenDeclaration {
            node,
            kind,
            scope,
            children,
        } = declaration;
        let (text, span) = match scope {
            Some(scope) => (
                ctx.source.get(node.start_byte()..scope.end_byte()).unwrap_or(""),
                Span::new(
                    node.start_position().row as u32 + 1,
                    node.start_position().column as u32,
                    scope.end_position().row as u32 + 1,
                    scope.end_position().column as u32,
                ),
            ),
            None => (node_text(node, ctx.source), span_of(node)),
        };

        let (name, detail) = match kind {
            DeclarationKind::UsingDirective => {
                let parts = parse_using_directive(text);
                (
                    Some(parts.target),
                    DeclarationDetail::Using {
                        alias: parts.alias,
                        is_static: parts.is_static,
                        is_global: parts.is_global,
                    },
                )
            }
            DeclarationKind::Method | DeclarationKind::Delegate => (
                field_text(node, node_kinds::FIELD_NAME, ctx.source),
                DeclarationDetail::Signature {
                    return_type: field_text(node, node_kinds::FIELD_RETURNS, ctx.source)
                        .or_else(|| field_text(node, node_kinds::FIELD_TYPE, ctx.source)),
                    parameters: parameters(node, ctx.source),
                },
            ),
            ref k if k.is_type_declaration() => (
                field_text(node, node_kinds::FIELD_NAME, ctx.source),
                DeclarationDetail::Type {
                    base_types: named_children_of(node, node_kinds::BASE_LIST, ctx.source),
                    type_parameters: named_children_of(
                        node,
                        node_kinds::TYPE_PARAMETER_LIST,
                        ctx.source,
                    ),
                },
            ),
            _ => (
                field_text(node, node_kinds::FIELD_NAME, ctx.source),
                DeclarationDetail::None,
            ),
        };

        let mut declaration = DeclarationNode::new(kind, text)
            .with_modifiers(modifiers(node, ctx.source))
            .with_detail(detail)
            .with_span(span)
            .with_file_path(ctx.file_path.clone())
            .with_children(children);
        if let Some(name) = name {
            declaration = declaration.with_name(name);
        }
        declaration
    }
}

impl Parser for TreeSitterParser {
    fn parse(&self, source: &str, file_path: &str) -> Result<ParsedTree> {
        let mut parser = TSParser::new();
        parser
            .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
            .map_err(|e| DeclQueryError::parse(file_path, format!("Failed to set language: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| DeclQueryError::parse(file_path, "Failed to parse source code"))?;

        Ok(self.convert_tree(&tree, source, file_path))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("cs") || ext.eq_ignore_ascii_case("csx")
    }

    fn language_name(&self) -> &'static str {
        "csharp"
    }
}

fn node_text<'s>(node: TSNode<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

fn span_of(node: TSNode<'_>) -> Span {
    Span::new(
        node.start_position().row as u32 + 1,
        node.start_position().column as u32,
        node.end_position().row as u32 + 1,
        node.end_position().column as u32,
    )
}

fn field_text(node: TSNode<'_>, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| node_text(n, source).to_string())
        .filter(|s| !s.is_empty())
}

fn modifiers(node: TSNode<'_>, source: &str) -> Vec<String> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|c| c.kind() == node_kinds::MODIFIER)
        .map(|c| node_text(c, source).to_string())
        .collect()
}

/// Texts of the named children of the first direct child of `list_kind`
fn named_children_of(node: TSNode<'_>, list_kind: &str, source: &str) -> Vec<String> {
    let mut cursor = node.walk();
    let list = node.children(&mut cursor).find(|c| c.kind() == list_kind);
    match list {
        Some(list) => {
            let mut list_cursor = list.walk();
            list.named_children(&mut list_cursor)
                .map(|c| node_text(c, source).to_string())
                .collect()
        }
        None => Vec::new(),
    }
}

fn parameters(node: TSNode<'_>, source: &str) -> Vec<String> {
    match node.child_by_field_name(node_kinds::FIELD_PARAMETERS) {
        Some(list) => {
            let mut cursor = list.walk();
            list.named_children(&mut cursor)
                .filter(|c| c.kind() == node_kinds::PARAMETER)
                .map(|c| node_text(c, source).to_string())
                .collect()
        }
        None => Vec::new(),
    }
}

/// Collect parse errors, outermost first
fn collect_errors(root: TSNode<'_>) -> Vec<SyntaxError> {
    let mut errors = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            errors.push(SyntaxError {
                message: if node.is_missing() {
                    format!("Missing {:?}", node.kind())
                } else {
                    "Unexpected syntax".to_string()
                },
                span: span_of(node),
            });
            continue;
        }

        let mut cursor = node.walk();
        let flagged: Vec<TSNode<'_>> = node
            .children(&mut cursor)
            .filter(|child| child.has_error() || child.is_missing())
            .collect();
        stack.extend(flagged.into_iter().rev());
    }

    errors
}
