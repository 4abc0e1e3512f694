//! Element kinds and typed declaration views
//!
//! A view is a newtype over `NodeRef` that can only be built for nodes whose
//! kind it accepts. Pipelines are typed by views; the walker narrows nodes
//! with `Declaration::cast` before any predicate body runs.

use std::fmt;
use std::sync::Arc;

use crate::features::parsing::domain::{DeclarationDetail, DeclarationKind, NodeRef};

/// Element kind a pipeline stage is typed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Every recognized declaration
    Any,
    /// Class, struct, interface, record or enum
    TypeDeclaration,
    /// Block or file-scoped namespace
    BaseNamespace,
    Class,
    Struct,
    Interface,
    Record,
    Enum,
    Delegate,
    Namespace,
    FileScopedNamespace,
    Method,
    UsingDirective,
    /// A kind registered through `KindConfig::extra`, by name
    Custom(&'static str),
}

impl ElementKind {
    /// Whether a node of `kind` is assignable to this element kind
    pub fn accepts(&self, kind: &DeclarationKind) -> bool {
        match self {
            ElementKind::Any => true,
            ElementKind::TypeDeclaration => kind.is_type_declaration(),
            ElementKind::BaseNamespace => kind.is_namespace(),
            ElementKind::Class => *kind == DeclarationKind::Class,
            ElementKind::Struct => *kind == DeclarationKind::Struct,
            ElementKind::Interface => *kind == DeclarationKind::Interface,
            ElementKind::Record => *kind == DeclarationKind::Record,
            ElementKind::Enum => *kind == DeclarationKind::Enum,
            ElementKind::Delegate => *kind == DeclarationKind::Delegate,
            ElementKind::Namespace => *kind == DeclarationKind::Namespace,
            ElementKind::FileScopedNamespace => *kind == DeclarationKind::FileScopedNamespace,
            ElementKind::Method => *kind == DeclarationKind::Method,
            ElementKind::UsingDirective => *kind == DeclarationKind::UsingDirective,
            ElementKind::Custom(name) => matches!(kind, DeclarationKind::Custom(k) if k == name),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Any => "declaration",
            ElementKind::TypeDeclaration => "type declaration",
            ElementKind::BaseNamespace => "namespace declaration",
            ElementKind::Class => "class",
            ElementKind::Struct => "struct",
            ElementKind::Interface => "interface",
            ElementKind::Record => "record",
            ElementKind::Enum => "enum",
            ElementKind::Delegate => "delegate",
            ElementKind::Namespace => "namespace",
            ElementKind::FileScopedNamespace => "file_scoped_namespace",
            ElementKind::Method => "method",
            ElementKind::UsingDirective => "using",
            ElementKind::Custom(name) => *name,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view over a declaration node
///
/// Implemented by the `declaration_view!` macro; callers use the same macro
/// to declare views over custom kinds.
pub trait Declaration: Clone + Send + Sync + 'static {
    const ELEMENT: ElementKind;

    /// Wrap a node without checking its kind. Prefer [`Declaration::cast`].
    fn from_node_unchecked(node: NodeRef) -> Self;

    fn node(&self) -> &NodeRef;

    fn cast(node: &NodeRef) -> Option<Self> {
        if Self::ELEMENT.accepts(node.kind()) {
            Some(Self::from_node_unchecked(Arc::clone(node)))
        } else {
            None
        }
    }

    fn into_node(self) -> NodeRef {
        Arc::clone(self.node())
    }

    /// Re-narrow this declaration to another view
    fn downcast<V: Declaration>(&self) -> Option<V> {
        V::cast(self.node())
    }
}

/// Declare a typed view newtype
///
/// ```rust,ignore
/// declaration_view! {
///     /// C# property
///     pub struct PropertyDeclaration => ElementKind::Custom("property");
/// }
/// ```
#[macro_export]
macro_rules! declaration_view {
    ($(#[$meta:meta])* $vis:vis struct $name:ident => $element:expr;) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name($crate::features::parsing::domain::NodeRef);

        impl $crate::features::query_engine::domain::Declaration for $name {
            const ELEMENT: $crate::features::query_engine::domain::ElementKind = $element;

            fn from_node_unchecked(node: $crate::features::parsing::domain::NodeRef) -> Self {
                Self(node)
            }

            fn node(&self) -> &$crate::features::parsing::domain::NodeRef {
                &self.0
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::features::parsing::domain::DeclarationNode;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::std::convert::From<$name> for $crate::features::parsing::domain::NodeRef {
            fn from(view: $name) -> Self {
                view.0
            }
        }

        impl ::std::convert::From<$name> for $crate::features::query_engine::domain::SortKey {
            fn from(view: $name) -> Self {
                $crate::features::query_engine::domain::SortKey::Node(view.0)
            }
        }

        impl $crate::features::query_engine::infrastructure::Materialize<$name> for $name {
            fn materialize(
                nodes: ::std::vec::Vec<$crate::features::parsing::domain::NodeRef>,
            ) -> $crate::errors::Result<Self> {
                nodes
                    .iter()
                    .find_map(<$name as $crate::features::query_engine::domain::Declaration>::cast)
                    .ok_or_else(|| {
                        $crate::errors::DeclQueryError::no_match(
                            <$name as $crate::features::query_engine::domain::Declaration>::ELEMENT,
                        )
                    })
            }
        }
    };
}

declaration_view! {
    /// Any recognized declaration
    pub struct AnyDeclaration => ElementKind::Any;
}

declaration_view! {
    /// Class, struct, interface, record or enum
    pub struct TypeDeclaration => ElementKind::TypeDeclaration;
}

declaration_view! {
    /// Block or file-scoped namespace
    pub struct BaseNamespaceDeclaration => ElementKind::BaseNamespace;
}

declaration_view! { pub struct ClassDeclaration => ElementKind::Class; }
declaration_view! { pub struct StructDeclaration => ElementKind::Struct; }
declaration_view! { pub struct InterfaceDeclaration => ElementKind::Interface; }
declaration_view! { pub struct RecordDeclaration => ElementKind::Record; }
declaration_view! { pub struct EnumDeclaration => ElementKind::Enum; }
declaration_view! { pub struct DelegateDeclaration => ElementKind::Delegate; }
declaration_view! { pub struct NamespaceDeclaration => ElementKind::Namespace; }
declaration_view! { pub struct FileScopedNamespaceDeclaration => ElementKind::FileScopedNamespace; }
declaration_view! { pub struct MethodDeclaration => ElementKind::Method; }

declaration_view! {
    /// `using` directive; the name is the imported namespace or type
    pub struct UsingDirective => ElementKind::UsingDirective;
}

fn children_as<V: Declaration>(node: &NodeRef) -> Vec<V> {
    node.children().iter().filter_map(V::cast).collect()
}

impl AnyDeclaration {
    /// Directly nested declarations in source order
    pub fn children(&self) -> Vec<AnyDeclaration> {
        children_as(&self.0)
    }
}

macro_rules! type_declaration_accessors {
    ($($view:ident),+ $(,)?) => {$(
        impl $view {
            /// Names in the base list (`: Base, IFoo`)
            pub fn base_types(&self) -> &[String] {
                match self.0.detail() {
                    DeclarationDetail::Type { base_types, .. } => base_types,
                    _ => &[],
                }
            }

            pub fn type_parameters(&self) -> &[String] {
                match self.0.detail() {
                    DeclarationDetail::Type { type_parameters, .. } => type_parameters,
                    _ => &[],
                }
            }

            pub fn inherits_from(&self, base: &str) -> bool {
                self.base_types().iter().any(|b| b == base)
            }

            /// Declared members (methods, nested types, custom kinds)
            pub fn members(&self) -> Vec<AnyDeclaration> {
                children_as(&self.0)
            }

            pub fn methods(&self) -> Vec<MethodDeclaration> {
                children_as(&self.0)
            }

            pub fn nested_types(&self) -> Vec<TypeDeclaration> {
                children_as(&self.0)
            }
        }
    )+};
}

type_declaration_accessors!(
    TypeDeclaration,
    ClassDeclaration,
    StructDeclaration,
    InterfaceDeclaration,
    RecordDeclaration,
    EnumDeclaration,
);

macro_rules! namespace_accessors {
    ($($view:ident),+ $(,)?) => {$(
        impl $view {
            pub fn members(&self) -> Vec<AnyDeclaration> {
                children_as(&self.0)
            }

            pub fn types(&self) -> Vec<TypeDeclaration> {
                children_as(&self.0)
            }

            pub fn namespaces(&self) -> Vec<NamespaceDeclaration> {
                children_as(&self.0)
            }

            pub fn usings(&self) -> Vec<UsingDirective> {
                children_as(&self.0)
            }
        }
    )+};
}

namespace_accessors!(
    BaseNamespaceDeclaration,
    NamespaceDeclaration,
    FileScopedNamespaceDeclaration,
);

macro_rules! signature_accessors {
    ($($view:ident),+ $(,)?) => {$(
        impl $view {
            /// `None` when the signature carries no return type
            pub fn return_type(&self) -> Option<&str> {
                match self.0.detail() {
                    DeclarationDetail::Signature { return_type, .. } => return_type.as_deref(),
                    _ => None,
                }
            }

            /// Parameter declarations as written (`string name`)
            pub fn parameters(&self) -> &[String] {
                match self.0.detail() {
                    DeclarationDetail::Signature { parameters, .. } => parameters,
                    _ => &[],
                }
            }

            pub fn arity(&self) -> usize {
                self.parameters().len()
            }
        }
    )+};
}

signature_accessors!(MethodDeclaration, DelegateDeclaration);

impl MethodDeclaration {
    pub fn is_static(&self) -> bool {
        self.0.has_modifier("static")
    }

    pub fn is_async(&self) -> bool {
        self.0.has_modifier("async")
    }
}

impl UsingDirective {
    /// Imported namespace or type
    pub fn namespace(&self) -> &str {
        self.0.name()
    }

    pub fn alias(&self) -> Option<&str> {
        match self.0.detail() {
            DeclarationDetail::Using { alias, .. } => alias.as_deref(),
            _ => None,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self.0.detail(), DeclarationDetail::Using { is_static: true, .. })
    }

    pub fn is_global(&self) -> bool {
        matches!(self.0.detail(), DeclarationDetail::Using { is_global: true, .. })
    }
}
