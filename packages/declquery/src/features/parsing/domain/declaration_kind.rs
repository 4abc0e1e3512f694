//! Declaration kinds and the registry of recognized raw node kinds

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::config::KindConfig;

/// Declaration kind tag (open set: `Custom` covers kinds registered at runtime)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeclarationKind {
    // Type declarations
    Class,
    Struct,
    Interface,
    Record,
    Enum,
    Delegate,

    // Namespaces
    Namespace,
    FileScopedNamespace,

    // Members
    Method,

    // Directives
    UsingDirective,

    /// Registered through `KindConfig::extra`
    Custom(String),
}

impl DeclarationKind {
    pub fn as_str(&self) -> &str {
        match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Struct => "struct",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Record => "record",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Delegate => "delegate",
            DeclarationKind::Namespace => "namespace",
            DeclarationKind::FileScopedNamespace => "file_scoped_namespace",
            DeclarationKind::Method => "method",
            DeclarationKind::UsingDirective => "using",
            DeclarationKind::Custom(name) => name,
        }
    }

    /// Parse a kind name as printed by `as_str`. Unknown names become `Custom`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "class" => DeclarationKind::Class,
            "struct" => DeclarationKind::Struct,
            "interface" => DeclarationKind::Interface,
            "record" => DeclarationKind::Record,
            "enum" => DeclarationKind::Enum,
            "delegate" => DeclarationKind::Delegate,
            "namespace" => DeclarationKind::Namespace,
            "file_scoped_namespace" => DeclarationKind::FileScopedNamespace,
            "method" => DeclarationKind::Method,
            "using" => DeclarationKind::UsingDirective,
            other => DeclarationKind::Custom(other.to_string()),
        }
    }

    /// Class, struct, interface, record or enum
    pub fn is_type_declaration(&self) -> bool {
        matches!(
            self,
            DeclarationKind::Class
                | DeclarationKind::Struct
                | DeclarationKind::Interface
                | DeclarationKind::Record
                | DeclarationKind::Enum
        )
    }

    pub fn is_namespace(&self) -> bool {
        matches!(
            self,
            DeclarationKind::Namespace | DeclarationKind::FileScopedNamespace
        )
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, DeclarationKind::Custom(_))
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// tree-sitter-c-sharp node kinds that map to built-in declaration kinds
static BUILTIN_KINDS: Lazy<FxHashMap<&'static str, DeclarationKind>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    map.insert("class_declaration", DeclarationKind::Class);
    map.insert("struct_declaration", DeclarationKind::Struct);
    map.insert("interface_declaration", DeclarationKind::Interface);
    map.insert("record_declaration", DeclarationKind::Record);
    map.insert("record_struct_declaration", DeclarationKind::Record);
    map.insert("enum_declaration", DeclarationKind::Enum);
    map.insert("delegate_declaration", DeclarationKind::Delegate);
    map.insert("namespace_declaration", DeclarationKind::Namespace);
    map.insert(
        "file_scoped_namespace_declaration",
        DeclarationKind::FileScopedNamespace,
    );
    map.insert("method_declaration", DeclarationKind::Method);
    map.insert("using_directive", DeclarationKind::UsingDirective);
    map
});

/// The recognized declaration-kind set
///
/// Maps raw parser node kinds to `DeclarationKind`. Only nodes whose raw kind
/// is registered become declaration nodes.
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    custom: FxHashMap<String, DeclarationKind>,
}

impl KindRegistry {
    /// Built-in kinds plus the extra registrations of a config section
    pub fn from_config(config: &KindConfig) -> Self {
        let mut registry = Self::default();
        for (raw, name) in &config.extra {
            registry.register(raw.clone(), name.clone());
        }
        registry
    }

    /// Register a raw node kind as a custom declaration kind
    ///
    /// Built-in raw kinds cannot be remapped; such registrations are ignored.
    pub fn register(&mut self, raw_kind: impl Into<String>, name: impl Into<String>) -> &mut Self {
        let raw_kind = raw_kind.into();
        if !Self::is_builtin_raw_kind(&raw_kind) {
            self.custom
                .insert(raw_kind, DeclarationKind::Custom(name.into()));
        }
        self
    }

    pub fn is_builtin_raw_kind(raw_kind: &str) -> bool {
        BUILTIN_KINDS.contains_key(raw_kind)
    }

    /// Map a raw node kind to a declaration kind, if recognized
    pub fn resolve(&self, raw_kind: &str) -> Option<DeclarationKind> {
        BUILTIN_KINDS
            .get(raw_kind)
            .or_else(|| self.custom.get(raw_kind))
            .cloned()
    }

    /// Whether a declaration kind belongs to the recognized set
    pub fn recognizes(&self, kind: &DeclarationKind) -> bool {
        match kind {
            DeclarationKind::Custom(_) => self.custom.values().any(|k| k == kind),
            _ => true,
        }
    }

    pub fn custom_kinds(&self) -> impl Iterator<Item = &DeclarationKind> {
        self.custom.values()
    }
}
