//! C#-specific tree-sitter configuration

/// C# node kinds and field names used during extraction
pub mod node_kinds {
    pub const COMPILATION_UNIT: &str = "compilation_unit";
    pub const MODIFIER: &str = "modifier";
    pub const BASE_LIST: &str = "base_list";
    pub const TYPE_PARAMETER_LIST: &str = "type_parameter_list";
    pub const PARAMETER: &str = "parameter";

    pub const FIELD_NAME: &str = "name";
    pub const FIELD_PARAMETERS: &str = "parameters";
    pub const FIELD_RETURNS: &str = "returns";
    pub const FIELD_TYPE: &str = "type";
}

/// Parsed pieces of a using-directive
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsingParts {
    pub target: String,
    pub alias: Option<String>,
    pub is_static: bool,
    pub is_global: bool,
}

/// Split a using-directive's text into its parts
///
/// Handles `global using`, `using static`, `using unsafe` and aliases
/// (`using Json = System.Text.Json;`).
pub fn parse_using_directive(text: &str) -> UsingParts {
    let mut rest = text.trim().trim_end_matches(';').trim();

    let is_global = strip_keyword(&mut rest, "global");
    strip_keyword(&mut rest, "using");
    let is_static = strip_keyword(&mut rest, "static");
    strip_keyword(&mut rest, "unsafe");

    let (alias, target) = match rest.split_once('=') {
        Some((alias, target)) => (Some(alias.trim().to_string()), target.trim()),
        None => (None, rest.trim()),
    };

    UsingParts {
        target: target.to_string(),
        alias,
        is_static,
        is_global,
    }
}

fn strip_keyword(rest: &mut &str, keyword: &str) -> bool {
    if let Some(after) = rest.strip_prefix(keyword) {
        if after.starts_with(char::is_whitespace) {
            *rest = after.trim_start();
            return true;
        }
    }
    false
}
