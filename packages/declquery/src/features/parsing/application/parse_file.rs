//! Parse file use case

use std::path::Path;

use crate::errors::{DeclQueryError, Result};
use crate::features::parsing::domain::ParsedTree;
use crate::features::parsing::ports::Parser;

/// Parse file use case
///
/// Reads one file from disk and hands its text to the parser port.
pub struct ParseFileUseCase<'p> {
    parser: &'p dyn Parser,
    max_file_bytes: u64,
    reject_syntax_errors: bool,
}

impl<'p> ParseFileUseCase<'p> {
    pub fn new(parser: &'p dyn Parser, max_file_bytes: u64, reject_syntax_errors: bool) -> Self {
        Self {
            parser,
            max_file_bytes,
            reject_syntax_errors,
        }
    }

    /// Parse source text already in memory
    pub fn execute(&self, source: &str, file_path: &str) -> Result<ParsedTree> {
        let tree = self.parser.parse(source, file_path)?;

        if self.reject_syntax_errors && tree.has_errors() {
            let first = &tree.errors[0];
            return Err(DeclQueryError::parse(
                file_path,
                format!(
                    "{} syntax error(s), first: {} at {}",
                    tree.errors.len(),
                    first.message,
                    first.span
                ),
            ));
        }

        Ok(tree)
    }

    /// Read and parse one file
    pub fn execute_path(&self, path: &Path) -> Result<ParsedTree> {
        let extension = path.extension().map(|e| e.to_string_lossy()).unwrap_or_default();
        if !self.parser.supports_extension(&extension) {
            return Err(DeclQueryError::parse(
                path,
                format!(
                    "the {} parser does not handle '.{}' files",
                    self.parser.language_name(),
                    extension
                ),
            ));
        }

        let metadata = std::fs::metadata(path).map_err(|e| DeclQueryError::parse(path, e.to_string()))?;
        if metadata.len() > self.max_file_bytes {
            return Err(DeclQueryError::parse(
                path,
                format!(
                    "file is {} bytes, limit is {}",
                    metadata.len(),
                    self.max_file_bytes
                ),
            ));
        }

        let bytes = std::fs::read(path).map_err(|e| DeclQueryError::parse(path, e.to_string()))?;
        let source = String::from_utf8(bytes)
            .map_err(|e| DeclQueryError::parse(path, format!("invalid UTF-8: {}", e)))?;

        self.execute(&source, &path.to_string_lossy())
    }
}
