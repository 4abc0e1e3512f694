//! Load store use case
//!
//! Discover source files under a root, parse them (in parallel when
//! configured) and retain the trees in discovery order.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use crate::config::{SessionConfig, Validatable};
use crate::errors::{DeclQueryError, Result};
use crate::features::parsing::application::ParseFileUseCase;
use crate::features::parsing::domain::{KindRegistry, ParsedTree};
use crate::features::parsing::infrastructure::TreeSitterParser;
use crate::features::parsing::ports::Parser;
use crate::features::tree_store::domain::{LoadStats, TreeStore};
use crate::features::tree_store::infrastructure::{discover_sources, TracingSink};
use crate::features::tree_store::ports::{Diagnostic, DiagnosticSink};

pub struct LoadStoreUseCase<'a> {
    parser: &'a dyn Parser,
    config: &'a SessionConfig,
    sink: &'a dyn DiagnosticSink,
    registry: Arc<KindRegistry>,
}

impl<'a> LoadStoreUseCase<'a> {
    pub fn new(parser: &'a dyn Parser, config: &'a SessionConfig, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            parser,
            config,
            sink,
            registry: Arc::new(KindRegistry::from_config(&config.kinds)),
        }
    }

    /// Registry the resulting store hands to projections. Should match the parser's.
    pub fn with_registry(mut self, registry: Arc<KindRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn execute(&self, root: &Path) -> Result<TreeStore> {
        self.config.validate()?;
        validate_root(root)?;
        let start = Instant::now();

        let files = discover_sources(root, &self.config.discovery, self.sink);
        let results = self.parse_all(&files);

        let mut stats = LoadStats {
            files_discovered: files.len(),
            ..LoadStats::default()
        };
        let mut trees = Vec::with_capacity(files.len());

        for (path, result) in files.iter().zip(results) {
            match result {
                Ok(tree) => {
                    stats.files_parsed += 1;
                    stats.declarations += tree.declaration_count();
                    if tree.has_errors() {
                        stats.files_with_syntax_errors += 1;
                    }
                    trees.push(tree);
                }
                Err(err) => {
                    stats.files_skipped += 1;
                    self.sink.report(Diagnostic::parse(path.clone(), failure_message(err)));
                }
            }
        }

        tracing::info!(
            "Loaded {} from {}: {} parsed, {} skipped, {} declarations ({:?})",
            self.parser.language_name(),
            root.display(),
            stats.files_parsed,
            stats.files_skipped,
            stats.declarations,
            start.elapsed()
        );

        Ok(TreeStore::new(root, trees, Arc::clone(&self.registry), stats))
    }

    /// Results come back in the order of `files`
    fn parse_all(&self, files: &[PathBuf]) -> Vec<Result<ParsedTree>> {
        let use_case = ParseFileUseCase::new(
            self.parser,
            self.config.discovery.max_file_bytes,
            self.config.parsing.reject_syntax_errors,
        );
        let parse_one = |path: &PathBuf| {
            let result = use_case.execute_path(path);
            if result.is_ok() {
                tracing::debug!("Parsed {}", path.display());
            }
            result
        };

        if !self.config.parsing.parallel || files.len() < 2 {
            return files.iter().map(parse_one).collect();
        }

        let workers = self.config.parsing.effective_workers();
        match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool.install(|| files.par_iter().map(parse_one).collect()),
            Err(e) => {
                tracing::warn!("Could not build a {}-thread parse pool ({}), parsing sequentially", workers, e);
                files.iter().map(parse_one).collect()
            }
        }
    }
}

fn validate_root(root: &Path) -> Result<()> {
    if root.as_os_str().is_empty() {
        return Err(DeclQueryError::config("source root path is empty"));
    }
    if !root.exists() {
        return Err(DeclQueryError::config(format!(
            "source root does not exist: {}",
            root.display()
        )));
    }
    if !root.is_dir() {
        return Err(DeclQueryError::config(format!(
            "source root is not a directory: {}",
            root.display()
        )));
    }
    Ok(())
}

fn failure_message(err: DeclQueryError) -> String {
    match err {
        DeclQueryError::Parse { message, .. } => message,
        other => other.to_string(),
    }
}

impl TreeStore {
    /// Load a C# corpus with the tree-sitter parser, reporting skips through `tracing`
    pub fn load(root: impl AsRef<Path>, config: &SessionConfig) -> Result<Self> {
        Self::load_with_sink(root, config, &TracingSink)
    }

    pub fn load_with_sink(root: impl AsRef<Path>, config: &SessionConfig, sink: &dyn DiagnosticSink) -> Result<Self> {
        let registry = Arc::new(KindRegistry::from_config(&config.kinds));
        let parser = TreeSitterParser::csharp(Arc::clone(&registry));
        LoadStoreUseCase::new(&parser, config, sink)
            .with_registry(registry)
            .execute(root.as_ref())
    }
}
