//! Source file discovery (walkdir)

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::DiscoveryConfig;
use crate::features::tree_store::ports::{Diagnostic, DiagnosticSink};

/// Recursively list source files under `root` in deterministic order.
///
/// Unreadable directories are reported to `sink` and their subtree is skipped.
pub fn discover_sources(root: &Path, config: &DiscoveryConfig, sink: &dyn DiagnosticSink) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(config.follow_links)
        .sort_by_file_name()
        .into_iter()
        // The root itself is never pruned, even if its name looks hidden
        .filter_entry(|e| e.depth() == 0 || !is_pruned_dir(e, config));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                sink.report(Diagnostic::discovery(path, err.to_string()));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let accepted = entry
            .path()
            .extension()
            .map(|ext| config.accepts_extension(&ext.to_string_lossy()))
            .unwrap_or(false);
        if accepted {
            files.push(entry.into_path());
        }
    }

    tracing::debug!("Discovered {} source files under {}", files.len(), root.display());
    files
}

fn is_pruned_dir(entry: &DirEntry, config: &DiscoveryConfig) -> bool {
    entry.file_type().is_dir() && config.is_excluded_dir(&entry.file_name().to_string_lossy())
}
