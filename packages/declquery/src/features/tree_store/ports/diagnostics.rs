//! Diagnostic channel
//!
//! Non-fatal per-file problems found while loading a corpus.

use std::fmt;
use std::path::PathBuf;

/// Where in the load a diagnostic was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticStage {
    Discovery,
    Parse,
}

impl DiagnosticStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticStage::Discovery => "discovery",
            DiagnosticStage::Parse => "parse",
        }
    }
}

/// `(path, message)` pair for a skipped file or directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub message: String,
    pub stage: DiagnosticStage,
}

impl Diagnostic {
    pub fn new(stage: DiagnosticStage, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            stage,
        }
    }

    pub fn discovery(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticStage::Discovery, path, message)
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticStage::Parse, path, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage.as_str(), self.path.display(), self.message)
    }
}

/// Receiver of load diagnostics
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}
