//! Tree store ports

mod diagnostics;

pub use diagnostics::{Diagnostic, DiagnosticSink, DiagnosticStage};
