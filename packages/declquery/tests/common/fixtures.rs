//! Test fixture generators

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// `class Name {}`
pub fn fixture_class(name: &str) -> String {
    format!("class {name} {{}}\n")
}

/// Class with empty `void` methods
pub fn fixture_class_with_methods(name: &str, methods: &[&str]) -> String {
    let body: String = methods
        .iter()
        .map(|m| format!("    public void {m}() {{ }}\n"))
        .collect();
    format!("public class {name}\n{{\n{body}}}\n")
}

/// Block namespace wrapping `body`
pub fn fixture_namespace(name: &str, body: &str) -> String {
    format!("namespace {name}\n{{\n{body}}}\n")
}

/// File-scoped namespace followed by `body`
pub fn fixture_file_scoped_namespace(name: &str, body: &str) -> String {
    format!("namespace {name};\n\n{body}")
}

pub fn fixture_usings(namespaces: &[&str]) -> String {
    namespaces.iter().map(|ns| format!("using {ns};\n")).collect()
}

/// Temporary source tree
pub struct Corpus {
    dir: TempDir,
}

impl Corpus {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Write `content` at `rel`, creating parent directories
    pub fn file(self, rel: &str, content: impl AsRef<[u8]>) -> Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write fixture file");
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::new()
    }
}

/// namespace App { class A { M1 } class B { M2 } }
pub fn fixture_nested_corpus() -> Corpus {
    let body = format!(
        "{}{}",
        fixture_class_with_methods("A", &["M1"]),
        fixture_class_with_methods("B", &["M2"])
    );
    Corpus::new().file("App.cs", fixture_namespace("App", &body))
}

/// File A: FooService, BarHelper. File B: FooWorker.
pub fn fixture_foo_corpus() -> Corpus {
    Corpus::new()
        .file("A.cs", format!("{}{}", fixture_class("FooService"), fixture_class("BarHelper")))
        .file("B.cs", fixture_class("FooWorker"))
}
