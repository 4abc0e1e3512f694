//! declquery CLI
//!
//! Load a C# source tree once and print the declarations matching a pipeline
//! built from flags.
//!
//! # Usage
//!
//! ```bash
//! # Classes whose name contains "Foo", sorted by name, deduplicated
//! declquery src --kind class --name-contains Foo --sort name --distinct
//!
//! # First public static method, as JSON
//! declquery src --kind method --modifier public --modifier static --first --json
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use declquery::{
    AnyDeclaration, BaseNamespaceDeclaration, ClassDeclaration, CollectingSink, DeclQueryError, Declaration,
    DelegateDeclaration, EnumDeclaration, InterfaceDeclaration, MethodDeclaration, NodeRef, Query,
    QuerySession, RecordDeclaration, SessionConfig, Span, StructDeclaration, TypeDeclaration,
    UsingDirective,
};

#[derive(Parser)]
#[command(name = "declquery")]
#[command(about = "Query the declarations of a C# source tree", long_about = None)]
struct Cli {
    /// Source root directory
    root: PathBuf,

    /// YAML session config (version 1)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Declaration kind: any, type, namespace, class, struct, interface,
    /// record, enum, delegate, method, using, or a registered custom kind
    #[arg(short, long, default_value = "any")]
    kind: String,

    /// Keep declarations whose name contains this substring
    #[arg(long)]
    name_contains: Option<String>,

    /// Keep declarations carrying this modifier (repeatable)
    #[arg(short, long)]
    modifier: Vec<String>,

    /// Sort key
    #[arg(short, long, value_enum)]
    sort: Option<SortField>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Collapse declarations with identical text
    #[arg(long)]
    distinct: bool,

    /// Print only the first result
    #[arg(long)]
    first: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortField {
    Name,
    Kind,
    Text,
    Line,
}

#[derive(Serialize)]
struct DeclarationRecord<'a> {
    kind: &'a str,
    name: &'a str,
    file: &'a str,
    span: Span,
    modifiers: &'a [String],
}

impl<'a> From<&'a NodeRef> for DeclarationRecord<'a> {
    fn from(node: &'a NodeRef) -> Self {
        Self {
            kind: node.kind().as_str(),
            name: node.name(),
            file: node.file_path(),
            span: node.span(),
            modifiers: node.modifiers(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => SessionConfig::from_yaml(path)?,
        None => SessionConfig::default(),
    };

    let sink = CollectingSink::new();
    let session = QuerySession::open_with_sink(&cli.root, &config, &sink)?;
    for diagnostic in sink.take() {
        eprintln!("warning: {}", diagnostic);
    }

    let mut results = match cli.kind.as_str() {
        "any" => run(&cli, session.query::<AnyDeclaration>())?,
        "type" => run(&cli, session.query::<TypeDeclaration>())?,
        "namespace" => run(&cli, session.query::<BaseNamespaceDeclaration>())?,
        "class" => run(&cli, session.query::<ClassDeclaration>())?,
        "struct" => run(&cli, session.query::<StructDeclaration>())?,
        "interface" => run(&cli, session.query::<InterfaceDeclaration>())?,
        "record" => run(&cli, session.query::<RecordDeclaration>())?,
        "enum" => run(&cli, session.query::<EnumDeclaration>())?,
        "delegate" => run(&cli, session.query::<DelegateDeclaration>())?,
        "method" => run(&cli, session.query::<MethodDeclaration>())?,
        "using" => run(&cli, session.query::<UsingDirective>())?,
        custom => {
            if !session.store().registry().custom_kinds().any(|k| k.as_str() == custom) {
                return Err(format!("unknown declaration kind '{}'", custom).into());
            }
            let name = custom.to_string();
            run(
                &cli,
                session
                    .query::<AnyDeclaration>()
                    .filter(move |d| d.kind().as_str() == name),
            )?
        }
    };

    if cli.first {
        results.truncate(1);
    }
    print_results(&results, cli.json)?;

    if cli.first && results.is_empty() {
        return Err(DeclQueryError::no_match(&cli.kind).into());
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "declquery=debug" } else { "declquery=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Apply the flag pipeline to a typed query and run it
fn run<T: Declaration>(cli: &Cli, mut query: Query<T>) -> declquery::Result<Vec<NodeRef>> {
    if let Some(needle) = cli.name_contains.clone() {
        query = query.filter(move |d| d.node().name().contains(needle.as_str()));
    }
    for modifier in cli.modifier.iter().cloned() {
        query = query.filter(move |d| d.node().has_modifier(&modifier));
    }

    if let Some(field) = cli.sort {
        query = match (field, cli.desc) {
            (SortField::Name, false) => query.sort_by(|d| d.node().name().to_string()),
            (SortField::Name, true) => query.sort_by_descending(|d| d.node().name().to_string()),
            (SortField::Kind, false) => query.sort_by(|d| d.node().kind().to_string()),
            (SortField::Kind, true) => query.sort_by_descending(|d| d.node().kind().to_string()),
            (SortField::Text, false) => query.sort_by(|d| d.node().clone()),
            (SortField::Text, true) => query.sort_by_descending(|d| d.node().clone()),
            (SortField::Line, false) => query.sort_by(|d| d.node().span().start_line),
            (SortField::Line, true) => query.sort_by_descending(|d| d.node().span().start_line),
        };
    }

    if cli.distinct {
        query = query.distinct();
    }

    query.execute()
}

fn print_results(results: &[NodeRef], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let records: Vec<DeclarationRecord<'_>> = results.iter().map(DeclarationRecord::from).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for node in results {
        println!(
            "{}:{}\t{}\t{}",
            node.file_path(),
            node.span().start_line,
            node.kind(),
            node.name()
        );
    }
    Ok(())
}
