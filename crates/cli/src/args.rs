use clap::{Args as ClapArgs, Parser, Subcommand};
use regex::Regex;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Static dependency-graph analyzer for Java codebases",
    long_about = "javagraph parses a Java source tree and emits a typed, queryable dependency \
graph: packages, classes, interfaces, methods, constructors and fields, plus the containment, \
inheritance, implementation, override, call, instantiation and type-usage relations among them.

The graph is written as two line-delimited JSON streams (nodes.jsonl, edges.jsonl) together \
with a symbol-table document, ready for visualization or downstream tooling.

Examples:
  javagraph analyze .                      # analyze the current directory
  javagraph analyze src/ --out graph/      # choose the output directory
  javagraph analyze . --exclude '^target/' # skip generated sources",
    subcommand_required = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a Java project and write the dependency-graph streams
    Analyze(AnalyzeArgs),
}

#[derive(ClapArgs)]
pub struct AnalyzeArgs {
    /// Path to the Java project root
    pub path: PathBuf,
    /// Directory the output streams are written into
    #[arg(long, default_value = "graph_out")]
    pub out: PathBuf,
    /// Exclude files matching these patterns (supports regex)
    #[arg(long, value_parser = crate::parse_exclude, value_delimiter = ',')]
    pub exclude: Vec<Regex>,
    /// Directory to store cache files
    #[arg(long = "cache-dir")]
    pub cache_dir: Option<PathBuf>,
    /// Skip writing the symbol_tables.json document
    #[arg(long = "no-symbol-tables")]
    pub no_symbol_tables: bool,
    /// Also write a Graphviz rendering (dep.dot)
    #[arg(long)]
    pub dot: bool,
    /// Suppress the summary printed after analysis
    #[arg(long)]
    pub quiet: bool,
    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
