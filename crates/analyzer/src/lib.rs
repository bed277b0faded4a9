//! Multi-stage dependency analysis.
//!
//! Turns a set of per-file symbol summaries into a closed-world graph
//! with stable node identities and resolved cross-references. The
//! pipeline is one synchronous call: symbol tables are built and frozen,
//! then hierarchy, call and type-usage resolution run in order against
//! them, each producing only edges. Nothing mutates a node after it is
//! born.
//!
//! Stage order matters: call resolution consumes the override table the
//! hierarchy stage computes, so the stages are materialized rather than
//! streamed.

pub mod calls;
pub mod hierarchy;
pub mod index;
pub mod scope;
pub mod syntactic;
pub mod usage;

use anyhow::Result;
use graph::{Diagnostic, DependencyGraph};
use parsers::FileSummary;

pub use hierarchy::Hierarchy;
pub use index::SymbolIndex;

/// Everything the analyzer returns: the frozen graph, the symbol index
/// it was resolved against, and the diagnostics accumulated on the way.
pub struct Analysis {
    pub graph: DependencyGraph,
    pub index: SymbolIndex,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the full pipeline over parsed file summaries.
///
/// Fails only on [`graph::MalformedSpan`]; every other problem with the
/// input is reported through `diagnostics` and degrades to unresolved
/// edges or skipped declarations.
pub fn analyze(files: &[FileSummary]) -> Result<Analysis> {
    let mut graph = DependencyGraph::new();
    let mut diagnostics = Vec::new();

    let index = SymbolIndex::build(files);
    syntactic::populate(files, &index, &mut graph, &mut diagnostics)?;
    let hierarchy = hierarchy::resolve(files, &index, &mut graph, &mut diagnostics);
    calls::resolve(files, &index, &hierarchy, &mut graph, &mut diagnostics);
    usage::resolve(files, &index, &mut graph);

    Ok(Analysis {
        graph,
        index,
        diagnostics,
    })
}
