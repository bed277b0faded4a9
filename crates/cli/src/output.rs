//! Human-facing summary printed after an analysis run.

use graph::{DependencyGraph, Diagnostic};
use parsers::ParserMetrics;
use std::collections::BTreeMap;
use std::io::{self, Write};

pub fn print_summary<W: Write>(
    w: &mut W,
    files_discovered: usize,
    metrics: &ParserMetrics,
    graph: &DependencyGraph,
    diagnostics: &[Diagnostic],
    elapsed_ms: u128,
) -> io::Result<()> {
    writeln!(
        w,
        "Analyzed {files_discovered} files in {elapsed_ms}ms ({} parsed, {} cached, {} parse errors)",
        metrics.files_parsed, metrics.cache_hits, metrics.parse_errors
    )?;
    writeln!(
        w,
        "Graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    )?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for edge in graph.edges() {
        *counts.entry(format!("{:?}", edge.label)).or_default() += 1;
    }
    writeln!(w, "Edge counts:")?;
    for (label, count) in counts {
        writeln!(w, "    {label:<16} {count}")?;
    }

    let unresolved = diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::UnresolvedReference { .. }))
        .count();
    writeln!(
        w,
        "Diagnostics: {} ({} unresolved references)",
        diagnostics.len(),
        unresolved
    )?;
    Ok(())
}
