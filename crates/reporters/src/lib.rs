//! Writers for the published output formats.
//!
//! Two line-delimited JSON streams (nodes, edges) plus one symbol-table
//! document, all emitted in id order so re-running the analyzer on the
//! same input reproduces the streams byte for byte. Sinks are plain
//! `io::Write`; no file handling happens here.

mod dot;

use analyzer::SymbolIndex;
use graph::DependencyGraph;
use std::io::{self, Write};

pub use dot::to_dot;

/// One JSON object per node, one node per line.
pub fn write_nodes<W: Write>(mut w: W, graph: &DependencyGraph) -> io::Result<()> {
    for node in graph.nodes() {
        serde_json::to_writer(&mut w, node)?;
        w.write_all(b"\n")?;
    }
    Ok(())
}

/// One JSON object per edge, one edge per line.
pub fn write_edges<W: Write>(mut w: W, graph: &DependencyGraph) -> io::Result<()> {
    for edge in graph.edges() {
        serde_json::to_writer(&mut w, &edge)?;
        w.write_all(b"\n")?;
    }
    Ok(())
}

/// The frozen index as one JSON document, for debugging and downstream
/// lookup reuse.
pub fn write_symbol_tables<W: Write>(w: W, index: &SymbolIndex) -> io::Result<()> {
    serde_json::to_writer_pretty(w, index)?;
    Ok(())
}

#[cfg(test)]
mod tests;
