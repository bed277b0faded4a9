//! Structured diagnostics surfaced alongside the graph.
//!
//! The analyzer never logs; everything it has to say about the input is
//! returned as data. Only [`MalformedSpan`] aborts the pipeline — it
//! signals a bug inside the analyzer, not a property of the input.

use crate::LineRange;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The grammar could not produce a usable tree; the file contributes
    /// no nodes or edges.
    ParseError { file_path: String, detail: String },
    /// Two physically distinct declarations produced the same canonical
    /// id. The first declaration wins; the later one is dropped.
    DuplicateSymbol {
        id: String,
        file_path: String,
        line: usize,
    },
    /// Name resolution failed; the edge was emitted with a synthetic
    /// destination and `resolved = false`.
    UnresolvedReference { src: String, name: String },
}

/// A source range that crosses file bounds or inverts. Programmer error:
/// aborts the pipeline instead of accumulating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedSpan {
    pub file_path: String,
    pub line_range: LineRange,
    pub line_count: usize,
}

impl fmt::Display for MalformedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "malformed span [{}, {}] in {} ({} lines)",
            self.line_range.start(),
            self.line_range.end(),
            self.file_path,
            self.line_count
        )
    }
}

impl std::error::Error for MalformedSpan {}
