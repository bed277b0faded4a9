//! Java source parsing and per-file symbol extraction.
//!
//! Each input file is driven through the tree-sitter Java grammar and
//! condensed into a [`FileSummary`]: package, imports, type and member
//! declarations with byte-exact spans, and the call/instantiation/local
//! statements later resolution stages need. Parsing operates on bytes;
//! UTF-8 decoding happens only when a source slice is materialized.

pub mod cache;
pub mod java;
mod line_index;
mod summary;

use serde::Serialize;

pub use java::{parse_java, Parsed};
pub use line_index::LineIndex;
pub use summary::{
    ArgSketch, CtorDecl, FieldDecl, FileSummary, Import, MethodDecl, SourceSpan, StmtKind,
    StmtRecord, TypeDecl, TypeKind,
};

#[derive(Debug, Default, Serialize)]
pub struct ParserMetrics {
    pub files_parsed: usize,
    pub cache_hits: usize,
    pub parse_errors: usize,
}
