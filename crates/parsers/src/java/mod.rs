//! tree-sitter driver for Java compilation units.

use crate::FileSummary;
use anyhow::{Context, Result};

pub mod extractor;
pub mod signature;

#[cfg(test)]
mod tests;

/// Outcome of parsing one file. A syntax error never aborts the project;
/// the file is reported and skipped.
#[derive(Debug)]
pub enum Parsed {
    Summary(FileSummary),
    Failed { detail: String },
}

/// Parses one Java compilation unit from raw bytes and extracts its
/// symbol summary. `path` is the repository-relative path recorded in
/// every emitted span.
pub fn parse_java(path: &str, bytes: &[u8]) -> Result<Parsed> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(tree_sitter_java::language())
        .context("load java grammar")?;
    let Some(tree) = parser.parse(bytes, None) else {
        tracing::warn!(file = path, "grammar produced no tree");
        return Ok(Parsed::Failed {
            detail: "grammar produced no tree".into(),
        });
    };
    let root = tree.root_node();
    if root.has_error() || root.is_error() {
        tracing::warn!(file = path, "java source contains syntax errors");
        return Ok(Parsed::Failed {
            detail: "syntax error".into(),
        });
    }
    Ok(Parsed::Summary(extractor::extract(path, bytes, root)))
}
