//! Discovery of Java sources under a project root.
//!
//! The analyzer's input contract is an ordered sequence of
//! `(relative_path, bytes)` pairs; this crate produces it. Paths are
//! normalized to forward slashes relative to the root and the result is
//! sorted, so the same tree always yields the same input sequence.

mod walk;

use anyhow::Context;
use regex::Regex;
use std::fs;
use std::path::{Component, Path};
use tracing::debug;

pub use walk::visit;

/// One discovered compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Root-relative path with forward-slash separators.
    pub rel_path: String,
    pub bytes: Vec<u8>,
}

/// Forward-slash, root-relative rendering of `path`.
fn normalize(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(os) => Some(os.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Walks `root` and returns every `.java` file not matching `excludes`,
/// sorted by relative path.
pub fn discover(root: &Path, excludes: &[Regex]) -> anyhow::Result<Vec<SourceFile>> {
    let mut out = Vec::new();
    let is_excluded = |path: &Path| {
        let rel = normalize(root, path);
        !rel.is_empty() && excludes.iter().any(|re| re.is_match(&rel))
    };
    let mut collect = |path: &Path| {
        if path.extension().and_then(|e| e.to_str()) != Some("java") {
            return Ok(());
        }
        debug!(file = %path.display(), "Java source discovered");
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read file: {}", path.display()))?;
        out.push(SourceFile {
            rel_path: normalize(root, path),
            bytes,
        });
        Ok(())
    };
    walk::visit(root, &is_excluded, &mut collect)?;
    out.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    Ok(out)
}
