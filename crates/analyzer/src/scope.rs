//! Lexical name resolution.
//!
//! Resolves a raw type name as written in one file against the frozen
//! index, in scope order: nested types of the enclosing type, the
//! enclosing type itself, single-type imports, the file's package,
//! on-demand imports, and finally a unique-suffix sweep of the whole
//! index. The resolver is a heuristic, not a javac emulation: an
//! ambiguous name stays unresolved instead of guessing.

use crate::index::{SymbolIndex, TypeEntry};
use parsers::FileSummary;

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "short", "int", "long", "char", "float", "double", "void", "var",
];

pub fn is_primitive(name: &str) -> bool {
    PRIMITIVES.contains(&name)
}

pub fn strip_arrays(raw: &str) -> &str {
    let mut base = raw;
    while let Some(stripped) = base.strip_suffix("[]") {
        base = stripped;
    }
    base
}

pub struct TypeResolver<'a> {
    index: &'a SymbolIndex,
}

impl<'a> TypeResolver<'a> {
    pub fn new(index: &'a SymbolIndex) -> Self {
        Self { index }
    }

    /// Resolves `raw` (array suffixes allowed) in the scope of `file`,
    /// optionally inside the type `enclosing`.
    pub fn resolve(
        &self,
        raw: &str,
        file: &FileSummary,
        enclosing: Option<&str>,
    ) -> Option<&'a TypeEntry> {
        let base = strip_arrays(raw.trim());
        if base.is_empty() || is_primitive(base) {
            return None;
        }

        // Already qualified.
        if let Some(entry) = self.index.type_of(base) {
            return Some(entry);
        }

        if let Some(enclosing) = enclosing {
            if let Some(entry) = self.index.type_of(&format!("{enclosing}.{base}")) {
                return Some(entry);
            }
            if let Some(entry) = self.index.type_of(enclosing) {
                if entry.simple_name == base {
                    return Some(entry);
                }
            }
        }

        for import in file.imports.iter().filter(|i| !i.on_demand && !i.is_static) {
            if import.path == base || import.path.ends_with(&format!(".{base}")) {
                if let Some(entry) = self.index.type_of(&import.path) {
                    return Some(entry);
                }
            }
        }

        let same_package = if file.package == graph::DEFAULT_PACKAGE {
            base.to_string()
        } else {
            format!("{}.{base}", file.package)
        };
        if let Some(entry) = self.index.type_of(&same_package) {
            return Some(entry);
        }

        let mut on_demand = file
            .imports
            .iter()
            .filter(|i| i.on_demand && !i.is_static)
            .filter_map(|i| self.index.type_of(&format!("{}.{base}", i.path)));
        if let Some(entry) = on_demand.next() {
            if on_demand.next().is_none() {
                return Some(entry);
            }
            return None;
        }

        // Last resort: a suffix match is trusted only when unique.
        let mut suffix = self
            .index
            .classes_by_fqn
            .values()
            .filter(|t| t.fqn == base || t.fqn.ends_with(&format!(".{base}")));
        match (suffix.next(), suffix.next()) {
            (Some(entry), None) => Some(entry),
            _ => None,
        }
    }
}
