//! Type-usage stage.
//!
//! Records which declared types each field, parameter, return type and
//! local variable depends on. Primitives never produce edges; a type
//! name that does not resolve still produces an edge with a synthetic
//! destination so downstream consumers see the dependency.

use crate::index::SymbolIndex;
use crate::scope::{is_primitive, strip_arrays, TypeResolver};
use graph::{class_id, DependencyGraph, EdgeLabel};
use parsers::java::signature;
use parsers::{FileSummary, StmtKind};

pub fn resolve(files: &[FileSummary], index: &SymbolIndex, graph: &mut DependencyGraph) {
    let resolver = TypeResolver::new(index);
    for file in files {
        for f in &file.fields {
            use_type(graph, &resolver, file, &f.node_id, &f.owner_fqn, &f.declared_type);
        }
        for m in &file.methods {
            for p in &m.params {
                use_type(graph, &resolver, file, &m.node_id, &m.owner_fqn, &p.ty);
            }
            use_type(graph, &resolver, file, &m.node_id, &m.owner_fqn, &m.return_type);
        }
        for c in &file.constructors {
            for p in &c.params {
                use_type(graph, &resolver, file, &c.node_id, &c.owner_fqn, &p.ty);
            }
        }
        for st in &file.stmts {
            if let StmtKind::Local { declared_type, .. } = &st.kind {
                use_type(graph, &resolver, file, &st.owner, &st.owner_fqn, declared_type);
            }
        }
    }
}

fn use_type(
    graph: &mut DependencyGraph,
    resolver: &TypeResolver<'_>,
    file: &FileSummary,
    src: &str,
    enclosing: &str,
    raw: &str,
) {
    let erased = signature::erase(raw);
    let base = strip_arrays(&erased);
    if base.is_empty() || is_primitive(base) {
        return;
    }
    match resolver.resolve(base, file, Some(enclosing)) {
        Some(entry) => graph.relate(src, EdgeLabel::Uses, &entry.node_id, true),
        None => graph.relate(src, EdgeLabel::Uses, &class_id(base), false),
    }
}
