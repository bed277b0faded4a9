//! Syntactic stage: node birth and containment.
//!
//! Materializes one Module node per distinct package, one node per type
//! and member declaration, and the `ParentOf`/`ChildOf` containment
//! edges. Nested types hang off their module, not their outer type, so
//! containment stays a forest. Nodes are immutable after this stage.

use crate::index::SymbolIndex;
use crate::scope::TypeResolver;
use anyhow::Result;
use graph::{
    class_id, module_id, Diagnostic, DependencyGraph, EdgeLabel, LineRange, MalformedSpan, Node,
    NodePayload,
};
use parsers::{FileSummary, SourceSpan, TypeKind};

pub fn populate(
    files: &[FileSummary],
    index: &SymbolIndex,
    graph: &mut DependencyGraph,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<()> {
    let resolver = TypeResolver::new(index);
    for file in files {
        check_spans(file)?;
        let mid = module_id(&file.package);
        if !graph.contains_node(&mid) {
            graph.insert_node(module_node(&mid, file));
        }

        for t in &file.types {
            let payload = type_payload(t, file, &resolver);
            insert(
                graph,
                diagnostics,
                Node {
                    id: t.node_id.clone(),
                    payload,
                    file_path: file.file_path.clone(),
                    line_range: t.span.line_range,
                    source_code: t.span.source_code.clone(),
                },
            );
            graph.relate(&mid, EdgeLabel::ParentOf, &t.node_id, true);
        }

        for m in &file.methods {
            let owner = owner_node_id(index, &m.owner_fqn);
            insert(
                graph,
                diagnostics,
                Node {
                    id: m.node_id.clone(),
                    payload: NodePayload::Method {
                        simple_name: m.simple_name.clone(),
                        owner_fqn: m.owner_fqn.clone(),
                        return_type: m.return_type.clone(),
                        params: m.params.clone(),
                        signature: m.signature.clone(),
                        is_static: m.is_static,
                        is_abstract: m.is_abstract,
                        modifiers: m.modifiers.clone(),
                    },
                    file_path: file.file_path.clone(),
                    line_range: m.span.line_range,
                    source_code: m.span.source_code.clone(),
                },
            );
            graph.relate(&owner, EdgeLabel::ParentOf, &m.node_id, true);
        }

        for c in &file.constructors {
            let owner = owner_node_id(index, &c.owner_fqn);
            insert(
                graph,
                diagnostics,
                Node {
                    id: c.node_id.clone(),
                    payload: NodePayload::Constructor {
                        owner_fqn: c.owner_fqn.clone(),
                        params: c.params.clone(),
                        signature: c.signature.clone(),
                        modifiers: c.modifiers.clone(),
                    },
                    file_path: file.file_path.clone(),
                    line_range: c.span.line_range,
                    source_code: c.span.source_code.clone(),
                },
            );
            graph.relate(&owner, EdgeLabel::ParentOf, &c.node_id, true);
        }

        for f in &file.fields {
            let owner = owner_node_id(index, &f.owner_fqn);
            insert(
                graph,
                diagnostics,
                Node {
                    id: f.node_id.clone(),
                    payload: NodePayload::Field {
                        owner_fqn: f.owner_fqn.clone(),
                        simple_name: f.simple_name.clone(),
                        declared_type: f.declared_type.clone(),
                        modifiers: f.modifiers.clone(),
                    },
                    file_path: file.file_path.clone(),
                    line_range: f.span.line_range,
                    source_code: f.span.source_code.clone(),
                },
            );
            graph.relate(&owner, EdgeLabel::ParentOf, &f.node_id, true);
        }

        // Implicit default constructors, anchored to the class header.
        for t in &file.types {
            let Some(ctor) = index.ctor(&t.fqn, "") else {
                continue;
            };
            if !ctor.implicit || graph.contains_node(&ctor.node_id) {
                continue;
            }
            let header = t
                .span
                .source_code
                .lines()
                .next()
                .unwrap_or_default()
                .to_string();
            insert(
                graph,
                diagnostics,
                Node {
                    id: ctor.node_id.clone(),
                    payload: NodePayload::Constructor {
                        owner_fqn: t.fqn.clone(),
                        params: Vec::new(),
                        signature: String::new(),
                        modifiers: Vec::new(),
                    },
                    file_path: file.file_path.clone(),
                    line_range: LineRange(t.span.line_range.start(), t.span.line_range.start()),
                    source_code: header,
                },
            );
            graph.relate(&t.node_id, EdgeLabel::ParentOf, &ctor.node_id, true);
        }
    }
    Ok(())
}

fn insert(graph: &mut DependencyGraph, diagnostics: &mut Vec<Diagnostic>, node: Node) {
    let id = node.id.clone();
    let file_path = node.file_path.clone();
    let line = node.line_range.start();
    if !graph.insert_node(node) {
        diagnostics.push(Diagnostic::DuplicateSymbol {
            id,
            file_path,
            line,
        });
    }
}

fn module_node(id: &str, file: &FileSummary) -> Node {
    let (line_range, source_code) = match &file.package_span {
        Some(span) => (span.line_range, span.source_code.clone()),
        None => (LineRange(1, 1), String::new()),
    };
    Node {
        id: id.to_string(),
        payload: NodePayload::Module {
            package_name: file.package.clone(),
        },
        file_path: file.file_path.clone(),
        line_range,
        source_code,
    }
}

/// Resolves declared supertype names for the node attributes; the raw
/// identifier is kept when resolution fails.
fn type_payload(
    t: &parsers::TypeDecl,
    file: &FileSummary,
    resolver: &TypeResolver<'_>,
) -> NodePayload {
    let qualify = |raw: &String| {
        resolver
            .resolve(raw, file, Some(&t.fqn))
            .map(|e| e.fqn.clone())
            .unwrap_or_else(|| raw.clone())
    };
    match t.kind {
        TypeKind::Class => NodePayload::Class {
            simple_name: t.simple_name.clone(),
            fqn: t.fqn.clone(),
            extends: t.extends.first().map(qualify),
            implements: t.implements.iter().map(qualify).collect(),
            modifiers: t.modifiers.clone(),
        },
        TypeKind::Interface => NodePayload::Interface {
            simple_name: t.simple_name.clone(),
            fqn: t.fqn.clone(),
            extends: t.extends.iter().map(qualify).collect(),
            modifiers: t.modifiers.clone(),
        },
    }
}

fn owner_node_id(index: &SymbolIndex, owner_fqn: &str) -> String {
    index
        .type_of(owner_fqn)
        .map(|t| t.node_id.clone())
        .unwrap_or_else(|| class_id(owner_fqn))
}

fn check_spans(file: &FileSummary) -> Result<(), MalformedSpan> {
    let spans = file
        .package_span
        .iter()
        .chain(file.types.iter().map(|t| &t.span))
        .chain(file.methods.iter().map(|m| &m.span))
        .chain(file.constructors.iter().map(|c| &c.span))
        .chain(file.fields.iter().map(|f| &f.span));
    for span in spans {
        check_span(span, file)?;
    }
    Ok(())
}

fn check_span(span: &SourceSpan, file: &FileSummary) -> Result<(), MalformedSpan> {
    let LineRange(start, end) = span.line_range;
    if start == 0 || start > end || end > file.line_count {
        return Err(MalformedSpan {
            file_path: file.file_path.clone(),
            line_range: span.line_range,
            line_count: file.line_count,
        });
    }
    Ok(())
}
