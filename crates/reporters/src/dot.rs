//! Graphviz export of the assembled graph.
//!
//! Only the seven forward labels are rendered; the inverse directions
//! are derivable and would double every arrow.

use graph::{DependencyGraph, EdgeLabel, NodeKind};

fn forward(label: EdgeLabel) -> bool {
    matches!(
        label,
        EdgeLabel::ParentOf
            | EdgeLabel::BaseClassOf
            | EdgeLabel::Implements
            | EdgeLabel::Overrides
            | EdgeLabel::Calls
            | EdgeLabel::Instantiates
            | EdgeLabel::Uses
    )
}

/// DOT node ids cannot carry the punctuation canonical ids use.
fn escape_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

fn label_of(node: &graph::Node) -> String {
    let kind = match node.kind() {
        NodeKind::Module => "Module",
        NodeKind::Class => "Class",
        NodeKind::Interface => "Interface",
        NodeKind::Method => "Method",
        NodeKind::Constructor => "Constructor",
        NodeKind::Field => "Field",
    };
    let name = node
        .id
        .split_once(':')
        .map(|(_, rest)| rest)
        .unwrap_or(&node.id);
    format!("{kind}: {name}")
}

pub fn to_dot(graph: &DependencyGraph) -> String {
    let mut out = String::from("digraph dep {\n");
    out.push_str("    node [shape=box style=filled fillcolor=\"#cfe8f3\"];\n");
    for node in graph.nodes() {
        out.push_str(&format!(
            "    {} [label=\"{}\"];\n",
            escape_id(&node.id),
            label_of(node).replace('"', "\\\"")
        ));
    }
    for edge in graph.edges().filter(|e| forward(e.label)) {
        out.push_str(&format!(
            "    {} -> {} [label=\"{:?}\"];\n",
            escape_id(&edge.src),
            escape_id(&edge.dst),
            edge.label
        ));
    }
    out.push('}');
    out
}
