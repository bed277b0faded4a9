//! Graph assembler: buffers nodes and edges, enforces uniqueness and
//! emits the inverse of every recorded relation.

use crate::{Edge, EdgeLabel, Node};
use std::collections::BTreeMap;

/// The assembled dependency graph.
///
/// Nodes are keyed by canonical id, edges by `(src, label, dst)`; both
/// maps are ordered so iteration — and therefore every emitted stream —
/// is deterministic for a given input. The assembler performs no I/O.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    nodes: BTreeMap<String, Node>,
    edges: BTreeMap<(String, EdgeLabel, String), bool>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node. Returns `false` if a node with the same id is
    /// already present; the existing node is kept untouched.
    pub fn insert_node(&mut self, node: Node) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        self.nodes.insert(node.id.clone(), node);
        true
    }

    /// Records a relation and its inverse. Duplicate `(src, label, dst)`
    /// triples are dropped; the first recording wins.
    pub fn relate(&mut self, src: &str, label: EdgeLabel, dst: &str, resolved: bool) {
        self.edges
            .entry((src.to_string(), label, dst.to_string()))
            .or_insert(resolved);
        self.edges
            .entry((dst.to_string(), label.inverse(), src.to_string()))
            .or_insert(resolved);
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Edges in `(src, label, dst)` order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().map(|((src, label, dst), resolved)| Edge {
            src: src.clone(),
            label: *label,
            dst: dst.clone(),
            resolved: *resolved,
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
