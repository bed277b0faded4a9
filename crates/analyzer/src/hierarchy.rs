//! Hierarchy stage: class hierarchy analysis, interface conformance and
//! the override relation.
//!
//! Resolves `extends`/`implements` clauses against the frozen index and
//! emits `BaseClassOf`/`DerivedClassOf` and `Implements`/`ImplementedBy`
//! edges. Interface-extends-interface is recorded uniformly as
//! `Implements`. The override table built here is what call resolution
//! later uses to widen virtual dispatch.

use crate::index::SymbolIndex;
use crate::scope::TypeResolver;
use graph::{class_id, interface_id, Diagnostic, DependencyGraph, EdgeLabel};
use parsers::{FileSummary, TypeKind};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

#[derive(Debug, Default)]
pub struct Hierarchy {
    /// Resolved superclass per class FQN.
    pub parents: BTreeMap<String, String>,
    /// Directly implemented (or extended) interface FQNs per type FQN.
    pub interfaces: BTreeMap<String, Vec<String>>,
    /// Method node id → node ids of every method it overrides.
    pub overrides: BTreeMap<String, Vec<String>>,
    /// Inverse of `overrides`.
    pub overridden_by: BTreeMap<String, Vec<String>>,
}

impl Hierarchy {
    /// Superclass chain of `fqn`, nearest first. Cycle-safe.
    pub fn ancestors(&self, fqn: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut seen = BTreeSet::new();
        let mut current = fqn.to_string();
        while let Some(parent) = self.parents.get(&current) {
            if !seen.insert(parent.clone()) {
                break;
            }
            out.push(parent.clone());
            current = parent.clone();
        }
        out
    }

    /// Every interface `fqn` conforms to, directly or transitively,
    /// including those inherited through the superclass chain.
    pub fn interface_closure(&self, fqn: &str) -> Vec<String> {
        let mut queue: VecDeque<String> = VecDeque::new();
        for owner in std::iter::once(fqn.to_string()).chain(self.ancestors(fqn)) {
            if let Some(direct) = self.interfaces.get(&owner) {
                queue.extend(direct.iter().cloned());
            }
        }
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        while let Some(iface) = queue.pop_front() {
            if !seen.insert(iface.clone()) {
                continue;
            }
            if let Some(supers) = self.interfaces.get(&iface) {
                queue.extend(supers.iter().cloned());
            }
            out.push(iface);
        }
        out
    }

    /// Transitive overriders of a method: the CHA widening set for a
    /// virtual call on it.
    pub fn dispatch_targets(&self, callee: &str) -> Vec<String> {
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(callee);
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        while let Some(id) = queue.pop_front() {
            if let Some(overriders) = self.overridden_by.get(id) {
                for m in overriders {
                    if seen.insert(m.clone()) {
                        out.push(m.clone());
                        queue.push_back(m.as_str());
                    }
                }
            }
        }
        out
    }

    fn record_override(&mut self, method: &str, target: &str) {
        self.overrides
            .entry(method.to_string())
            .or_default()
            .push(target.to_string());
        self.overridden_by
            .entry(target.to_string())
            .or_default()
            .push(method.to_string());
    }
}

pub fn resolve(
    files: &[FileSummary],
    index: &SymbolIndex,
    graph: &mut DependencyGraph,
    diagnostics: &mut Vec<Diagnostic>,
) -> Hierarchy {
    let resolver = TypeResolver::new(index);
    let mut hierarchy = Hierarchy::default();

    // 3a, first half: the class hierarchy itself.
    for entry in index.classes_by_fqn.values() {
        let file = &files[entry.file];
        match entry.kind {
            TypeKind::Class => {
                if let Some(raw) = entry.extends.first() {
                    match resolver.resolve(raw, file, Some(&entry.fqn)) {
                        Some(parent) => {
                            if parent.kind == TypeKind::Class {
                                hierarchy
                                    .parents
                                    .insert(entry.fqn.clone(), parent.fqn.clone());
                            }
                            graph.relate(
                                &parent.node_id,
                                EdgeLabel::BaseClassOf,
                                &entry.node_id,
                                true,
                            );
                        }
                        None => {
                            graph.relate(
                                &class_id(raw),
                                EdgeLabel::BaseClassOf,
                                &entry.node_id,
                                false,
                            );
                            diagnostics.push(Diagnostic::UnresolvedReference {
                                src: entry.node_id.clone(),
                                name: raw.clone(),
                            });
                        }
                    }
                }
                for raw in &entry.implements {
                    relate_implements(
                        &resolver, graph, diagnostics, &mut hierarchy, entry, file, raw,
                    );
                }
            }
            TypeKind::Interface => {
                // An interface conforms to its super-interfaces; recorded
                // uniformly as Implements.
                for raw in &entry.extends {
                    relate_implements(
                        &resolver, graph, diagnostics, &mut hierarchy, entry, file, raw,
                    );
                }
            }
        }
    }

    // 3a, second half + 3b: the override relation.
    for method in index.methods_by_owner_sig.values() {
        if method.is_static || method.is_private {
            continue;
        }
        let Some(owner) = index.type_of(&method.owner_fqn) else {
            continue;
        };

        if owner.kind == TypeKind::Class {
            for ancestor in hierarchy.ancestors(&method.owner_fqn) {
                if let Some(target) =
                    index.method(&ancestor, &method.simple_name, &method.signature)
                {
                    if !target.is_static && !target.is_private {
                        graph.relate(&method.node_id, EdgeLabel::Overrides, &target.node_id, true);
                        hierarchy.record_override(&method.node_id, &target.node_id);
                        break;
                    }
                }
            }
        }

        // A concrete method can simultaneously satisfy several interface
        // contracts; emit an edge to every abstract match.
        if !method.is_abstract {
            for iface in hierarchy.interface_closure(&method.owner_fqn) {
                if let Some(target) = index.method(&iface, &method.simple_name, &method.signature)
                {
                    if target.is_abstract {
                        graph.relate(&method.node_id, EdgeLabel::Overrides, &target.node_id, true);
                        hierarchy.record_override(&method.node_id, &target.node_id);
                    }
                }
            }
        }
    }

    hierarchy
}

#[allow(clippy::too_many_arguments)]
fn relate_implements(
    resolver: &TypeResolver<'_>,
    graph: &mut DependencyGraph,
    diagnostics: &mut Vec<Diagnostic>,
    hierarchy: &mut Hierarchy,
    entry: &crate::index::TypeEntry,
    file: &FileSummary,
    raw: &str,
) {
    match resolver.resolve(raw, file, Some(&entry.fqn)) {
        Some(iface) => {
            hierarchy
                .interfaces
                .entry(entry.fqn.clone())
                .or_default()
                .push(iface.fqn.clone());
            graph.relate(&entry.node_id, EdgeLabel::Implements, &iface.node_id, true);
        }
        None => {
            graph.relate(&entry.node_id, EdgeLabel::Implements, &interface_id(raw), false);
            diagnostics.push(Diagnostic::UnresolvedReference {
                src: entry.node_id.clone(),
                name: raw.to_string(),
            });
        }
    }
}
