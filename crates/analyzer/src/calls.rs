//! Call and instantiation stage.
//!
//! Walks the recorded body statements of every method and constructor,
//! types each receiver and argument against the visible scope (locals
//! declared before the site, fields of the enclosing type and its
//! supertypes, imports, same package), and resolves the target through
//! the index with superclass/interface climbing. Resolved virtual calls
//! are widened to every transitive overrider of the target — the CHA
//! over-approximation downstream consumers are told to expect.
//!
//! Overload selection is exact-match only: when an argument cannot be
//! typed, a single unresolved edge is recorded instead of a guess.

use crate::hierarchy::Hierarchy;
use crate::index::SymbolIndex;
use crate::scope::{strip_arrays, TypeResolver};
use graph::{class_id, method_id, Diagnostic, DependencyGraph, EdgeLabel};
use parsers::{ArgSketch, FileSummary, StmtKind, StmtRecord, TypeKind};
use std::collections::BTreeMap;

pub fn resolve(
    files: &[FileSummary],
    index: &SymbolIndex,
    hierarchy: &Hierarchy,
    graph: &mut DependencyGraph,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let resolver = TypeResolver::new(index);
    for file in files {
        let mut groups: BTreeMap<&str, Vec<&StmtRecord>> = BTreeMap::new();
        for st in &file.stmts {
            groups.entry(st.owner.as_str()).or_default().push(st);
        }
        for (owner_id, mut stmts) in groups {
            stmts.sort_by_key(|st| st.start_byte);
            let owner_fqn = stmts[0].owner_fqn.as_str();
            let ctx = CallCtx {
                index,
                hierarchy,
                resolver: &resolver,
                file,
                owner_id,
                owner_fqn,
            };
            // Parameters of the enclosing member are in scope from the
            // first byte of the body.
            let mut locals: Vec<(usize, &str, &str)> = owner_params(file, owner_id);
            for st in stmts {
                match &st.kind {
                    StmtKind::Local {
                        name,
                        declared_type,
                    } => locals.push((st.start_byte, name.as_str(), declared_type.as_str())),
                    StmtKind::Call {
                        receiver,
                        name,
                        args,
                    } => ctx.resolve_call(
                        graph,
                        diagnostics,
                        &locals,
                        st.start_byte,
                        receiver.as_deref(),
                        name,
                        args,
                    ),
                    StmtKind::New { type_name, args } => {
                        ctx.resolve_new(graph, diagnostics, &locals, st.start_byte, type_name, args)
                    }
                }
            }
        }
    }
}

fn owner_params<'a>(file: &'a FileSummary, owner_id: &str) -> Vec<(usize, &'a str, &'a str)> {
    let params = file
        .methods
        .iter()
        .find(|m| m.node_id == owner_id)
        .map(|m| &m.params)
        .or_else(|| {
            file.constructors
                .iter()
                .find(|c| c.node_id == owner_id)
                .map(|c| &c.params)
        });
    params
        .map(|ps| {
            ps.iter()
                .map(|p| (0usize, p.name.as_str(), p.ty.as_str()))
                .collect()
        })
        .unwrap_or_default()
}

struct CallCtx<'a> {
    index: &'a SymbolIndex,
    hierarchy: &'a Hierarchy,
    resolver: &'a TypeResolver<'a>,
    file: &'a FileSummary,
    owner_id: &'a str,
    owner_fqn: &'a str,
}

impl<'a> CallCtx<'a> {
    /// Declared type of the most recent local named `name` visible at
    /// `at` — left-to-right, no flow analysis.
    fn local_type(&self, locals: &[(usize, &str, &str)], name: &str, at: usize) -> Option<String> {
        locals
            .iter()
            .rev()
            .find(|(pos, n, _)| *pos <= at && *n == name)
            .map(|(_, _, ty)| ty.to_string())
    }

    /// Declared type of a field named `name` on the enclosing type or
    /// any of its resolved superclasses.
    fn field_type(&self, name: &str) -> Option<String> {
        let owners =
            std::iter::once(self.owner_fqn.to_string()).chain(self.hierarchy.ancestors(self.owner_fqn));
        for owner in owners {
            if let Some(field) = self.index.field(&owner, name) {
                return Some(field.declared_type.clone());
            }
        }
        None
    }

    /// Resolves a declared-type text to an indexed FQN.
    fn type_fqn(&self, raw: &str) -> Option<String> {
        self.resolver
            .resolve(raw, self.file, Some(self.owner_fqn))
            .map(|e| e.fqn.clone())
    }

    /// Types the receiver of an invocation. `Err` carries the best-guess
    /// owner text for the synthetic id.
    fn receiver_fqn(
        &self,
        locals: &[(usize, &str, &str)],
        at: usize,
        receiver: Option<&str>,
    ) -> Result<String, String> {
        let recv = match receiver {
            None | Some("this") => return Ok(self.owner_fqn.to_string()),
            Some("super") => {
                return self
                    .hierarchy
                    .parents
                    .get(self.owner_fqn)
                    .cloned()
                    .ok_or_else(|| "super".to_string());
            }
            Some(r) => r,
        };
        let bare = recv.strip_prefix("this.").unwrap_or(recv);
        if !bare.contains('.') && !bare.contains('(') {
            if recv.starts_with("this.") {
                // Only a field can sit behind an explicit `this.`.
                let raw = self.field_type(bare).ok_or_else(|| bare.to_string())?;
                return self
                    .type_fqn(strip_arrays(&raw))
                    .ok_or_else(|| strip_arrays(&raw).to_string());
            }
            if let Some(raw) = self.local_type(locals, bare, at) {
                return self
                    .type_fqn(strip_arrays(&raw))
                    .ok_or_else(|| strip_arrays(&raw).to_string());
            }
            if let Some(raw) = self.field_type(bare) {
                return self
                    .type_fqn(strip_arrays(&raw))
                    .ok_or_else(|| strip_arrays(&raw).to_string());
            }
        }
        // A type name: static call, possibly qualified.
        self.type_fqn(bare).ok_or_else(|| bare.to_string())
    }

    /// Types one argument expression, or `None` when unknown.
    fn arg_type(&self, locals: &[(usize, &str, &str)], at: usize, arg: &ArgSketch) -> Option<String> {
        match arg {
            ArgSketch::Typed(t) => Some(t.clone()),
            ArgSketch::New(t) => Some(t.clone()),
            ArgSketch::This => self
                .index
                .type_of(self.owner_fqn)
                .map(|e| e.simple_name.clone()),
            ArgSketch::Ident(name) => self
                .local_type(locals, name, at)
                .or_else(|| self.field_type(name)),
            ArgSketch::Opaque => None,
        }
    }

    fn argument_signature(
        &self,
        locals: &[(usize, &str, &str)],
        at: usize,
        args: &[ArgSketch],
    ) -> Option<String> {
        let types: Option<Vec<String>> = args
            .iter()
            .map(|a| self.arg_type(locals, at, a))
            .collect();
        types.map(|t| t.join(","))
    }

    /// Looks up `(owner, name, sig)` climbing the superclass chain and
    /// then the interface closure.
    fn find_method(&self, owner: &str, name: &str, sig: &str) -> Option<&'a crate::index::MethodEntry> {
        for candidate in std::iter::once(owner.to_string()).chain(self.hierarchy.ancestors(owner)) {
            if let Some(m) = self.index.method(&candidate, name, sig) {
                return Some(m);
            }
        }
        for iface in self.hierarchy.interface_closure(owner) {
            if let Some(m) = self.index.method(&iface, name, sig) {
                return Some(m);
            }
        }
        None
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_call(
        &self,
        graph: &mut DependencyGraph,
        diagnostics: &mut Vec<Diagnostic>,
        locals: &[(usize, &str, &str)],
        at: usize,
        receiver: Option<&str>,
        name: &str,
        args: &[ArgSketch],
    ) {
        let recv_fqn = match self.receiver_fqn(locals, at, receiver) {
            Ok(fqn) => fqn,
            Err(guess) => {
                self.unresolved_call(graph, diagnostics, &guess, name);
                return;
            }
        };
        let Some(sig) = self.argument_signature(locals, at, args) else {
            self.unresolved_call(graph, diagnostics, &recv_fqn, name);
            return;
        };
        match self.find_method(&recv_fqn, name, &sig) {
            Some(callee) => {
                graph.relate(self.owner_id, EdgeLabel::Calls, &callee.node_id, true);
                // Virtual dispatch approximation: the call may land in
                // any overrider of the resolved target.
                for target in self.hierarchy.dispatch_targets(&callee.node_id) {
                    graph.relate(self.owner_id, EdgeLabel::Calls, &target, true);
                }
            }
            None => self.unresolved_call(graph, diagnostics, &recv_fqn, name),
        }
    }

    fn unresolved_call(
        &self,
        graph: &mut DependencyGraph,
        diagnostics: &mut Vec<Diagnostic>,
        owner_guess: &str,
        name: &str,
    ) {
        let dst = method_id(owner_guess, name, "?");
        graph.relate(self.owner_id, EdgeLabel::Calls, &dst, false);
        diagnostics.push(Diagnostic::UnresolvedReference {
            src: self.owner_id.to_string(),
            name: format!("{owner_guess}.{name}"),
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_new(
        &self,
        graph: &mut DependencyGraph,
        diagnostics: &mut Vec<Diagnostic>,
        locals: &[(usize, &str, &str)],
        at: usize,
        type_name: &str,
        args: &[ArgSketch],
    ) {
        let Some(entry) = self.resolver.resolve(type_name, self.file, Some(self.owner_fqn))
        else {
            graph.relate(
                self.owner_id,
                EdgeLabel::Instantiates,
                &class_id(strip_arrays(type_name)),
                false,
            );
            diagnostics.push(Diagnostic::UnresolvedReference {
                src: self.owner_id.to_string(),
                name: type_name.to_string(),
            });
            return;
        };
        if entry.kind == TypeKind::Interface {
            // Anonymous implementation; there is no constructor to pick.
            graph.relate(self.owner_id, EdgeLabel::Instantiates, &entry.node_id, false);
            return;
        }
        let ctor = self
            .argument_signature(locals, at, args)
            .and_then(|sig| self.index.ctor(&entry.fqn, &sig));
        match ctor {
            Some(ctor) => {
                graph.relate(self.owner_id, EdgeLabel::Instantiates, &ctor.node_id, true)
            }
            // Constructor selection failed: fall back to the class node.
            None => graph.relate(self.owner_id, EdgeLabel::Instantiates, &entry.node_id, false),
        }
    }
}
