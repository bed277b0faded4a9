//! Symbol index: the frozen lookup tables every resolution stage
//! consults.
//!
//! Method keys take the form `owner#name(sig)` and constructor keys
//! `owner(sig)`, so the index mirrors straight into the symbol-tables
//! document. Collisions keep the first declaration; the corresponding
//! `DuplicateSymbol` diagnostics are reported once, when the node
//! insertion is rejected during the syntactic stage.

use parsers::{FileSummary, TypeKind};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct TypeEntry {
    pub node_id: String,
    pub kind: TypeKind,
    pub package: String,
    pub simple_name: String,
    pub fqn: String,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    /// Index of the declaring file in the input sequence.
    #[serde(skip)]
    pub file: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodEntry {
    pub node_id: String,
    pub owner_fqn: String,
    pub simple_name: String,
    pub signature: String,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_private: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CtorEntry {
    pub node_id: String,
    pub owner_fqn: String,
    pub signature: String,
    /// True for the default constructor of a class that declares none.
    pub implicit: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldEntry {
    pub node_id: String,
    pub owner_fqn: String,
    pub simple_name: String,
    pub declared_type: String,
}

#[derive(Debug, Default, Serialize)]
pub struct SymbolIndex {
    pub classes_by_fqn: BTreeMap<String, TypeEntry>,
    pub methods_by_owner_sig: BTreeMap<String, MethodEntry>,
    pub ctors_by_owner_sig: BTreeMap<String, CtorEntry>,
    pub fields_by_owner: BTreeMap<String, Vec<FieldEntry>>,
}

impl SymbolIndex {
    pub fn method_key(owner: &str, name: &str, signature: &str) -> String {
        format!("{owner}#{name}({signature})")
    }

    pub fn ctor_key(owner: &str, signature: &str) -> String {
        format!("{owner}({signature})")
    }

    /// Aggregates extractor output into the lookup tables. First
    /// declaration wins on every key.
    pub fn build(files: &[FileSummary]) -> Self {
        let mut index = SymbolIndex::default();
        for (file_no, file) in files.iter().enumerate() {
            for t in &file.types {
                index
                    .classes_by_fqn
                    .entry(t.fqn.clone())
                    .or_insert_with(|| TypeEntry {
                        node_id: t.node_id.clone(),
                        kind: t.kind,
                        package: file.package.clone(),
                        simple_name: t.simple_name.clone(),
                        fqn: t.fqn.clone(),
                        extends: t.extends.clone(),
                        implements: t.implements.clone(),
                        file: file_no,
                    });
            }
            for m in &file.methods {
                index
                    .methods_by_owner_sig
                    .entry(Self::method_key(&m.owner_fqn, &m.simple_name, &m.signature))
                    .or_insert_with(|| MethodEntry {
                        node_id: m.node_id.clone(),
                        owner_fqn: m.owner_fqn.clone(),
                        simple_name: m.simple_name.clone(),
                        signature: m.signature.clone(),
                        is_static: m.is_static,
                        is_abstract: m.is_abstract,
                        is_private: m.is_private,
                    });
            }
            for c in &file.constructors {
                index
                    .ctors_by_owner_sig
                    .entry(Self::ctor_key(&c.owner_fqn, &c.signature))
                    .or_insert_with(|| CtorEntry {
                        node_id: c.node_id.clone(),
                        owner_fqn: c.owner_fqn.clone(),
                        signature: c.signature.clone(),
                        implicit: false,
                    });
            }
            for f in &file.fields {
                index
                    .fields_by_owner
                    .entry(f.owner_fqn.clone())
                    .or_default()
                    .push(FieldEntry {
                        node_id: f.node_id.clone(),
                        owner_fqn: f.owner_fqn.clone(),
                        simple_name: f.simple_name.clone(),
                        declared_type: f.declared_type.clone(),
                    });
            }
        }

        // Classes without a declared constructor still have one.
        let implicit: Vec<(String, String)> = index
            .classes_by_fqn
            .values()
            .filter(|t| t.kind == TypeKind::Class)
            .filter(|t| {
                !index
                    .ctors_by_owner_sig
                    .values()
                    .any(|c| c.owner_fqn == t.fqn)
            })
            .map(|t| (t.fqn.clone(), graph::constructor_id(&t.fqn, "")))
            .collect();
        for (fqn, node_id) in implicit {
            index.ctors_by_owner_sig.insert(
                Self::ctor_key(&fqn, ""),
                CtorEntry {
                    node_id,
                    owner_fqn: fqn,
                    signature: String::new(),
                    implicit: true,
                },
            );
        }
        index
    }

    pub fn type_of(&self, fqn: &str) -> Option<&TypeEntry> {
        self.classes_by_fqn.get(fqn)
    }

    pub fn method(&self, owner: &str, name: &str, signature: &str) -> Option<&MethodEntry> {
        self.methods_by_owner_sig
            .get(&Self::method_key(owner, name, signature))
    }

    pub fn ctor(&self, owner: &str, signature: &str) -> Option<&CtorEntry> {
        self.ctors_by_owner_sig.get(&Self::ctor_key(owner, signature))
    }

    pub fn field(&self, owner: &str, name: &str) -> Option<&FieldEntry> {
        self.fields_by_owner
            .get(owner)?
            .iter()
            .find(|f| f.simple_name == name)
    }
}
