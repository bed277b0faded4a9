//! Schema for the Java dependency graph and its assembler.
//!
//! Nodes represent packages, types and members; edges represent the
//! relations among them, always stored together with their inverse.
//! Node and edge identity is carried by canonical id strings (see the
//! `*_id` helpers), so the graph never holds owning pointers between
//! node structures — ids are the linking currency and the assembler is
//! the dereferencing mechanism.

pub mod assembler;
pub mod diagnostics;
mod edge;

use serde::{Deserialize, Serialize};

pub use assembler::DependencyGraph;
pub use diagnostics::{Diagnostic, MalformedSpan};
pub use edge::{Edge, EdgeLabel};

/// Module node for compilation units that declare no package.
pub const DEFAULT_PACKAGE: &str = "<default>";

/// 1-indexed inclusive line span, serialized as `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange(pub usize, pub usize);

impl LineRange {
    pub fn start(&self) -> usize {
        self.0
    }

    pub fn end(&self) -> usize {
        self.1
    }
}

/// A method or constructor parameter: declared name plus declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Module,
    Class,
    Interface,
    Method,
    Constructor,
    Field,
}

/// Kind-specific node attributes. The serde `kind` tag plus the flattened
/// fields reproduce the published node schema exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodePayload {
    Module {
        package_name: String,
    },
    Class {
        simple_name: String,
        fqn: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        extends: Option<String>,
        implements: Vec<String>,
        modifiers: Vec<String>,
    },
    Interface {
        simple_name: String,
        fqn: String,
        extends: Vec<String>,
        modifiers: Vec<String>,
    },
    Method {
        simple_name: String,
        owner_fqn: String,
        return_type: String,
        params: Vec<Param>,
        signature: String,
        is_static: bool,
        is_abstract: bool,
        modifiers: Vec<String>,
    },
    Constructor {
        owner_fqn: String,
        params: Vec<Param>,
        signature: String,
        modifiers: Vec<String>,
    },
    Field {
        owner_fqn: String,
        simple_name: String,
        declared_type: String,
        modifiers: Vec<String>,
    },
}

/// A graph node. Immutable once inserted into the assembler: later
/// pipeline stages only add edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(flatten)]
    pub payload: NodePayload,
    pub file_path: String,
    pub line_range: LineRange,
    pub source_code: String,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self.payload {
            NodePayload::Module { .. } => NodeKind::Module,
            NodePayload::Class { .. } => NodeKind::Class,
            NodePayload::Interface { .. } => NodeKind::Interface,
            NodePayload::Method { .. } => NodeKind::Method,
            NodePayload::Constructor { .. } => NodeKind::Constructor,
            NodePayload::Field { .. } => NodeKind::Field,
        }
    }
}

pub fn module_id(package: &str) -> String {
    format!("module:{package}")
}

pub fn class_id(fqn: &str) -> String {
    format!("class:{fqn}")
}

pub fn interface_id(fqn: &str) -> String {
    format!("interface:{fqn}")
}

pub fn method_id(owner: &str, name: &str, signature: &str) -> String {
    format!("method:{owner}#{name}({signature})")
}

pub fn constructor_id(owner: &str, signature: &str) -> String {
    format!("constructor:{owner}::<init>({signature})")
}

pub fn field_id(owner: &str, name: &str) -> String {
    format!("field:{owner}#{name}")
}

#[cfg(test)]
mod tests;
