//! Per-file extraction records.
//!
//! A [`FileSummary`] is everything the resolution stages need to know
//! about one compilation unit. Summaries are plain serde data so they
//! can be cached between runs and dumped for inspection.

use graph::{LineRange, Param};
use serde::{Deserialize, Serialize};

/// Byte-exact location of a declaration plus its verbatim source slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start_byte: usize,
    pub end_byte: usize,
    pub line_range: LineRange,
    pub source_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Dotted path as written, without the trailing `.*`.
    pub path: String,
    pub on_demand: bool,
    pub is_static: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub node_id: String,
    pub kind: TypeKind,
    pub simple_name: String,
    pub fqn: String,
    /// Raw supertype names as written (erased). Classes have at most
    /// one entry; interfaces may extend several.
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    pub modifiers: Vec<String>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub node_id: String,
    pub owner_fqn: String,
    pub simple_name: String,
    pub return_type: String,
    pub params: Vec<Param>,
    /// Canonical erased parameter-type list, comma-joined.
    pub signature: String,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_private: bool,
    pub modifiers: Vec<String>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtorDecl {
    pub node_id: String,
    pub owner_fqn: String,
    pub params: Vec<Param>,
    pub signature: String,
    pub modifiers: Vec<String>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub node_id: String,
    pub owner_fqn: String,
    pub simple_name: String,
    pub declared_type: String,
    pub modifiers: Vec<String>,
    pub span: SourceSpan,
}

/// Shallow classification of an argument expression, enough to type the
/// common cases without expression-level inference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgSketch {
    /// A bare identifier (or `this.x` field read), typed via scope.
    Ident(String),
    /// An expression with a syntactically known type: literals, casts.
    Typed(String),
    /// `new T(...)` — typed as `T`.
    New(String),
    This,
    /// Anything the extractor cannot type; forces the call unresolved.
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StmtKind {
    Local {
        name: String,
        declared_type: String,
    },
    New {
        type_name: String,
        args: Vec<ArgSketch>,
    },
    Call {
        receiver: Option<String>,
        name: String,
        args: Vec<ArgSketch>,
    },
}

/// One body-level statement of interest, attributed to the node id of
/// the enclosing method, constructor or (for initializers) type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StmtRecord {
    pub owner: String,
    pub owner_fqn: String,
    pub start_byte: usize,
    #[serde(flatten)]
    pub kind: StmtKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub file_path: String,
    pub package: String,
    pub package_span: Option<SourceSpan>,
    pub imports: Vec<Import>,
    pub types: Vec<TypeDecl>,
    pub methods: Vec<MethodDecl>,
    pub constructors: Vec<CtorDecl>,
    pub fields: Vec<FieldDecl>,
    pub stmts: Vec<StmtRecord>,
    pub line_count: usize,
}
