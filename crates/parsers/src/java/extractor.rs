//! Single-pass symbol extraction over a parsed Java tree.
//!
//! Walks the compilation unit once and records the package, imports,
//! every type declaration (nested included, with dotted FQNs), members,
//! and the body statements the resolution stages consume. All spans are
//! byte ranges translated through [`LineIndex`]; source slices are
//! decoded per span so offsets stay byte-exact.

use crate::java::signature;
use crate::line_index::LineIndex;
use crate::summary::{
    ArgSketch, CtorDecl, FieldDecl, FileSummary, Import, MethodDecl, SourceSpan, StmtKind,
    StmtRecord, TypeDecl, TypeKind,
};
use graph::{class_id, constructor_id, field_id, interface_id, method_id, Param, DEFAULT_PACKAGE};
use tree_sitter::Node;

const MODIFIER_WORDS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "default",
    "synchronized",
    "native",
    "transient",
    "volatile",
    "strictfp",
    "sealed",
    "non-sealed",
];

pub fn extract(path: &str, bytes: &[u8], root: Node) -> FileSummary {
    let mut ex = Extractor {
        bytes,
        lines: LineIndex::new(bytes),
        summary: FileSummary {
            file_path: path.to_string(),
            package: DEFAULT_PACKAGE.to_string(),
            package_span: None,
            imports: Vec::new(),
            types: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            fields: Vec::new(),
            stmts: Vec::new(),
            line_count: 0,
        },
    };
    ex.summary.line_count = ex.lines.line_count();

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        match child.kind() {
            "package_declaration" => ex.record_package(child),
            "import_declaration" => ex.record_import(child),
            "class_declaration" | "interface_declaration" | "enum_declaration"
            | "record_declaration" => ex.collect_type(child, None),
            _ => {}
        }
    }
    ex.summary
}

struct Extractor<'a> {
    bytes: &'a [u8],
    lines: LineIndex,
    summary: FileSummary,
}

impl<'a> Extractor<'a> {
    fn text(&self, node: Node) -> &str {
        node.utf8_text(self.bytes).unwrap_or_default()
    }

    fn span(&self, node: Node) -> SourceSpan {
        let start = node.start_byte();
        let end = node.end_byte();
        SourceSpan {
            start_byte: start,
            end_byte: end,
            line_range: self.lines.range_of(start, end),
            source_code: String::from_utf8_lossy(&self.bytes[start..end]).into_owned(),
        }
    }

    fn record_package(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if matches!(child.kind(), "scoped_identifier" | "identifier") {
                self.summary.package = self.text(child).trim().to_string();
                self.summary.package_span = Some(self.span(node));
                return;
            }
        }
    }

    fn record_import(&mut self, node: Node) {
        let mut raw = self.text(node).trim_start_matches("import").trim();
        let is_static = raw.starts_with("static ");
        if is_static {
            raw = raw.trim_start_matches("static").trim();
        }
        let path = raw.trim_end_matches(';').trim();
        if path.is_empty() {
            return;
        }
        let on_demand = path.ends_with(".*");
        self.summary.imports.push(Import {
            path: path.trim_end_matches(".*").trim_end_matches('.').to_string(),
            on_demand,
            is_static,
        });
    }

    fn modifiers(&self, node: Node) -> Vec<String> {
        let mut out = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "modifiers" {
                let mut inner = child.walk();
                for tok in child.children(&mut inner) {
                    if MODIFIER_WORDS.contains(&tok.kind()) {
                        out.push(tok.kind().to_string());
                    }
                }
            }
        }
        out
    }

    /// Fully qualified name: package-qualified at the top level, dotted
    /// through the enclosing type for nested declarations.
    fn qualify(&self, outer: Option<&str>, simple: &str) -> String {
        match outer {
            Some(enclosing) => format!("{enclosing}.{simple}"),
            None if self.summary.package == DEFAULT_PACKAGE => simple.to_string(),
            None => format!("{}.{simple}", self.summary.package),
        }
    }

    fn collect_type(&mut self, node: Node, outer: Option<&str>) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let simple_name = self.text(name_node).to_string();
        let fqn = self.qualify(outer, &simple_name);
        let kind = if node.kind() == "interface_declaration" {
            TypeKind::Interface
        } else {
            TypeKind::Class
        };
        let mut modifiers = self.modifiers(node);
        match node.kind() {
            "enum_declaration" => modifiers.push("enum".to_string()),
            "record_declaration" => modifiers.push("record".to_string()),
            _ => {}
        }

        let mut extends = Vec::new();
        let mut implements = Vec::new();
        if kind == TypeKind::Interface {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if child.kind() == "extends_interfaces" {
                    extends.extend(self.type_list(child));
                }
            }
        } else {
            if let Some(superclass) = node.child_by_field_name("superclass") {
                let mut cursor = superclass.walk();
                for child in superclass.children(&mut cursor) {
                    if child.is_named() {
                        extends.push(signature::erase(self.text(child)));
                    }
                }
            }
            if let Some(interfaces) = node.child_by_field_name("interfaces") {
                implements.extend(self.type_list(interfaces));
            }
        }

        let node_id = match kind {
            TypeKind::Class => class_id(&fqn),
            TypeKind::Interface => interface_id(&fqn),
        };
        self.summary.types.push(TypeDecl {
            node_id: node_id.clone(),
            kind,
            simple_name,
            fqn: fqn.clone(),
            extends,
            implements,
            modifiers,
            span: self.span(node),
        });

        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        if body.kind() == "enum_body" {
            self.collect_enum_body(body, &fqn);
        } else {
            self.collect_members(body, &fqn, kind);
        }
    }

    fn type_list(&self, node: Node) -> Vec<String> {
        let mut out = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "type_list" => {
                    let mut inner = child.walk();
                    for ty in child.children(&mut inner) {
                        if ty.is_named() {
                            out.push(signature::erase(self.text(ty)));
                        }
                    }
                }
                "type_identifier" | "scoped_type_identifier" | "generic_type" => {
                    out.push(signature::erase(self.text(child)));
                }
                _ => {}
            }
        }
        out
    }

    fn collect_enum_body(&mut self, body: Node, fqn: &str) {
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            match child.kind() {
                "enum_constant" => {
                    if let Some(name_node) = child.child_by_field_name("name") {
                        let name = self.text(name_node).to_string();
                        let simple = fqn.rsplit('.').next().unwrap_or(fqn).to_string();
                        self.summary.fields.push(FieldDecl {
                            node_id: field_id(fqn, &name),
                            owner_fqn: fqn.to_string(),
                            simple_name: name,
                            declared_type: simple,
                            modifiers: vec!["static".to_string(), "final".to_string()],
                            span: self.span(child),
                        });
                    }
                }
                "enum_body_declarations" => self.collect_members(child, fqn, TypeKind::Class),
                _ => {}
            }
        }
    }

    fn collect_members(&mut self, body: Node, fqn: &str, kind: TypeKind) {
        let mut explicit_ctors: Vec<String> = Vec::new();
        let mut initializers: Vec<Node> = Vec::new();

        let mut cursor = body.walk();
        for member in body.children(&mut cursor) {
            match member.kind() {
                "method_declaration" => self.collect_method(member, fqn),
                "constructor_declaration" => {
                    if let Some(id) = self.collect_ctor(member, fqn) {
                        explicit_ctors.push(id);
                    }
                }
                "field_declaration" => {
                    self.collect_fields(member, fqn);
                    let mut inner = member.walk();
                    for decl in member.children(&mut inner) {
                        if decl.kind() == "variable_declarator" {
                            if let Some(value) = decl.child_by_field_name("value") {
                                initializers.push(value);
                            }
                        }
                    }
                }
                "static_initializer" => {
                    let owner = type_node_id(kind, fqn);
                    self.collect_stmts(member, &owner, fqn);
                }
                "block" => initializers.push(member),
                "class_declaration" | "interface_declaration" | "enum_declaration"
                | "record_declaration" => self.collect_type(member, Some(fqn)),
                _ => {}
            }
        }

        // Field and instance initializers run inside <init>: attribute
        // them to the sole constructor (implicit when none is declared),
        // or to the type itself when the choice is ambiguous.
        let init_owner = match (kind, explicit_ctors.len()) {
            (TypeKind::Interface, _) => interface_id(fqn),
            (TypeKind::Class, 0) => constructor_id(fqn, ""),
            (TypeKind::Class, 1) => explicit_ctors[0].clone(),
            (TypeKind::Class, _) => class_id(fqn),
        };
        for value in initializers {
            self.collect_stmts(value, &init_owner, fqn);
        }
    }

    fn params(&self, node: Node) -> Vec<Param> {
        let Some(list) = node.child_by_field_name("parameters") else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut cursor = list.walk();
        for p in list.children(&mut cursor) {
            match p.kind() {
                "formal_parameter" => {
                    let ty = p
                        .child_by_field_name("type")
                        .map(|t| self.text(t).to_string())
                        .unwrap_or_default();
                    let mut ty = signature::param_type(&ty, false);
                    if p.child_by_field_name("dimensions").is_some() {
                        ty.push_str("[]");
                    }
                    let name = p
                        .child_by_field_name("name")
                        .map(|n| self.text(n).to_string())
                        .unwrap_or_default();
                    out.push(Param { name, ty });
                }
                "spread_parameter" => {
                    let mut ty = String::new();
                    let mut name = String::new();
                    let mut inner = p.walk();
                    for child in p.children(&mut inner) {
                        if child.kind() == "variable_declarator" {
                            if let Some(n) = child.child_by_field_name("name") {
                                name = self.text(n).to_string();
                            }
                        } else if child.is_named() {
                            ty = self.text(child).to_string();
                        }
                    }
                    out.push(Param {
                        name,
                        ty: signature::param_type(&ty, true),
                    });
                }
                _ => {}
            }
        }
        out
    }

    fn collect_method(&mut self, node: Node, fqn: &str) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let simple_name = self.text(name_node).to_string();
        let params = self.params(node);
        let sig = signature::canonical(&params);
        let node_id = method_id(fqn, &simple_name, &sig);
        let return_type = node
            .child_by_field_name("type")
            .map(|t| self.text(t).trim().to_string())
            .unwrap_or_else(|| "void".to_string());
        let modifiers = self.modifiers(node);
        let body = node.child_by_field_name("body");
        let is_static = modifiers.iter().any(|m| m == "static");
        let is_abstract = body.is_none() || modifiers.iter().any(|m| m == "abstract");
        let is_private = modifiers.iter().any(|m| m == "private");

        self.summary.methods.push(MethodDecl {
            node_id: node_id.clone(),
            owner_fqn: fqn.to_string(),
            simple_name,
            return_type,
            params,
            signature: sig,
            is_static,
            is_abstract,
            is_private,
            modifiers,
            span: self.span(node),
        });
        if let Some(body) = body {
            self.collect_stmts(body, &node_id, fqn);
        }
    }

    fn collect_ctor(&mut self, node: Node, fqn: &str) -> Option<String> {
        node.child_by_field_name("name")?;
        let params = self.params(node);
        let sig = signature::canonical(&params);
        let node_id = constructor_id(fqn, &sig);
        self.summary.constructors.push(CtorDecl {
            node_id: node_id.clone(),
            owner_fqn: fqn.to_string(),
            params,
            signature: sig,
            modifiers: self.modifiers(node),
            span: self.span(node),
        });
        if let Some(body) = node.child_by_field_name("body") {
            self.collect_stmts(body, &node_id, fqn);
        }
        Some(node_id)
    }

    fn collect_fields(&mut self, node: Node, fqn: &str) {
        let declared_type = node
            .child_by_field_name("type")
            .map(|t| self.text(t).trim().to_string())
            .unwrap_or_default();
        let modifiers = self.modifiers(node);
        let mut cursor = node.walk();
        for decl in node.children(&mut cursor) {
            if decl.kind() != "variable_declarator" {
                continue;
            }
            let Some(name_node) = decl.child_by_field_name("name") else {
                continue;
            };
            let name = self.text(name_node).to_string();
            self.summary.fields.push(FieldDecl {
                node_id: field_id(fqn, &name),
                owner_fqn: fqn.to_string(),
                simple_name: name,
                declared_type: declared_type.clone(),
                modifiers: modifiers.clone(),
                span: self.span(node),
            });
        }
    }

    fn collect_stmts(&mut self, node: Node, owner: &str, owner_fqn: &str) {
        match node.kind() {
            "local_variable_declaration" => {
                let declared_type = node
                    .child_by_field_name("type")
                    .map(|t| signature::erase(self.text(t)))
                    .unwrap_or_default();
                let mut cursor = node.walk();
                for decl in node.children(&mut cursor) {
                    if decl.kind() != "variable_declarator" {
                        continue;
                    }
                    if let Some(name_node) = decl.child_by_field_name("name") {
                        self.summary.stmts.push(StmtRecord {
                            owner: owner.to_string(),
                            owner_fqn: owner_fqn.to_string(),
                            start_byte: node.start_byte(),
                            kind: StmtKind::Local {
                                name: self.text(name_node).to_string(),
                                declared_type: declared_type.clone(),
                            },
                        });
                    }
                    if let Some(value) = decl.child_by_field_name("value") {
                        self.collect_stmts(value, owner, owner_fqn);
                    }
                }
                return;
            }
            "object_creation_expression" => {
                if let Some(type_node) = node.child_by_field_name("type") {
                    self.summary.stmts.push(StmtRecord {
                        owner: owner.to_string(),
                        owner_fqn: owner_fqn.to_string(),
                        start_byte: node.start_byte(),
                        kind: StmtKind::New {
                            type_name: signature::erase(self.text(type_node)),
                            args: self.arg_sketches(node),
                        },
                    });
                }
            }
            "method_invocation" => {
                if let Some(name_node) = node.child_by_field_name("name") {
                    let receiver = node
                        .child_by_field_name("object")
                        .map(|o| self.text(o).trim().to_string());
                    self.summary.stmts.push(StmtRecord {
                        owner: owner.to_string(),
                        owner_fqn: owner_fqn.to_string(),
                        start_byte: node.start_byte(),
                        kind: StmtKind::Call {
                            receiver,
                            name: self.text(name_node).to_string(),
                            args: self.arg_sketches(node),
                        },
                    });
                }
            }
            // Local type declarations own their statements; skip them
            // rather than mis-attribute their bodies to this member.
            "class_declaration" | "interface_declaration" | "enum_declaration"
            | "record_declaration" => return,
            _ => {}
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.collect_stmts(child, owner, owner_fqn);
        }
    }

    fn arg_sketches(&self, call: Node) -> Vec<ArgSketch> {
        let Some(args) = call.child_by_field_name("arguments") else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut cursor = args.walk();
        for arg in args.children(&mut cursor) {
            if arg.is_named() {
                out.push(self.classify_arg(arg));
            }
        }
        out
    }

    fn classify_arg(&self, node: Node) -> ArgSketch {
        match node.kind() {
            "identifier" => ArgSketch::Ident(self.text(node).to_string()),
            "field_access" => {
                let object_is_this = node
                    .child_by_field_name("object")
                    .map(|o| o.kind() == "this")
                    .unwrap_or(false);
                match node.child_by_field_name("field") {
                    Some(field) if object_is_this => {
                        ArgSketch::Ident(self.text(field).to_string())
                    }
                    _ => ArgSketch::Opaque,
                }
            }
            "string_literal" => ArgSketch::Typed("String".into()),
            "character_literal" => ArgSketch::Typed("char".into()),
            "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal" => {
                let text = self.text(node);
                if text.ends_with('l') || text.ends_with('L') {
                    ArgSketch::Typed("long".into())
                } else {
                    ArgSketch::Typed("int".into())
                }
            }
            "decimal_floating_point_literal" | "hex_floating_point_literal" => {
                let text = self.text(node);
                if text.ends_with('f') || text.ends_with('F') {
                    ArgSketch::Typed("float".into())
                } else {
                    ArgSketch::Typed("double".into())
                }
            }
            "true" | "false" => ArgSketch::Typed("boolean".into()),
            "this" => ArgSketch::This,
            "object_creation_expression" => match node.child_by_field_name("type") {
                Some(ty) => ArgSketch::New(signature::erase(self.text(ty))),
                None => ArgSketch::Opaque,
            },
            "cast_expression" => match node.child_by_field_name("type") {
                Some(ty) => ArgSketch::Typed(signature::erase(self.text(ty))),
                None => ArgSketch::Opaque,
            },
            "parenthesized_expression" => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    if child.is_named() {
                        return self.classify_arg(child);
                    }
                }
                ArgSketch::Opaque
            }
            _ => ArgSketch::Opaque,
        }
    }
}

fn type_node_id(kind: TypeKind, fqn: &str) -> String {
    match kind {
        TypeKind::Class => class_id(fqn),
        TypeKind::Interface => interface_id(fqn),
    }
}
