use crate::java::{parse_java, Parsed};
use crate::summary::{ArgSketch, FileSummary, StmtKind, TypeKind};
use graph::LineRange;

fn summarize(src: &str) -> FileSummary {
    match parse_java("src/Test.java", src.as_bytes()).unwrap() {
        Parsed::Summary(s) => s,
        Parsed::Failed { detail } => panic!("parse failed: {detail}"),
    }
}

#[test]
fn package_and_sentinel() {
    let with_pkg = summarize("package com.example.service;\nclass A {}\n");
    assert_eq!(with_pkg.package, "com.example.service");
    assert!(with_pkg.package_span.is_some());

    let without = summarize("class A {}\n");
    assert_eq!(without.package, "<default>");
    assert!(without.package_span.is_none());
    assert_eq!(without.types[0].fqn, "A");
}

#[test]
fn imports_single_and_on_demand() {
    let s = summarize(
        "package a;\nimport com.example.repo.UserRepository;\nimport com.example.util.*;\nimport static java.util.Objects.requireNonNull;\nclass A {}\n",
    );
    assert_eq!(s.imports.len(), 3);
    assert_eq!(s.imports[0].path, "com.example.repo.UserRepository");
    assert!(!s.imports[0].on_demand);
    assert_eq!(s.imports[1].path, "com.example.util");
    assert!(s.imports[1].on_demand);
    assert!(s.imports[2].is_static);
}

#[test]
fn class_with_extends_and_implements() {
    let s = summarize(
        "package a;\npublic abstract class B extends Base implements Runnable, Closeable {}\n",
    );
    let t = &s.types[0];
    assert_eq!(t.kind, TypeKind::Class);
    assert_eq!(t.fqn, "a.B");
    assert_eq!(t.extends, vec!["Base"]);
    assert_eq!(t.implements, vec!["Runnable", "Closeable"]);
    assert!(t.modifiers.contains(&"public".to_string()));
    assert!(t.modifiers.contains(&"abstract".to_string()));
    assert_eq!(t.node_id, "class:a.B");
}

#[test]
fn interface_extends_list() {
    let s = summarize("package a;\ninterface I extends J, K {}\n");
    let t = &s.types[0];
    assert_eq!(t.kind, TypeKind::Interface);
    assert_eq!(t.extends, vec!["J", "K"]);
    assert_eq!(t.node_id, "interface:a.I");
}

#[test]
fn nested_types_get_dotted_fqns() {
    let s = summarize("package a;\nclass Outer {\n    static class Inner {\n        void go() {}\n    }\n}\n");
    let fqns: Vec<&str> = s.types.iter().map(|t| t.fqn.as_str()).collect();
    assert_eq!(fqns, vec!["a.Outer", "a.Outer.Inner"]);
    assert_eq!(s.methods[0].owner_fqn, "a.Outer.Inner");
    assert_eq!(s.methods[0].node_id, "method:a.Outer.Inner#go()");
}

#[test]
fn method_signature_erases_generics_and_varargs() {
    let s = summarize(
        "package a;\nclass A {\n    static java.util.List<String> f(Map<String, Integer> m, int[] xs, String... rest) { return null; }\n}\n",
    );
    let m = &s.methods[0];
    assert_eq!(m.signature, "Map,int[],String[]");
    assert_eq!(m.node_id, "method:a.A#f(Map,int[],String[])");
    assert!(m.is_static);
    assert!(!m.is_abstract);
    assert_eq!(m.params[2].ty, "String[]");
}

#[test]
fn interface_methods_without_bodies_are_abstract() {
    let s = summarize("package a;\ninterface I {\n    void run();\n    default void go() {}\n}\n");
    let run = s.methods.iter().find(|m| m.simple_name == "run").unwrap();
    let go = s.methods.iter().find(|m| m.simple_name == "go").unwrap();
    assert!(run.is_abstract);
    assert!(!go.is_abstract);
}

#[test]
fn multi_declarator_fields_split() {
    let s = summarize("package a;\nclass A {\n    private int x, y;\n    final String name = \"n\";\n}\n");
    let names: Vec<&str> = s.fields.iter().map(|f| f.simple_name.as_str()).collect();
    assert_eq!(names, vec!["x", "y", "name"]);
    assert_eq!(s.fields[0].declared_type, "int");
    assert!(s.fields[0].modifiers.contains(&"private".to_string()));
    assert_eq!(s.fields[2].node_id, "field:a.A#name");
}

#[test]
fn constructors_and_field_initializers() {
    let s = summarize(
        "package a;\nclass Service {\n    Repo repo = new Repo();\n    Service(String name) {\n        helper(name);\n    }\n}\n",
    );
    assert_eq!(s.constructors.len(), 1);
    let ctor = &s.constructors[0];
    assert_eq!(ctor.node_id, "constructor:a.Service::<init>(String)");

    // the field initializer's `new Repo()` is attributed to the sole ctor
    let init_new = s
        .stmts
        .iter()
        .find(|st| matches!(&st.kind, StmtKind::New { type_name, .. } if type_name == "Repo"))
        .unwrap();
    assert_eq!(init_new.owner, ctor.node_id);

    let call = s
        .stmts
        .iter()
        .find(|st| matches!(&st.kind, StmtKind::Call { name, .. } if name == "helper"))
        .unwrap();
    assert_eq!(call.owner, ctor.node_id);
}

#[test]
fn ctorless_class_attributes_initializers_to_implicit_init() {
    let s = summarize("package a;\nclass A {\n    Repo repo = new Repo();\n}\n");
    assert!(s.constructors.is_empty());
    let init_new = &s.stmts[0];
    assert_eq!(init_new.owner, "constructor:a.A::<init>()");
}

#[test]
fn calls_record_receiver_name_and_args() {
    let s = summarize(
        "package a;\nclass A {\n    void go(Repo repo) {\n        repo.save(\"x\", 3, this);\n        helper();\n    }\n}\n",
    );
    let save = s
        .stmts
        .iter()
        .find_map(|st| match &st.kind {
            StmtKind::Call {
                receiver,
                name,
                args,
            } if name == "save" => Some((receiver.clone(), args.clone())),
            _ => None,
        })
        .unwrap();
    assert_eq!(save.0.as_deref(), Some("repo"));
    assert_eq!(
        save.1,
        vec![
            ArgSketch::Typed("String".into()),
            ArgSketch::Typed("int".into()),
            ArgSketch::This,
        ]
    );

    let helper = s
        .stmts
        .iter()
        .find_map(|st| match &st.kind {
            StmtKind::Call { receiver, name, .. } if name == "helper" => Some(receiver.clone()),
            _ => None,
        })
        .unwrap();
    assert!(helper.is_none());
}

#[test]
fn locals_are_recorded_in_order_with_erased_types() {
    let s = summarize(
        "package a;\nclass A {\n    void go() {\n        List<User> users = load();\n        User u = users.get(0);\n    }\n}\n",
    );
    let locals: Vec<(String, String)> = s
        .stmts
        .iter()
        .filter_map(|st| match &st.kind {
            StmtKind::Local {
                name,
                declared_type,
            } => Some((name.clone(), declared_type.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        locals,
        vec![
            ("users".to_string(), "List".to_string()),
            ("u".to_string(), "User".to_string()),
        ]
    );
    let bytes: Vec<usize> = s.stmts.iter().map(|st| st.start_byte).collect();
    let mut sorted = bytes.clone();
    sorted.sort_unstable();
    assert_eq!(bytes.len(), s.stmts.len());
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn enums_become_classes_with_constant_fields() {
    let s = summarize(
        "package a;\nenum Color {\n    RED, GREEN;\n    void describe() {}\n}\n",
    );
    let t = &s.types[0];
    assert_eq!(t.kind, TypeKind::Class);
    assert!(t.modifiers.contains(&"enum".to_string()));
    let constants: Vec<&str> = s.fields.iter().map(|f| f.simple_name.as_str()).collect();
    assert_eq!(constants, vec!["RED", "GREEN"]);
    assert_eq!(s.fields[0].declared_type, "Color");
    assert_eq!(s.methods[0].owner_fqn, "a.Color");
}

#[test]
fn spans_are_one_indexed_and_verbatim() {
    let src = "package a;\nclass A {\n    void go() {}\n}\n";
    let s = summarize(src);
    let t = &s.types[0];
    assert_eq!(t.span.line_range, LineRange(2, 4));
    assert!(t.span.source_code.starts_with("class A"));
    let m = &s.methods[0];
    assert_eq!(m.span.line_range, LineRange(3, 3));
    assert_eq!(m.span.source_code, "void go() {}");
    assert_eq!(s.line_count, 4);
}

#[test]
fn syntax_errors_are_reported_not_fatal() {
    let parsed = parse_java("src/Broken.java", b"class {{{").unwrap();
    assert!(matches!(parsed, Parsed::Failed { .. }));
}
