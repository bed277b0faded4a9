use super::*;
use serde_json::Value as JsonValue;

fn class_node(fqn: &str) -> Node {
    Node {
        id: class_id(fqn),
        payload: NodePayload::Class {
            simple_name: fqn.rsplit('.').next().unwrap_or(fqn).to_string(),
            fqn: fqn.to_string(),
            extends: None,
            implements: vec![],
            modifiers: vec!["public".into()],
        },
        file_path: "src/A.java".into(),
        line_range: LineRange(1, 3),
        source_code: "class A {}".into(),
    }
}

#[test]
fn every_label_has_a_distinct_inverse_and_round_trips() {
    let labels = [
        EdgeLabel::ParentOf,
        EdgeLabel::ChildOf,
        EdgeLabel::BaseClassOf,
        EdgeLabel::DerivedClassOf,
        EdgeLabel::Implements,
        EdgeLabel::ImplementedBy,
        EdgeLabel::Overrides,
        EdgeLabel::OverriddenBy,
        EdgeLabel::Calls,
        EdgeLabel::CalledBy,
        EdgeLabel::Instantiates,
        EdgeLabel::InstantiatedBy,
        EdgeLabel::Uses,
        EdgeLabel::UsedBy,
    ];
    for label in labels {
        assert_ne!(label, label.inverse());
        assert_eq!(label, label.inverse().inverse());
    }
}

#[test]
fn relate_emits_both_directions_with_one_flag() {
    let mut g = DependencyGraph::new();
    g.relate("class:a.A", EdgeLabel::BaseClassOf, "class:a.B", true);
    let edges: Vec<Edge> = g.edges().collect();
    assert_eq!(edges.len(), 2);
    assert!(edges.iter().any(|e| {
        e.src == "class:a.A" && e.label == EdgeLabel::BaseClassOf && e.dst == "class:a.B"
    }));
    assert!(edges.iter().any(|e| {
        e.src == "class:a.B" && e.label == EdgeLabel::DerivedClassOf && e.dst == "class:a.A"
    }));
    assert!(edges.iter().all(|e| e.resolved));
}

#[test]
fn duplicate_relations_are_dropped() {
    let mut g = DependencyGraph::new();
    g.relate("a", EdgeLabel::Calls, "b", true);
    g.relate("a", EdgeLabel::Calls, "b", true);
    g.relate("b", EdgeLabel::CalledBy, "a", true);
    assert_eq!(g.edge_count(), 2);
}

#[test]
fn first_node_wins_on_duplicate_id() {
    let mut g = DependencyGraph::new();
    let first = class_node("com.example.Foo");
    let mut second = class_node("com.example.Foo");
    second.file_path = "src/other/Foo.java".into();
    assert!(g.insert_node(first));
    assert!(!g.insert_node(second));
    assert_eq!(g.node_count(), 1);
    assert_eq!(
        g.node("class:com.example.Foo").unwrap().file_path,
        "src/A.java"
    );
}

#[test]
fn nodes_iterate_in_id_order() {
    let mut g = DependencyGraph::new();
    g.insert_node(class_node("z.Last"));
    g.insert_node(class_node("a.First"));
    let ids: Vec<&str> = g.nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["class:a.First", "class:z.Last"]);
}

#[test]
fn node_serialization_flattens_kind_fields() {
    let node = Node {
        id: method_id("com.example.Foo", "bar", "String,int"),
        payload: NodePayload::Method {
            simple_name: "bar".into(),
            owner_fqn: "com.example.Foo".into(),
            return_type: "void".into(),
            params: vec![
                Param {
                    name: "s".into(),
                    ty: "String".into(),
                },
                Param {
                    name: "n".into(),
                    ty: "int".into(),
                },
            ],
            signature: "String,int".into(),
            is_static: false,
            is_abstract: false,
            modifiers: vec!["public".into()],
        },
        file_path: "src/Foo.java".into(),
        line_range: LineRange(4, 6),
        source_code: "public void bar(String s, int n) {}".into(),
    };
    let v: JsonValue = serde_json::to_value(&node).unwrap();
    assert_eq!(v["id"], "method:com.example.Foo#bar(String,int)");
    assert_eq!(v["kind"], "method");
    assert_eq!(v["owner_fqn"], "com.example.Foo");
    assert_eq!(v["line_range"], serde_json::json!([4, 6]));
    assert_eq!(v["params"][0]["type"], "String");

    let back: Node = serde_json::from_value(v).unwrap();
    assert_eq!(back, node);
    assert_eq!(back.kind(), NodeKind::Method);
}

#[test]
fn edge_serialization_uses_label_names() {
    let edge = Edge {
        src: "method:a.A#run()".into(),
        label: EdgeLabel::Overrides,
        dst: "method:a.Base#run()".into(),
        resolved: true,
    };
    let v: JsonValue = serde_json::to_value(&edge).unwrap();
    assert_eq!(v["label"], "Overrides");
    assert_eq!(v["resolved"], true);
}

#[test]
fn canonical_ids() {
    assert_eq!(module_id(DEFAULT_PACKAGE), "module:<default>");
    assert_eq!(class_id("a.b.C"), "class:a.b.C");
    assert_eq!(interface_id("a.I"), "interface:a.I");
    assert_eq!(method_id("a.C", "m", ""), "method:a.C#m()");
    assert_eq!(
        constructor_id("a.C", "String"),
        "constructor:a.C::<init>(String)"
    );
    assert_eq!(field_id("a.C", "x"), "field:a.C#x");
}

#[test]
fn malformed_span_displays_bounds() {
    let err = MalformedSpan {
        file_path: "src/Foo.java".into(),
        line_range: LineRange(9, 4),
        line_count: 7,
    };
    let text = err.to_string();
    assert!(text.contains("src/Foo.java"));
    assert!(text.contains("[9, 4]"));
}
