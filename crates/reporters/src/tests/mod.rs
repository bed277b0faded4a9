use super::*;
use analyzer::analyze;
use parsers::{parse_java, FileSummary, Parsed};
use serde_json::Value as JsonValue;

fn sample() -> (graph::DependencyGraph, analyzer::SymbolIndex) {
    let sources = [
        (
            "src/Foo.java",
            "package com.example;\nclass Foo {\n    void bar() {}\n}\n",
        ),
        ("src/Baz.java", "package com.example;\nclass Baz {}\n"),
    ];
    let files: Vec<FileSummary> = sources
        .iter()
        .map(|(p, s)| match parse_java(p, s.as_bytes()).unwrap() {
            Parsed::Summary(s) => s,
            Parsed::Failed { detail } => panic!("{detail}"),
        })
        .collect();
    let analysis = analyze(&files).unwrap();
    (analysis.graph, analysis.index)
}

#[test]
fn nodes_stream_is_one_object_per_line_in_id_order() {
    let (graph, _) = sample();
    let mut buf = Vec::new();
    write_nodes(&mut buf, &graph).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let ids: Vec<String> = text
        .lines()
        .map(|line| {
            let v: JsonValue = serde_json::from_str(line).expect("valid json per line");
            v["id"].as_str().unwrap().to_string()
        })
        .collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert!(ids.contains(&"class:com.example.Foo".to_string()));
    assert!(ids.contains(&"method:com.example.Foo#bar()".to_string()));
}

#[test]
fn edges_stream_carries_label_and_resolved() {
    let (graph, _) = sample();
    let mut buf = Vec::new();
    write_edges(&mut buf, &graph).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let mut saw_parent_of = false;
    for line in text.lines() {
        let v: JsonValue = serde_json::from_str(line).unwrap();
        assert!(v["src"].is_string());
        assert!(v["label"].is_string());
        assert!(v["dst"].is_string());
        assert!(v["resolved"].is_boolean());
        if v["label"] == "ParentOf" {
            saw_parent_of = true;
        }
    }
    assert!(saw_parent_of);
}

#[test]
fn streams_are_reproducible() {
    let (graph, _) = sample();
    let mut first = Vec::new();
    let mut second = Vec::new();
    write_nodes(&mut first, &graph).unwrap();
    write_nodes(&mut second, &graph).unwrap();
    assert_eq!(first, second);
}

#[test]
fn symbol_tables_mirror_the_index() {
    let (_, index) = sample();
    let mut buf = Vec::new();
    write_symbol_tables(&mut buf, &index).unwrap();
    let v: JsonValue = serde_json::from_slice(&buf).unwrap();
    assert!(v["classes_by_fqn"]["com.example.Foo"]["node_id"]
        .as_str()
        .unwrap()
        .starts_with("class:"));
    assert!(v["methods_by_owner_sig"]["com.example.Foo#bar()"].is_object());
}

#[test]
fn dot_renders_forward_edges_only() {
    let (graph, _) = sample();
    let dot = to_dot(&graph);
    assert!(dot.starts_with("digraph dep {"));
    assert!(dot.contains("label=\"ParentOf\""));
    assert!(!dot.contains("label=\"ChildOf\""));
    assert!(dot.contains("Class: com.example.Foo"));
}
