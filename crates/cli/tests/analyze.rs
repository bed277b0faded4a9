use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_project(dir: &std::path::Path) {
    let pkg = dir.join("src/com/example");
    fs::create_dir_all(&pkg).unwrap();
    fs::write(
        pkg.join("Greeter.java"),
        "package com.example;\n\npublic class Greeter {\n    public String greet(String name) {\n        return name;\n    }\n}\n",
    )
    .unwrap();
    fs::write(
        pkg.join("Caller.java"),
        "package com.example;\n\npublic class Caller {\n    void go() {\n        Greeter g = new Greeter();\n        g.greet(\"hi\");\n    }\n}\n",
    )
    .unwrap();
}

#[test]
fn analyze_writes_streams_and_summary() {
    let project = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_project(project.path());

    Command::cargo_bin("javagraph")
        .unwrap()
        .arg("analyze")
        .arg(project.path())
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Edge counts:"))
        .stdout(predicate::str::contains("Calls"));

    let nodes = fs::read_to_string(out.path().join("nodes.jsonl")).unwrap();
    assert!(nodes.contains("\"id\":\"class:com.example.Greeter\""));
    assert!(nodes.contains("\"id\":\"method:com.example.Greeter#greet(String)\""));

    let edges = fs::read_to_string(out.path().join("edges.jsonl")).unwrap();
    assert!(edges.contains("\"label\":\"Calls\""));
    assert!(edges.contains("method:com.example.Greeter#greet(String)"));

    assert!(out.path().join("symbol_tables.json").exists());
    assert!(out.path().join("diagnostics.jsonl").exists());
}

#[test]
fn analyze_is_reproducible() {
    let project = TempDir::new().unwrap();
    write_project(project.path());
    let out1 = TempDir::new().unwrap();
    let out2 = TempDir::new().unwrap();

    for out in [&out1, &out2] {
        Command::cargo_bin("javagraph")
            .unwrap()
            .arg("analyze")
            .arg(project.path())
            .arg("--out")
            .arg(out.path())
            .arg("--quiet")
            .assert()
            .success();
    }
    let nodes1 = fs::read(out1.path().join("nodes.jsonl")).unwrap();
    let nodes2 = fs::read(out2.path().join("nodes.jsonl")).unwrap();
    assert_eq!(nodes1, nodes2);
    let edges1 = fs::read(out1.path().join("edges.jsonl")).unwrap();
    let edges2 = fs::read(out2.path().join("edges.jsonl")).unwrap();
    assert_eq!(edges1, edges2);
}

#[test]
fn exclude_prunes_matching_files() {
    let project = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_project(project.path());
    let generated = project.path().join("target");
    fs::create_dir_all(&generated).unwrap();
    fs::write(
        generated.join("Gen.java"),
        "package gen;\npublic class Gen {}\n",
    )
    .unwrap();

    Command::cargo_bin("javagraph")
        .unwrap()
        .arg("analyze")
        .arg(project.path())
        .arg("--out")
        .arg(out.path())
        .arg("--exclude")
        .arg("^target/")
        .arg("--quiet")
        .assert()
        .success();

    let nodes = fs::read_to_string(out.path().join("nodes.jsonl")).unwrap();
    assert!(!nodes.contains("class:gen.Gen"));
}

#[test]
fn cache_dir_speeds_up_second_run() {
    let project = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_project(project.path());

    for _ in 0..2 {
        Command::cargo_bin("javagraph")
            .unwrap()
            .arg("analyze")
            .arg(project.path())
            .arg("--out")
            .arg(out.path())
            .arg("--cache-dir")
            .arg(cache.path())
            .assert()
            .success();
    }
    assert!(cache.path().join("summaries.json").exists());
}

#[test]
fn broken_files_are_reported_not_fatal() {
    let project = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_project(project.path());
    fs::write(project.path().join("src/Broken.java"), "class {{{").unwrap();

    Command::cargo_bin("javagraph")
        .unwrap()
        .arg("analyze")
        .arg(project.path())
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 parse errors"));

    let diags = fs::read_to_string(out.path().join("diagnostics.jsonl")).unwrap();
    assert!(diags.contains("parse_error"));
    assert!(diags.contains("src/Broken.java"));
}

#[test]
fn missing_subcommand_fails() {
    Command::cargo_bin("javagraph").unwrap().assert().failure();
}
