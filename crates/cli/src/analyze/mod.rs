//! The analyze pipeline: discover, parse, resolve, write.

use crate::args::AnalyzeArgs;
use crate::output;
use anyhow::Context;
use graph::Diagnostic;
use parsers::cache::{content_hash, SummaryCache};
use parsers::{parse_java, FileSummary, Parsed, ParserMetrics};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::time::Instant;

pub fn run_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    if args.debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }
    let started = Instant::now();

    let files = loader::discover(&args.path, &args.exclude)?;

    let cache_path = args.cache_dir.as_ref().map(|dir| dir.join("summaries.json"));
    let mut cache = match &cache_path {
        Some(path) => SummaryCache::load(path),
        None => SummaryCache::default(),
    };

    let mut metrics = ParserMetrics::default();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut summaries: Vec<FileSummary> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for file in &files {
        seen.insert(file.rel_path.clone());
        let hash = content_hash(&file.bytes);
        if let Some(summary) = cache.lookup(&file.rel_path, &hash) {
            metrics.cache_hits += 1;
            summaries.push(summary);
            continue;
        }
        match parse_java(&file.rel_path, &file.bytes)? {
            Parsed::Summary(summary) => {
                metrics.files_parsed += 1;
                cache.store(file.rel_path.clone(), hash, summary.clone());
                summaries.push(summary);
            }
            Parsed::Failed { detail } => {
                metrics.parse_errors += 1;
                diagnostics.push(Diagnostic::ParseError {
                    file_path: file.rel_path.clone(),
                    detail,
                });
            }
        }
    }
    if let Some(path) = &cache_path {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        cache.retain_seen(&seen);
        cache.save(path);
    }

    let analysis = analyzer::analyze(&summaries)?;
    diagnostics.extend(analysis.diagnostics.iter().cloned());

    fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create output dir: {}", args.out.display()))?;
    let sink = |name: &str| -> anyhow::Result<BufWriter<File>> {
        let path = args.out.join(name);
        Ok(BufWriter::new(File::create(&path).with_context(|| {
            format!("failed to create output file: {}", path.display())
        })?))
    };

    reporters::write_nodes(sink("nodes.jsonl")?, &analysis.graph)?;
    reporters::write_edges(sink("edges.jsonl")?, &analysis.graph)?;
    let mut diag_out = sink("diagnostics.jsonl")?;
    for diag in &diagnostics {
        serde_json::to_writer(&mut diag_out, diag)?;
        diag_out.write_all(b"\n")?;
    }
    if !args.no_symbol_tables {
        reporters::write_symbol_tables(sink("symbol_tables.json")?, &analysis.index)?;
    }
    if args.dot {
        fs::write(args.out.join("dep.dot"), reporters::to_dot(&analysis.graph))?;
    }

    if !args.quiet {
        output::print_summary(
            &mut std::io::stdout(),
            files.len(),
            &metrics,
            &analysis.graph,
            &diagnostics,
            started.elapsed().as_millis(),
        )?;
    }
    Ok(())
}
