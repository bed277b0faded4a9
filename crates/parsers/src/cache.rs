//! Content-addressed summary cache.
//!
//! Keyed by file path with a blake3 hash of the bytes; a hit skips
//! re-parsing. The cache only ever short-circuits work — a stale or
//! missing cache changes nothing about the emitted graph.

use crate::FileSummary;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct CachedFile {
    hash: String,
    summary: FileSummary,
}

#[derive(Default, Serialize, Deserialize)]
pub struct SummaryCache {
    files: HashMap<String, CachedFile>,
}

pub fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

impl SummaryCache {
    pub fn load(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn lookup(&self, file: &str, hash: &str) -> Option<FileSummary> {
        self.files
            .get(file)
            .filter(|c| c.hash == hash)
            .map(|c| c.summary.clone())
    }

    pub fn store(&mut self, file: String, hash: String, summary: FileSummary) {
        self.files.insert(file, CachedFile { hash, summary });
    }

    /// Drops entries for files no longer present in the input set.
    pub fn retain_seen(&mut self, seen: &HashSet<String>) {
        self.files.retain(|k, _| seen.contains(k));
    }

    pub fn save(&self, path: &Path) {
        if let Ok(s) = serde_json::to_string(self) {
            let _ = fs::write(path, s);
        }
    }
}
