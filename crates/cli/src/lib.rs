//! Library surface of the `javagraph` binary: argument parsing, the
//! analyze pipeline and summary formatting.

pub mod analyze;
pub mod args;
pub mod output;

use regex::Regex;

pub fn parse_exclude(s: &str) -> Result<Regex, String> {
    Regex::new(s).map_err(|e| e.to_string())
}
