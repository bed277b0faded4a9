//! Entry point for the command-line interface.

use javagraph::analyze::run_analyze;
use javagraph::args::{parse_cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();
    match cli.command {
        Commands::Analyze(args) => run_analyze(args),
    }
}
