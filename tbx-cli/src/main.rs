//! tbx: Toolbox corpus batch replacement

use clap::Parser;
use tbx_cli::commands::Commands;
use tbx_cli::CliResult;

/// Batch replacement, realignment and checking for Toolbox corpora
#[derive(Debug, Parser)]
#[command(name = "tbx", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
