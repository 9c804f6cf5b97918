//! CLI entry point for the grid program search

use clap::Parser;
use gridgolf::io::cli::{Cli, TaskProcessor};
use gridgolf::io::logging::init_logging;

fn main() -> gridgolf::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let processor = TaskProcessor::new(cli);
    processor.process()
}
