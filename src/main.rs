use anyhow::Result;
use budget_visualizer::cli::Cli;
use budget_visualizer::logging::init_logger;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    cli.run()
}
