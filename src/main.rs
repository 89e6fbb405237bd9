use anyhow::Context;
use clap::Parser;
use resale_processor::cli::{run, Cli};
use resale_processor::utils::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref()).context("failed to initialize logging")?;
    run(cli).context("resale pipeline failed")
}
