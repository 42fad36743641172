use anyhow::Context;
use clap::Parser;
use lineage_inspect::{Cli, init_logger, load_config, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let _log = init_logger(&config.logging).context("Critical: Logger setup failed")?;

    run(&cli, config, &mut std::io::stdout().lock())
}
