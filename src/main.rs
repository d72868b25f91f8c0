use clap::Parser;

use arcwire::cli::commands::CliRunner;
use arcwire::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let runner = CliRunner::new(cli.verbose, cli.config)?;
    runner.run(cli.command)?;
    Ok(())
}
