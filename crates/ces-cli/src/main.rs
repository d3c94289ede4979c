use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod output;
mod pipeline;
mod progress;
mod ui;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("ces error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = bootstrap::load_config()?;
    init_tracing(cli.quiet, cli.verbose || config.pipeline.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    commands::dispatch::dispatch(cli.command, config, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CES_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
