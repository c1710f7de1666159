//! Backoffice CLI entry point

use backoffice::{resolve_config, run, Cli};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("backoffice=debug,backoffice_board=debug,backoffice_docs=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match execute(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    std::process::exit(exit_code);
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    let mut stdout = std::io::stdout().lock();
    run(cli.command, &config, &mut stdout).await
}
