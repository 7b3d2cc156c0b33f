use anyhow::Context;
use clap::Parser;
use portsweep::cli::{Cli, Commands, ExitStatus};
use portsweep::config::AppSettings;
use portsweep::output;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(status) => status.into(),
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitStatus> {
    let settings = AppSettings::load(cli.config.as_deref()).context("failed to load settings")?;

    if !settings.color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let status = match cli.command {
        Commands::Scan(cmd) => cmd.execute(&settings, cli.quiet).await?,
    };
    Ok(status)
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: bool) {
    let default = if verbose { "portsweep=debug" } else { "portsweep=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
