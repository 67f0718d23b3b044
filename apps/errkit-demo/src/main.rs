use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use errkit::JsonApiErrors;
use errkit_demo::{CliOverrides, DemoConfig, logging, routes};

/// errkit demo - book catalog answering with JSON:API errors
#[derive(Parser)]
#[command(name = "errkit-demo")]
#[command(about = "Book catalog answering with JSON:API errors")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the error documentation (overrides config)
    #[arg(long)]
    docs_url: Option<String>,

    /// Port override for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) defaults -> 2) YAML (if provided) -> 3) env (ERRKIT__*) -> 4) CLI overrides
    let mut config = DemoConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        docs_url: cli.docs_url,
        port: cli.port,
        verbose: cli.verbose,
    });

    if cli.print_config {
        println!(
            "Effective configuration:\n{}",
            serde_json::to_string_pretty(&config)?
        );
        return Ok(());
    }

    logging::init(&config.logging);

    let errors = JsonApiErrors::new(config.errors.clone());
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, docs_url = %errors.docs_url(), "errkit demo listening");

    axum::serve(listener, routes::router(errors))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("errkit demo stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}
