use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use tracing::info;

use mcpserve::{Dispatcher, ServeError, ServerInfo};

#[derive(Parser)]
#[command(
    name = "mcpserve",
    version,
    about = "A line-delimited JSON-RPC 2.0 server exposing MCP-style tools over stdio"
)]
struct Cli {
    /// Tracing filter directive, e.g. `debug` or `mcpserve=trace`
    #[arg(long, env = "MCPSERVE_LOG", default_value = "info")]
    log_level: String,

    /// Append diagnostics to this file instead of stderr
    #[arg(long, env = "MCPSERVE_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Server name advertised during the initialize handshake
    #[arg(long, default_value = "mcpserve")]
    server_name: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = run(cli).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ServeError> {
    init_tracing(&cli)?;
    info!(
        name = %cli.server_name,
        version = env!("CARGO_PKG_VERSION"),
        "starting stdio server"
    );

    let mut dispatcher = Dispatcher::with_builtin_tools(ServerInfo {
        name: cli.server_name,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })?;
    mcpserve::run_stdio(&mut dispatcher).await
}

/// Diagnostics go to stderr or a file; stdout stays wire-only.
fn init_tracing(cli: &Cli) -> Result<(), ServeError> {
    let filter = tracing_subscriber::EnvFilter::try_new(&cli.log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| ServeError::LogFile {
                    path: path.clone(),
                    detail: e.to_string(),
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
