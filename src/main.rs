use clap::Parser;
use entlook::cli::{commands, Cli};
use std::process;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // stdout carries lookup results; all diagnostics go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    info!("starting entlook v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = commands::run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
