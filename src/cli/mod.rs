pub mod commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "entlook")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Look up entities seen in your monitored environment", long_about = None)]
pub struct Cli {
    /// Entity to look up, as <kind>:<value> (e.g. 'user:root')
    pub query: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}
