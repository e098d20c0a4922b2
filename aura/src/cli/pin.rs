//! pin subcommand

use super::open_dashboard;
use crate::config::MonitorConfig;
use clap::Args;

/// Arguments for the pin subcommand
#[derive(Args, Debug, Clone)]
pub struct PinArgs {
    /// URL of the endpoint to pin or unpin
    pub url: String,
}

/// Execute the pin command
pub fn execute(args: &PinArgs, config: &MonitorConfig) -> Result<(), anyhow::Error> {
    let mut dashboard = open_dashboard(config)?;
    match dashboard.toggle_pin(&args.url)? {
        Some(true) => println!("Pinned {}", args.url),
        Some(false) => println!("Unpinned {}", args.url),
        None => println!("No endpoint registered for {}", args.url),
    }
    Ok(())
}
