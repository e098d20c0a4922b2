//! remove subcommand

use super::open_dashboard;
use crate::config::MonitorConfig;
use clap::Args;

/// Arguments for the remove subcommand
#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    /// URL of the endpoint to remove
    pub url: String,
}

/// Execute the remove command
pub fn execute(args: &RemoveArgs, config: &MonitorConfig) -> Result<(), anyhow::Error> {
    let mut dashboard = open_dashboard(config)?;
    if dashboard.remove(&args.url)? {
        println!("Removed {}", args.url);
    } else {
        println!("No endpoint registered for {}", args.url);
    }
    Ok(())
}
