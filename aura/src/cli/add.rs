//! add subcommand

use super::open_dashboard;
use crate::config::MonitorConfig;
use clap::Args;

/// Arguments for the add subcommand
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Display name
    pub name: String,
    /// Absolute URL to probe
    pub url: String,
}

/// Execute the add command
pub fn execute(args: &AddArgs, config: &MonitorConfig) -> Result<(), anyhow::Error> {
    let mut dashboard = open_dashboard(config)?;
    let endpoint = dashboard.add(&args.name, &args.url)?;
    println!("Added {} ({})", endpoint.name, endpoint.url);
    Ok(())
}
