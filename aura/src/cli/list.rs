//! list subcommand

use super::{format_list, open_dashboard};
use crate::config::MonitorConfig;
use clap::Args;

/// Arguments for the list subcommand
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Show only endpoints whose name contains this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub search: String,
}

/// Execute the list command
pub fn execute(args: &ListArgs, config: &MonitorConfig) -> Result<(), anyhow::Error> {
    let mut dashboard = open_dashboard(config)?;
    if dashboard.registry().is_empty() {
        println!("No endpoints registered");
        return Ok(());
    }
    dashboard.set_search(&args.search);
    print!("{}", format_list(&dashboard.rows()));
    Ok(())
}
