//! move subcommand
//!
//! ドラッグ&ドロップ並び替えのCLI版。`index`は全体リスト上の位置（0始まり）。

use super::open_dashboard;
use crate::config::MonitorConfig;
use clap::Args;

/// Arguments for the move subcommand
#[derive(Args, Debug, Clone)]
pub struct MoveArgs {
    /// URL of the endpoint to move
    pub url: String,
    /// Target position in the saved order (0-based)
    pub index: usize,
}

/// Execute the move command
pub fn execute(args: &MoveArgs, config: &MonitorConfig) -> Result<(), anyhow::Error> {
    let mut dashboard = open_dashboard(config)?;
    if !dashboard.registry().contains(&args.url) {
        println!("No endpoint registered for {}", args.url);
        return Ok(());
    }
    if dashboard.reorder(&args.url, args.index)? {
        println!("Moved {} to position {}", args.url, args.index);
    } else {
        anyhow::bail!(
            "position {} is out of range (0..{})",
            args.index,
            dashboard.registry().len()
        );
    }
    Ok(())
}
