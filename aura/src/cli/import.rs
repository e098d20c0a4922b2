//! import subcommand
//!
//! バックアップファイルを既存の登録とマージする。既存URLは上書きしない。

use super::open_dashboard;
use crate::config::MonitorConfig;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the import subcommand
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Backup file to merge
    pub path: PathBuf,
}

/// Execute the import command
pub fn execute(args: &ImportArgs, config: &MonitorConfig) -> Result<(), anyhow::Error> {
    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;

    let mut dashboard = open_dashboard(config)?;
    let added = dashboard.import_backup(&text)?;
    println!("Imported {} new endpoints", added);
    Ok(())
}
