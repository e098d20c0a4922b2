//! export subcommand

use super::open_dashboard;
use crate::backup::backup_file_name;
use crate::config::MonitorConfig;
use anyhow::Context;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export subcommand
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Output file (`-` for stdout). Defaults to aura-backup-<today>.json
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Execute the export command
pub fn execute(args: &ExportArgs, config: &MonitorConfig) -> Result<(), anyhow::Error> {
    let dashboard = open_dashboard(config)?;
    let text = dashboard.export_backup()?;

    if args.output.as_deref() == Some("-") {
        println!("{}", text);
        return Ok(());
    }

    let path = match &args.output {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(backup_file_name(Local::now().date_naive())),
    };
    std::fs::write(&path, format!("{}\n", text))
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!(
        "Exported {} endpoints to {}",
        dashboard.registry().len(),
        path.display()
    );
    Ok(())
}
