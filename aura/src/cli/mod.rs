//! CLI module for aura
//!
//! Provides the command-line interface over the dashboard.

pub mod add;
pub mod check;
pub mod export;
pub mod import;
pub mod list;
pub mod pin;
pub mod remove;
pub mod reorder;
pub mod watch;

use crate::config::MonitorConfig;
use crate::dashboard::{Dashboard, DashboardRow};
use crate::health::HttpProbe;
use crate::storage::FileStore;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

/// Aura - Personal status board for HTTP endpoints
#[derive(Parser, Debug)]
#[command(name = "aura")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    AURA_DATA_DIR              Data directory (default: ~/.aura)
    AURA_PROBE_INTERVAL_SECS   Seconds between probes of one endpoint (default: 30)
    AURA_PROBE_TIMEOUT_SECS    Probe request timeout in seconds (default: 10)
    AURA_LOG_LEVEL             Log level (default: info)
"#)]
pub struct Cli {
    /// Directory holding saved endpoints and logs
    #[arg(long, global = true, env = "AURA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new endpoint
    Add(add::AddArgs),
    /// Remove an endpoint
    Remove(remove::RemoveArgs),
    /// Toggle the pin flag of an endpoint
    Pin(pin::PinArgs),
    /// Move an endpoint to another position
    Move(reorder::MoveArgs),
    /// List endpoints (pinned first)
    List(list::ListArgs),
    /// Probe every listed endpoint once
    Check(check::CheckArgs),
    /// Keep probing and re-render until Ctrl+C
    Watch(watch::WatchArgs),
    /// Write the endpoint list to a backup file
    Export(export::ExportArgs),
    /// Merge endpoints from a backup file
    Import(import::ImportArgs),
}

/// サブコマンドを実行
pub async fn run(command: Commands, config: &MonitorConfig) -> Result<(), anyhow::Error> {
    match command {
        Commands::Add(args) => add::execute(&args, config),
        Commands::Remove(args) => remove::execute(&args, config),
        Commands::Pin(args) => pin::execute(&args, config),
        Commands::Move(args) => reorder::execute(&args, config),
        Commands::List(args) => list::execute(&args, config),
        Commands::Check(args) => check::execute(&args, config).await,
        Commands::Watch(args) => watch::execute(&args, config).await,
        Commands::Export(args) => export::execute(&args, config),
        Commands::Import(args) => import::execute(&args, config),
    }
}

/// データディレクトリのファイルストアとHTTPプローブでダッシュボードを開く
pub fn open_dashboard(config: &MonitorConfig) -> Result<Dashboard, anyhow::Error> {
    let store = Arc::new(FileStore::new(config.data_dir.clone()));
    let prober = Arc::new(HttpProbe::new(config.probe_timeout)?);
    Ok(Dashboard::open(store, prober, config))
}

fn pin_mark(is_pinned: bool) -> &'static str {
    if is_pinned {
        "*"
    } else {
        "-"
    }
}

/// `PIN NAME URL`形式の表
pub fn format_list(rows: &[DashboardRow]) -> String {
    let mut out = String::from("PIN\tNAME\tURL\n");
    for row in rows {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            pin_mark(row.endpoint.is_pinned),
            row.endpoint.name,
            row.endpoint.url
        ));
    }
    out
}

/// `PIN NAME URL STATUS LATENCY`形式の表
pub fn format_status(rows: &[DashboardRow]) -> String {
    let mut out = String::from("PIN\tNAME\tURL\tSTATUS\tLATENCY\n");
    for row in rows {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            pin_mark(row.endpoint.is_pinned),
            row.endpoint.name,
            row.endpoint.url,
            row.probe.status,
            row.probe.latency_label()
        ));
    }
    out
}
