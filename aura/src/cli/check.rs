//! check subcommand
//!
//! 表示対象のエンドポイントへ1回ずつ並列にプローブして結果を表示する。

use super::{format_status, open_dashboard};
use crate::config::MonitorConfig;
use crate::dashboard::DashboardRow;
use clap::Args;
use std::collections::HashMap;

/// Arguments for the check subcommand
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Probe only endpoints whose name contains this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub search: String,
}

/// Execute the check command
pub async fn execute(args: &CheckArgs, config: &MonitorConfig) -> Result<(), anyhow::Error> {
    let mut dashboard = open_dashboard(config)?;
    if dashboard.registry().is_empty() {
        println!("No endpoints registered");
        return Ok(());
    }
    dashboard.set_search(&args.search);

    let urls: Vec<String> = dashboard.visible().iter().map(|e| e.url.clone()).collect();
    let results: HashMap<String, _> = dashboard
        .scheduler()
        .check_all_parallel(&urls)
        .await
        .into_iter()
        .collect();

    let rows: Vec<DashboardRow> = dashboard
        .rows()
        .into_iter()
        .map(|mut row| {
            if let Some(state) = results.get(&row.endpoint.url) {
                row.probe = state.clone();
            }
            row
        })
        .collect();
    print!("{}", format_status(&rows));
    Ok(())
}
