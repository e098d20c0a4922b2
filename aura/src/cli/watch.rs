//! watch subcommand
//!
//! スケジューラを起動し、イベントを受け取るたびに表を再描画する。
//! Ctrl+C（またはSIGTERM）で全モニターを停止して終了する。

use super::{format_status, open_dashboard};
use crate::config::MonitorConfig;
use crate::shutdown::{shutdown_signal, ShutdownController};
use chrono::Local;
use clap::Args;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

/// Arguments for the watch subcommand
#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// Show only endpoints whose name contains this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub search: String,
}

/// Execute the watch command
pub async fn execute(args: &WatchArgs, config: &MonitorConfig) -> Result<(), anyhow::Error> {
    let mut dashboard = open_dashboard(config)?;
    dashboard.set_search(&args.search);

    let mut events = dashboard.subscribe();
    dashboard.start_monitoring();
    render(&dashboard);

    let shutdown = ShutdownController::default();
    let signal = shutdown_signal(shutdown.clone());
    tokio::pin!(signal);

    loop {
        tokio::select! {
            biased;
            _ = &mut signal => break,
            event = events.recv() => match event {
                Ok(_) => render(&dashboard),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped = skipped, "Watch fell behind the event stream");
                    render(&dashboard);
                }
                // 次のループでシグナル側が完了して抜ける
                Err(RecvError::Closed) => shutdown.request_shutdown(),
            },
        }
    }

    dashboard.teardown();
    Ok(())
}

fn render(dashboard: &crate::dashboard::Dashboard) {
    println!();
    println!(
        "{}  (every {}s, Ctrl+C to quit)",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        dashboard.scheduler().interval().as_secs()
    );
    if dashboard.registry().is_empty() {
        println!("No endpoints registered");
        return;
    }
    print!("{}", format_status(&dashboard.rows()));
}
