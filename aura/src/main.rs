//! Aura status board entry point

use aura::cli::{self, Cli};
use aura::common::AuraError;
use aura::config::MonitorConfig;
use aura::logging;
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = MonitorConfig::from_env();
    if let Some(dir) = cli.data_dir.clone() {
        config = config.with_data_dir(dir);
    }

    // ログ初期化に失敗してもコマンド自体は実行する
    let guard = match logging::init(&config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: failed to initialize logging: {}", e);
            None
        }
    };

    if let Err(e) = cli::run(cli.command, &config).await {
        match e.downcast_ref::<AuraError>() {
            Some(err) => {
                debug!(kind = err.kind(), error = %err, "Command failed");
                eprintln!("Error: {} ({})", err.user_message(), err);
            }
            None => eprintln!("Error: {}", e),
        }
        drop(guard);
        std::process::exit(1);
    }
}
