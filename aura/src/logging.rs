//! ロギング初期化
//!
//! 標準エラーへの人間向け出力と、データディレクトリ配下への日次ローテーション
//! ファイル出力を組み合わせる。`RUST_LOG`が設定されていればそちらを優先する。

use crate::config::MonitorConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログファイル名の接頭辞
const LOG_FILE_PREFIX: &str = "aura.log";

/// ロギングを初期化する
///
/// 戻り値のガードはファイル出力のフラッシュに必要なため、プロセス終了まで保持すること。
pub fn init(config: &MonitorConfig) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(config.log_dir())?;

    let file_appender = tracing_appender::rolling::daily(config.log_dir(), LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init()?;

    Ok(guard)
}
