//! 到達性プローブ
//!
//! 認証情報なしでURLへGETを送り、HTTPのやり取りが完了すれば到達可能とみなす。
//! ステータスコードは見ない（404や500も「到達可能」）。意味的なヘルスチェックではない。

use crate::types::endpoint::ProbeState;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// プローブのデフォルトタイムアウト（秒）
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// プローブ失敗
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// HTTPクライアントの構築に失敗
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// 接続・DNS解決などのネットワークエラー
    #[error("Request failed: {0}")]
    Request(String),

    /// タイムアウト
    #[error("Request timed out")]
    Timeout,
}

/// 1回分の到達性チェック
#[async_trait]
pub trait Probe: Send + Sync {
    /// `url`に到達できれば`Ok(())`
    async fn probe(&self, url: &str) -> Result<(), ProbeError>;
}

/// reqwestによるHTTPプローブ
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// タイムアウトを指定してプローブを作成
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, url: &str) -> Result<(), ProbeError> {
        match self.client.get(url).send().await {
            Ok(response) => {
                debug!(url = url, http_status = %response.status(), "Probe got a response");
                Ok(())
            }
            Err(e) if e.is_timeout() => Err(ProbeError::Timeout),
            Err(e) => Err(ProbeError::Request(e.to_string())),
        }
    }
}

/// プローブを1回実行し、経過時間とともに状態へ変換する
///
/// 失敗は`offline`として記録し、呼び出し側へは伝播しない。
pub async fn measure(prober: &dyn Probe, url: &str) -> ProbeState {
    let start = Instant::now();
    let result = prober.probe(url).await;
    let latency_ms = u32::try_from(start.elapsed().as_millis()).unwrap_or(u32::MAX);

    match result {
        Ok(()) => {
            debug!(url = url, latency_ms = latency_ms, "Probe succeeded");
            ProbeState::online(latency_ms, Utc::now())
        }
        Err(e) => {
            debug!(url = url, error = %e, "Probe failed");
            ProbeState::offline(Utc::now())
        }
    }
}
