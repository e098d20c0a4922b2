//! エンドポイント型定義
//!
//! 永続化される`Endpoint`と、プローブが保持する一時的な`ProbeState`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 監視対象のエンドポイント
///
/// `url`がレジストリ内での識別子となる。`name`は表示用で重複を許す。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoint {
    /// 表示名
    pub name: String,
    /// 監視対象URL（レジストリ内で一意）
    pub url: String,
    /// ピン留めフラグ（表示順の優先度のみに影響）
    #[serde(rename = "isPinned", default)]
    pub is_pinned: bool,
}

impl Endpoint {
    /// ピン留めなしで新しいエンドポイントを作成
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            is_pinned: false,
        }
    }

    /// ピン留め状態を指定して作成
    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = is_pinned;
        self
    }
}

/// プローブ結果としての稼働状態
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// 初回プローブ完了待ち
    #[default]
    Loading,
    /// 到達可能
    Online,
    /// 到達不可
    Offline,
}

impl ProbeStatus {
    /// ProbeStatusを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

impl FromStr for ProbeStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "online" => Self::Online,
            "offline" => Self::Offline,
            _ => Self::Loading,
        })
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// エンドポイント1件分の一時的なプローブ状態
///
/// 永続化されない。監視の開始で作成され、停止で破棄される。
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct ProbeState {
    /// 稼働状態
    pub status: ProbeStatus,
    /// 直近のレイテンシ（ミリ秒）。オフライン時は`None`
    pub latency_ms: Option<u32>,
    /// 直近のプローブ完了時刻
    pub last_checked_at: Option<DateTime<Utc>>,
}

impl ProbeState {
    /// 初回プローブ前の状態
    pub fn loading() -> Self {
        Self::default()
    }

    /// 到達成功
    pub fn online(latency_ms: u32, checked_at: DateTime<Utc>) -> Self {
        Self {
            status: ProbeStatus::Online,
            latency_ms: Some(latency_ms),
            last_checked_at: Some(checked_at),
        }
    }

    /// 到達失敗
    pub fn offline(checked_at: DateTime<Utc>) -> Self {
        Self {
            status: ProbeStatus::Offline,
            latency_ms: None,
            last_checked_at: Some(checked_at),
        }
    }

    /// レイテンシの表示用文字列（未計測時は`--`）
    pub fn latency_label(&self) -> String {
        match self.latency_ms {
            Some(ms) => format!("{}ms", ms),
            None => "--".to_string(),
        }
    }
}
