//! モニターイベントバス
//!
//! レジストリの変更とプローブ結果を購読者（`watch`コマンドの再描画など）へ
//! ブロードキャストするための基盤

use crate::types::endpoint::ProbeStatus;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

/// イベントバスのチャネル容量
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// モニターイベント
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum MonitorEvent {
    /// エンドポイント追加
    EndpointAdded {
        /// URL
        url: String,
    },
    /// エンドポイント削除
    EndpointRemoved {
        /// URL
        url: String,
    },
    /// ピン留め変更
    PinToggled {
        /// URL
        url: String,
        /// 変更後のピン留め状態
        is_pinned: bool,
    },
    /// 並び替え
    EndpointMoved {
        /// URL
        url: String,
        /// 移動先インデックス
        target_index: usize,
    },
    /// インポートによる追加
    EndpointsImported {
        /// 追加件数
        added: usize,
    },
    /// プローブ完了
    ProbeCompleted {
        /// URL
        url: String,
        /// プローブ後の状態
        status: ProbeStatus,
        /// レイテンシ（ミリ秒）
        latency_ms: Option<u32>,
    },
}

/// モニターイベントバス
#[derive(Clone)]
pub struct MonitorEventBus {
    sender: broadcast::Sender<MonitorEvent>,
}

impl Default for MonitorEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorEventBus {
    /// 新しいイベントバスを作成
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// イベントバスを購読
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.sender.subscribe()
    }

    /// イベントを発行
    ///
    /// 購読者がいない場合でもエラーにはならない
    pub fn publish(&self, event: MonitorEvent) {
        // 購読者がいない場合は送信に失敗するが、無視する
        let _ = self.sender.send(event);
    }

    /// 現在の購読者数を取得
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Arc でラップされたイベントバス
pub type SharedEventBus = Arc<MonitorEventBus>;

/// 共有可能なイベントバスを作成
pub fn create_shared_event_bus() -> SharedEventBus {
    Arc::new(MonitorEventBus::new())
}
