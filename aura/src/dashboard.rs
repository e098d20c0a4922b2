//! ダッシュボード
//!
//! レジストリ・プローブスケジューラ・検索語を束ね、
//! 登録の増減に合わせて監視の開始/停止を行う。
//! 表示はこのモジュールが返す`DashboardRow`を外側で描画する。

use crate::backup;
use crate::common::error::RegistryResult;
use crate::config::MonitorConfig;
use crate::events::{create_shared_event_bus, MonitorEvent, SharedEventBus};
use crate::health::{Probe, ProbeScheduler};
use crate::registry::EndpointRegistry;
use crate::storage::KeyValueStore;
use crate::types::endpoint::{Endpoint, ProbeState};
use crate::view;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// 表示用の1行（エンドポイント＋プローブ状態）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardRow {
    /// エンドポイント
    pub endpoint: Endpoint,
    /// プローブ状態（監視前は`loading`）
    pub probe: ProbeState,
}

/// ダッシュボード
pub struct Dashboard {
    registry: EndpointRegistry,
    scheduler: ProbeScheduler,
    event_bus: SharedEventBus,
    search_term: String,
    monitoring: bool,
}

impl Dashboard {
    /// 保存済みエンドポイントを読み込んでダッシュボードを作成
    ///
    /// プローブはまだ開始しない（`start_monitoring`で開始）。
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        prober: Arc<dyn Probe>,
        config: &MonitorConfig,
    ) -> Self {
        let event_bus = create_shared_event_bus();
        let scheduler = ProbeScheduler::new(prober)
            .with_interval(config.probe_interval)
            .with_event_bus(event_bus.clone());

        Self {
            registry: EndpointRegistry::load(store),
            scheduler,
            event_bus,
            search_term: String::new(),
            monitoring: false,
        }
    }

    /// レジストリ
    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    /// プローブスケジューラ
    pub fn scheduler(&self) -> &ProbeScheduler {
        &self.scheduler
    }

    /// イベントを購読
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.event_bus.subscribe()
    }

    /// 登録済みの全URLの監視を開始
    pub fn start_monitoring(&mut self) {
        self.monitoring = true;
        self.scheduler.sync(&self.registry.urls());
        info!(
            endpoints = self.registry.len(),
            interval_secs = self.scheduler.interval().as_secs(),
            "Monitoring started"
        );
    }

    /// 監視中か
    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    /// エンドポイントを追加
    pub fn add(&mut self, name: &str, url: &str) -> RegistryResult<Endpoint> {
        let endpoint = self.registry.add(name, url)?;
        if self.monitoring {
            self.scheduler.start(&endpoint.url);
        }
        self.event_bus.publish(MonitorEvent::EndpointAdded {
            url: endpoint.url.clone(),
        });
        Ok(endpoint)
    }

    /// エンドポイントを削除（監視も停止）
    pub fn remove(&mut self, url: &str) -> RegistryResult<bool> {
        let removed = self.registry.remove(url)?;
        // 未登録でも停止は安全
        self.scheduler.stop(url);
        if removed {
            self.event_bus.publish(MonitorEvent::EndpointRemoved {
                url: url.to_string(),
            });
        }
        Ok(removed)
    }

    /// ピン留めを反転
    pub fn toggle_pin(&mut self, url: &str) -> RegistryResult<Option<bool>> {
        let result = self.registry.toggle_pin(url)?;
        if let Some(is_pinned) = result {
            self.event_bus.publish(MonitorEvent::PinToggled {
                url: url.to_string(),
                is_pinned,
            });
        }
        Ok(result)
    }

    /// エンドポイントを指定位置へ移動
    pub fn reorder(&mut self, url: &str, target_index: usize) -> RegistryResult<bool> {
        let moved = self.registry.reorder(url, target_index)?;
        if moved {
            self.event_bus.publish(MonitorEvent::EndpointMoved {
                url: url.to_string(),
                target_index,
            });
        }
        Ok(moved)
    }

    /// ドラッグ操作の確定
    ///
    /// `active_url`を`over_url`が現在ある位置へ移動する。
    /// どちらかが未登録、または同一なら何もしない。
    pub fn commit_reorder(&mut self, active_url: &str, over_url: &str) -> RegistryResult<bool> {
        if active_url == over_url {
            return Ok(false);
        }
        let Some(target_index) = self
            .registry
            .list()
            .iter()
            .position(|e| e.url == over_url)
        else {
            return Ok(false);
        };
        self.reorder(active_url, target_index)
    }

    /// バックアップテキストを読み込んでマージ
    ///
    /// 解析に失敗した場合はレジストリを変更せずにエラーを返す。
    pub fn import_backup(&mut self, text: &str) -> RegistryResult<usize> {
        let candidates = backup::import(text)?;
        let added = self.registry.import_merge(candidates)?;
        if added > 0 {
            if self.monitoring {
                self.scheduler.sync(&self.registry.urls());
            }
            self.event_bus
                .publish(MonitorEvent::EndpointsImported { added });
        }
        Ok(added)
    }

    /// 現在のエンドポイント一覧をバックアップテキストに変換
    pub fn export_backup(&self) -> RegistryResult<String> {
        backup::export(self.registry.list())
    }

    /// 検索語を設定
    pub fn set_search(&mut self, term: &str) {
        debug!(term = term, "Search term changed");
        self.search_term = term.to_string();
    }

    /// 現在の検索語
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// 検索語で絞り込み、ピン留め優先で並べたエンドポイント
    pub fn visible(&self) -> Vec<&Endpoint> {
        view::project(self.registry.list(), &self.search_term)
    }

    /// 表示用の行
    pub fn rows(&self) -> Vec<DashboardRow> {
        let states = self.scheduler.snapshot();
        self.visible()
            .into_iter()
            .map(|endpoint| DashboardRow {
                probe: states.get(&endpoint.url).cloned().unwrap_or_default(),
                endpoint: endpoint.clone(),
            })
            .collect()
    }

    /// 監視をすべて停止（何度呼んでもよい）
    pub fn teardown(&mut self) {
        self.monitoring = false;
        self.scheduler.shutdown();
    }
}
