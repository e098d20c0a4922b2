//! プローブスケジューラ
//!
//! URLごとに独立したモニタータスクを持ち、開始直後に1回、その後は一定間隔で
//! プローブを繰り返す。各タスクが書き換えるのは自分のURLのスロットだけで、
//! レジストリの構造には触れない。

use super::prober::{measure, Probe};
use crate::events::{MonitorEvent, SharedEventBus};
use crate::types::endpoint::{ProbeState, ProbeStatus};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// デフォルトのプローブ間隔（秒）
pub const DEFAULT_PROBE_INTERVAL_SECS: u64 = 30;

/// プローブ間隔の下限
const MIN_PROBE_INTERVAL: Duration = Duration::from_secs(1);

type ProbeSlots = Arc<RwLock<HashMap<String, ProbeState>>>;

/// 実行中のモニター
struct Monitor {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// URL単位のプローブスケジューラ
///
/// ドロップ時にすべてのモニターを停止する。
pub struct ProbeScheduler {
    /// プローブ実装
    prober: Arc<dyn Probe>,
    /// プローブ間隔
    interval: Duration,
    /// URL→一時的なプローブ状態
    slots: ProbeSlots,
    /// URL→実行中のモニター
    monitors: Mutex<HashMap<String, Monitor>>,
    /// プローブ完了の通知先
    event_bus: Option<SharedEventBus>,
}

impl ProbeScheduler {
    /// デフォルト間隔のスケジューラを作成
    pub fn new(prober: Arc<dyn Probe>) -> Self {
        Self {
            prober,
            interval: Duration::from_secs(DEFAULT_PROBE_INTERVAL_SECS),
            slots: Arc::new(RwLock::new(HashMap::new())),
            monitors: Mutex::new(HashMap::new()),
            event_bus: None,
        }
    }

    /// プローブ間隔を設定（1秒未満は1秒に切り上げ）
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_PROBE_INTERVAL);
        self
    }

    /// プローブ完了イベントの発行先を設定
    pub fn with_event_bus(mut self, event_bus: SharedEventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// プローブ間隔
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// URLの監視を開始
    ///
    /// 既に監視中なら何もしない。tokioランタイム上で呼び出すこと。
    pub fn start(&self, url: &str) {
        let mut monitors = self.monitors.lock().unwrap_or_else(PoisonError::into_inner);
        if monitors.contains_key(url) {
            return;
        }

        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), ProbeState::loading());

        let token = CancellationToken::new();
        let handle = tokio::spawn(monitor_loop(
            url.to_string(),
            self.prober.clone(),
            self.slots.clone(),
            self.interval,
            token.clone(),
            self.event_bus.clone(),
        ));
        monitors.insert(url.to_string(), Monitor { token, handle });

        debug!(url = url, interval_secs = self.interval.as_secs(), "Started monitor");
    }

    /// URLの監視を停止し、プローブ状態を破棄
    ///
    /// 監視していないURLでも安全に呼べる。
    pub fn stop(&self, url: &str) {
        let monitor = self
            .monitors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url);

        if let Some(monitor) = monitor {
            monitor.token.cancel();
            monitor.handle.abort();
            debug!(url = url, "Stopped monitor");
        }

        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url);
    }

    /// 監視対象を`urls`に揃える（新規は開始、不要なものは停止）
    pub fn sync<S: AsRef<str>>(&self, urls: &[S]) {
        let stale: Vec<String> = {
            let monitors = self.monitors.lock().unwrap_or_else(PoisonError::into_inner);
            monitors
                .keys()
                .filter(|monitored| !urls.iter().any(|u| u.as_ref() == monitored.as_str()))
                .cloned()
                .collect()
        };
        for url in &stale {
            self.stop(url);
        }
        for url in urls {
            self.start(url.as_ref());
        }
    }

    /// すべての監視を停止
    pub fn shutdown(&self) {
        let monitors: Vec<(String, Monitor)> = self
            .monitors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .collect();

        let count = monitors.len();
        for (_, monitor) in monitors {
            monitor.token.cancel();
            monitor.handle.abort();
        }
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();

        if count > 0 {
            info!(stopped = count, "Probe scheduler shut down");
        }
    }

    /// URLが監視中か
    pub fn is_monitoring(&self, url: &str) -> bool {
        self.monitors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(url)
    }

    /// 監視中のURL数
    pub fn monitored_count(&self) -> usize {
        self.monitors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// URLのプローブ状態
    pub fn state(&self, url: &str) -> Option<ProbeState> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    /// 全スロットのスナップショット
    pub fn snapshot(&self) -> HashMap<String, ProbeState> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 監視を開始せずに、指定URLを並列に1回ずつプローブする
    ///
    /// 結果は`urls`と同じ順で返す。
    pub async fn check_all_parallel(&self, urls: &[String]) -> Vec<(String, ProbeState)> {
        if urls.is_empty() {
            info!("No endpoints to check");
            return Vec::new();
        }

        info!(count = urls.len(), "Starting parallel probe for endpoints");

        let mut handles = Vec::with_capacity(urls.len());
        for url in urls {
            let prober = self.prober.clone();
            let url = url.clone();
            handles.push(tokio::spawn(async move {
                let state = measure(prober.as_ref(), &url).await;
                (url, state)
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (handle, url) in handles.into_iter().zip(urls) {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    error!(url = %url, "Probe task join error: {}", e);
                    results.push((url.clone(), ProbeState::offline(chrono::Utc::now())));
                }
            }
        }

        let online = results
            .iter()
            .filter(|(_, state)| state.status == ProbeStatus::Online)
            .count();
        info!(
            online = online,
            offline = results.len() - online,
            "Parallel probe completed"
        );

        results
    }
}

impl Drop for ProbeScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// 1つのURLを監視するループ
///
/// `interval()`の初回tickは即時に完了するため、開始直後に1回プローブが走る。
async fn monitor_loop(
    url: String,
    prober: Arc<dyn Probe>,
    slots: ProbeSlots,
    period: Duration,
    token: CancellationToken,
    event_bus: Option<SharedEventBus>,
) {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = timer.tick() => {}
        }

        let state = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            state = measure(prober.as_ref(), &url) => state,
        };

        {
            let mut slots = slots.write().unwrap_or_else(PoisonError::into_inner);
            // 停止済み（スロット破棄後）の結果は書き戻さない
            if token.is_cancelled() {
                break;
            }
            match slots.get_mut(&url) {
                Some(slot) => *slot = state.clone(),
                None => break,
            }
        }

        if let Some(bus) = &event_bus {
            bus.publish(MonitorEvent::ProbeCompleted {
                url: url.clone(),
                status: state.status,
                latency_ms: state.latency_ms,
            });
        }
    }

    debug!(url = %url, "Monitor loop exited");
}
