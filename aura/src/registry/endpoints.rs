//! エンドポイントレジストリ
//!
//! 監視対象エンドポイントの順序付きリストを所有し、変更のたびに
//! スナップショット全体をキーバリューストアへ書き込む。

use crate::common::error::{AuraError, RegistryResult};
use crate::storage::KeyValueStore;
use crate::types::endpoint::Endpoint;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// スナップショットを保存するキー
pub const STORAGE_KEY: &str = "aura-projects";

/// エンドポイントレジストリ
///
/// リストへの変更はすべてこの型を経由し、URLの一意性と
/// 永続化スナップショットの完全性をここで保証する。
pub struct EndpointRegistry {
    /// 登録順（= 永続化順）のエンドポイント
    endpoints: Vec<Endpoint>,
    /// 永続化先
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for EndpointRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointRegistry")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl EndpointRegistry {
    /// ストアから保存済みスナップショットを読み込んでレジストリを作成
    ///
    /// 未保存・読み取り失敗・破損のいずれでも空のレジストリを返す。
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let endpoints = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Endpoint>>(&raw) {
                Ok(saved) => dedupe_saved(saved),
                Err(e) => {
                    warn!(error = %e, "Saved endpoints are corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read saved endpoints, starting empty");
                Vec::new()
            }
        };

        info!(endpoint_count = endpoints.len(), "Loaded endpoints");

        Self { endpoints, store }
    }

    /// すべてのエンドポイント（登録順）
    pub fn list(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// URLでエンドポイントを取得
    pub fn get(&self, url: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.url == url)
    }

    /// URLが登録済みか
    pub fn contains(&self, url: &str) -> bool {
        self.position(url).is_some()
    }

    /// 登録数
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// 空か
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// 登録済みURL（登録順）
    pub fn urls(&self) -> Vec<String> {
        self.endpoints.iter().map(|e| e.url.clone()).collect()
    }

    fn position(&self, url: &str) -> Option<usize> {
        self.endpoints.iter().position(|e| e.url == url)
    }

    /// エンドポイントを末尾に追加
    ///
    /// 前後の空白を除いた名前・URLが空なら`InvalidInput`、
    /// URLが登録済みなら`DuplicateUrl`で拒否する。
    pub fn add(&mut self, name: &str, url: &str) -> RegistryResult<Endpoint> {
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() || url.is_empty() {
            return Err(AuraError::InvalidInput(
                "name and url must not be empty".to_string(),
            ));
        }
        if self.contains(url) {
            return Err(AuraError::DuplicateUrl(url.to_string()));
        }

        let endpoint = Endpoint::new(name, url);
        self.mutate(|endpoints| endpoints.push(endpoint.clone()))?;

        info!(name = %endpoint.name, url = %endpoint.url, "Added endpoint");
        Ok(endpoint)
    }

    /// エンドポイントを削除
    ///
    /// 未登録なら何もせず`false`を返す。
    pub fn remove(&mut self, url: &str) -> RegistryResult<bool> {
        let Some(index) = self.position(url) else {
            return Ok(false);
        };
        self.mutate(|endpoints| {
            endpoints.remove(index);
        })?;

        info!(url = url, "Removed endpoint");
        Ok(true)
    }

    /// ピン留めを反転
    ///
    /// 並び順は変えない。戻り値は反転後の状態（未登録なら`None`）。
    pub fn toggle_pin(&mut self, url: &str) -> RegistryResult<Option<bool>> {
        let Some(index) = self.position(url) else {
            return Ok(None);
        };
        self.mutate(|endpoints| {
            endpoints[index].is_pinned = !endpoints[index].is_pinned;
        })?;

        let is_pinned = self.endpoints[index].is_pinned;
        debug!(url = url, is_pinned = is_pinned, "Toggled pin");
        Ok(Some(is_pinned))
    }

    /// エンドポイントを`target_index`へ移動（他の要素はずれる）
    ///
    /// 未登録、または範囲外のインデックスなら何もせず`false`を返す。
    pub fn reorder(&mut self, url: &str, target_index: usize) -> RegistryResult<bool> {
        let Some(from) = self.position(url) else {
            return Ok(false);
        };
        if target_index >= self.endpoints.len() {
            return Ok(false);
        }
        if from == target_index {
            return Ok(true);
        }

        self.mutate(|endpoints| {
            let endpoint = endpoints.remove(from);
            endpoints.insert(target_index, endpoint);
        })?;

        debug!(url = url, from = from, to = target_index, "Reordered endpoint");
        Ok(true)
    }

    /// インポート候補をマージ
    ///
    /// 未登録URLの候補だけを候補順に末尾へ追加し、既存エントリは上書きしない。
    /// 書き込みはバッチ全体で1回。戻り値は実際に追加した件数。
    pub fn import_merge(&mut self, candidates: Vec<Endpoint>) -> RegistryResult<usize> {
        let mut seen: HashSet<String> = self.endpoints.iter().map(|e| e.url.clone()).collect();
        let fresh: Vec<Endpoint> = candidates
            .into_iter()
            .filter(|candidate| !candidate.url.is_empty() && seen.insert(candidate.url.clone()))
            .collect();

        let added = fresh.len();
        if added == 0 {
            debug!("Import contained no new endpoints");
            return Ok(0);
        }

        self.mutate(|endpoints| endpoints.extend(fresh))?;

        info!(added = added, total = self.endpoints.len(), "Merged imported endpoints");
        Ok(added)
    }

    /// 変更を適用してスナップショット全体を書き込む
    ///
    /// 書き込みに失敗した場合は変更前の状態に戻す。
    fn mutate<F>(&mut self, change: F) -> RegistryResult<()>
    where
        F: FnOnce(&mut Vec<Endpoint>),
    {
        let previous = self.endpoints.clone();
        change(&mut self.endpoints);

        if let Err(e) = self.persist() {
            warn!(error = %e, "Failed to persist endpoints, rolling back");
            self.endpoints = previous;
            return Err(e);
        }
        Ok(())
    }

    fn persist(&self) -> RegistryResult<()> {
        let snapshot = serde_json::to_string(&self.endpoints)
            .map_err(|e| AuraError::Storage(format!("failed to serialize endpoints: {}", e)))?;
        self.store.set(STORAGE_KEY, &snapshot)
    }
}

/// 保存済みスナップショットから空URL・重複URLを取り除く（先勝ち）
fn dedupe_saved(saved: Vec<Endpoint>) -> Vec<Endpoint> {
    let total = saved.len();
    let mut seen = HashSet::new();
    let endpoints: Vec<Endpoint> = saved
        .into_iter()
        .filter(|e| !e.url.is_empty() && seen.insert(e.url.clone()))
        .collect();
    if endpoints.len() != total {
        warn!(
            dropped = total - endpoints.len(),
            "Dropped invalid or duplicate saved endpoints"
        );
    }
    endpoints
}
