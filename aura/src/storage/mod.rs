//! 永続化キーバリューストア
//!
//! レジストリはスナップショット全体を1つのキーに対して読み書きするだけなので、
//! ストアに求めるのは`get`/`set`/`remove`のみ（トランザクションなし）。

pub mod file;

pub use file::FileStore;

use crate::common::error::{AuraError, RegistryResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 文字列キーのキーバリューストア
pub trait KeyValueStore: Send + Sync {
    /// 値を取得（未設定なら`None`）
    fn get(&self, key: &str) -> RegistryResult<Option<String>>;
    /// 値を丸ごと置き換える
    fn set(&self, key: &str, value: &str) -> RegistryResult<()>;
    /// 値を削除（未設定でもエラーにしない）
    fn remove(&self, key: &str) -> RegistryResult<()>;
}

/// プロセス内メモリのストア
///
/// クローンは同じ内容を共有する。テストや一時的なダッシュボードで使用。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値を1件持つストアを作成
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> RegistryResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| AuraError::Storage(format!("memory store poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RegistryResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| AuraError::Storage(format!("memory store poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> RegistryResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| AuraError::Storage(format!("memory store poisoned: {}", e)))?;
        entries.remove(key);
        Ok(())
    }
}
