//! ファイルベースのキーバリューストア
//!
//! キーごとに`<dir>/<key>.json`を1ファイルとして保存する。
//!
//! - 書き込みは一時ファイル→renameで行い、途中状態のファイルを残さない
//! - 複数プロセスからの同時書き込みはfs2の排他ロックで直列化する

use super::KeyValueStore;
use crate::common::error::{AuraError, RegistryResult};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// ロックファイル名
const LOCK_FILE_NAME: &str = ".aura.lock";

/// データディレクトリ配下にキーごとのファイルを持つストア
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// 指定ディレクトリを使うストアを作成（ディレクトリは初回書き込み時に作成）
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// データディレクトリ
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// キーに対応するファイルパス
    ///
    /// パス区切りなどを含むキーは拒否する。
    pub fn path_for(&self, key: &str) -> RegistryResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(AuraError::Storage(format!("invalid store key: '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn lock(&self) -> RegistryResult<File> {
        fs::create_dir_all(&self.dir)?;
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(self.dir.join(LOCK_FILE_NAME))?;
        FileExt::lock_exclusive(&file)?;
        Ok(file)
    }
}

/// ロックを解放する
///
/// 書き込みの成否は呼び出し側で確定済み。解放に失敗してもファイルを閉じればロックは外れる。
fn release(lock: File) {
    if let Err(e) = FileExt::unlock(&lock) {
        warn!(error = %e, "Failed to unlock store, releasing on close");
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> RegistryResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuraError::Storage(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> RegistryResult<()> {
        let path = self.path_for(key)?;
        let lock = self.lock()?;

        let tmp_path = path.with_extension("json.tmp");
        let result = (|| -> std::io::Result<()> {
            let mut tmp = File::create(&tmp_path)?;
            tmp.write_all(value.as_bytes())?;
            tmp.sync_all()?;
            fs::rename(&tmp_path, &path)
        })();

        release(lock);

        result.map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            AuraError::Storage(format!("failed to write {}: {}", path.display(), e))
        })?;

        debug!(key = key, bytes = value.len(), "Wrote store entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> RegistryResult<()> {
        let path = self.path_for(key)?;
        let lock = self.lock()?;
        let result = match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuraError::Storage(format!(
                "failed to remove {}: {}",
                path.display(),
                e
            ))),
        };
        release(lock);
        result
    }
}
