//! バックアップのエクスポート/インポート
//!
//! 形式は永続化スナップショットと同じJSON配列（整形出力）:
//!
//! ```json
//! [
//!   {
//!     "name": "Github API",
//!     "url": "https://api.github.com",
//!     "isPinned": false
//!   }
//! ]
//! ```

use crate::common::error::{AuraError, RegistryResult};
use crate::types::endpoint::Endpoint;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

/// バックアップファイル名の接頭辞
pub const BACKUP_FILE_PREFIX: &str = "aura-backup";

/// バックアップファイルの拡張子
pub const BACKUP_FILE_EXTENSION: &str = "json";

/// エンドポイント一覧を整形済みJSONに変換（並び順を保持、一時的な状態は含めない）
pub fn export(endpoints: &[Endpoint]) -> RegistryResult<String> {
    serde_json::to_string_pretty(endpoints)
        .map_err(|e| AuraError::Storage(format!("failed to serialize backup: {}", e)))
}

/// バックアップテキストをインポート候補に変換
///
/// JSONでない、トップレベルが配列でない、要素がオブジェクトでない場合は`Parse`で拒否する。
/// オブジェクト内の形の違いは許容する:
///
/// - 未知のフィールドは無視
/// - `isPinned`が無い（または真偽値でない）場合は`false`
/// - `url`が無い・空の要素は捨てる
/// - `name`が無い・空の場合はURLを名前にする
pub fn import(text: &str) -> RegistryResult<Vec<Endpoint>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| AuraError::Parse(format!("backup is not valid JSON: {}", e)))?;

    let Value::Array(items) = value else {
        return Err(AuraError::Parse(
            "backup must be a JSON array of endpoints".to_string(),
        ));
    };

    let total = items.len();
    let mut candidates = Vec::with_capacity(total);
    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(fields) = item else {
            return Err(AuraError::Parse(format!(
                "backup entry {} is not an object",
                index
            )));
        };

        let text_field = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let Some(url) = text_field("url") else {
            continue;
        };
        let name = text_field("name").unwrap_or_else(|| url.clone());
        let is_pinned = fields
            .get("isPinned")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        candidates.push(Endpoint::new(name, url).pinned(is_pinned));
    }

    debug!(
        entries = total,
        candidates = candidates.len(),
        "Parsed backup"
    );
    Ok(candidates)
}

/// バックアップファイル名（`aura-backup-YYYY-MM-DD.json`）
pub fn backup_file_name(date: NaiveDate) -> String {
    format!(
        "{}-{}.{}",
        BACKUP_FILE_PREFIX,
        date.format("%Y-%m-%d"),
        BACKUP_FILE_EXTENSION
    )
}
