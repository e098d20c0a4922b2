//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! どのエラーもプロセスを終了させない。レジストリは変更されないまま残り、
//! 呼び出し側が`user_message()`でユーザー向けの短い文言を得られる。

use thiserror::Error;

/// Aura error type
#[derive(Debug, Error)]
pub enum AuraError {
    /// Empty name or url on add
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Url already registered
    #[error("Endpoint already registered: {0}")]
    DuplicateUrl(String),

    /// Malformed backup text
    #[error("Parse error: {0}")]
    Parse(String),

    /// Key-value store failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AuraError {
    /// Returns a short message suitable for showing to the user.
    ///
    /// The `Display` implementation carries the full detail and is meant for logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "Name and URL are both required",
            Self::DuplicateUrl(_) => "This URL is already being monitored",
            Self::Parse(_) => "The backup file could not be read",
            Self::Storage(_) => "Saved endpoints could not be written",
        }
    }

    /// Returns a stable machine-readable kind string.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::DuplicateUrl(_) => "duplicate_url",
            Self::Parse(_) => "parse_error",
            Self::Storage(_) => "storage_error",
        }
    }
}

impl From<std::io::Error> for AuraError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result alias used by the registry and codec
pub type RegistryResult<T> = Result<T, AuraError>;
