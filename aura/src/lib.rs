//! Aura ステータスボード
//!
//! 登録したエンドポイントへ定期的に到達性プローブを送り、
//! 状態とレイテンシを一覧表示する個人向けモニター

#![warn(missing_docs)]

/// 共通型定義（エラー型）
pub mod common;

/// エンドポイント・プローブ状態の型
pub mod types;

/// キーバリューストア（永続化）
pub mod storage;

/// エンドポイント登録管理
pub mod registry;

/// 表示用の射影（検索・ピン留め優先の並び替え）
pub mod view;

/// バックアップのエクスポート/インポート
pub mod backup;

/// 監視イベントバス
pub mod events;

/// ヘルスチェック監視（到達性プローブ・スケジューラ）
pub mod health;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// ロギング初期化ユーティリティ
pub mod logging;

/// ダッシュボード（レジストリとスケジューラの結線）
pub mod dashboard;

/// 協調的シャットダウン
pub mod shutdown;

/// CLIサブコマンド
pub mod cli;

pub use dashboard::{Dashboard, DashboardRow};
