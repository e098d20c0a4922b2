//! エンドポイント登録管理
//!
//! エンドポイントの順序付きリストをメモリ内で管理し、キーバリューストアと同期

pub mod endpoints;

pub use endpoints::{EndpointRegistry, STORAGE_KEY};
