//! ヘルスチェックモニター
//!
//! 登録済みURLごとに到達性とレイテンシを定期的に計測する。
//! プローブはHTTPのやり取りが完了したかどうかだけを見る（ステータスコードは見ない）。

pub mod prober;
pub mod scheduler;

pub use prober::{measure, HttpProbe, Probe, ProbeError};
pub use scheduler::ProbeScheduler;
