//! ProbeStatus / ProbeStateのUnit Test
//!
//! - loading → online / offline の遷移
//! - レイテンシ表示

use aura::types::endpoint::{ProbeState, ProbeStatus};
use chrono::Utc;

#[test]
fn test_probe_status_default_is_loading() {
    let status: ProbeStatus = Default::default();
    assert_eq!(status, ProbeStatus::Loading);
    assert_eq!(ProbeState::loading().status, ProbeStatus::Loading);
}

#[test]
fn test_probe_status_from_str() {
    assert_eq!("online".parse::<ProbeStatus>().unwrap(), ProbeStatus::Online);
    assert_eq!(
        "offline".parse::<ProbeStatus>().unwrap(),
        ProbeStatus::Offline
    );
    // 無効な文字列はLoadingにフォールバック
    assert_eq!(
        "unknown".parse::<ProbeStatus>().unwrap(),
        ProbeStatus::Loading
    );
}

#[test]
fn test_probe_status_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&ProbeStatus::Offline).unwrap(),
        "\"offline\""
    );
}

#[test]
fn test_offline_state_has_no_latency() {
    let now = Utc::now();
    let state = ProbeState::offline(now);
    assert_eq!(state.latency_ms, None);
    assert_eq!(state.last_checked_at, Some(now));
    assert_eq!(state.latency_label(), "--");
}

#[test]
fn test_online_state_reports_latency() {
    let state = ProbeState::online(128, Utc::now());
    assert_eq!(state.status, ProbeStatus::Online);
    assert_eq!(state.latency_label(), "128ms");
}
