//! 監視ループの結合テスト（実HTTP）

use crate::support::{open_http_dashboard, wait_until};
use aura::events::MonitorEvent;
use aura::types::endpoint::ProbeStatus;
use std::time::Duration;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_monitoring_reports_online_and_offline() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = open_http_dashboard(dir.path());
    dashboard.add("Mock", &mock.uri()).unwrap();
    dashboard.add("Closed port", "http://127.0.0.1:1/").unwrap();

    dashboard.start_monitoring();
    assert_eq!(dashboard.scheduler().monitored_count(), 2);

    let uri = mock.uri();
    wait_until(Duration::from_secs(5), || {
        let online = dashboard
            .scheduler()
            .state(&uri)
            .is_some_and(|s| s.status == ProbeStatus::Online);
        let offline = dashboard
            .scheduler()
            .state("http://127.0.0.1:1/")
            .is_some_and(|s| s.status == ProbeStatus::Offline);
        online && offline
    })
    .await;

    let rows = dashboard.rows();
    let closed = rows
        .iter()
        .find(|row| row.endpoint.url == "http://127.0.0.1:1/")
        .unwrap();
    assert_eq!(closed.probe.latency_ms, None);
    assert!(closed.probe.last_checked_at.is_some());

    let mock_row = rows.iter().find(|row| row.endpoint.url == uri).unwrap();
    assert!(mock_row.probe.latency_ms.is_some());

    dashboard.teardown();
    assert_eq!(dashboard.scheduler().monitored_count(), 0);
}

#[tokio::test]
async fn test_removed_endpoint_is_no_longer_probed() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = open_http_dashboard(dir.path());
    let mut events = dashboard.subscribe();
    dashboard.add("Mock", &mock.uri()).unwrap();
    dashboard.start_monitoring();

    // 初回プローブの完了を待つ
    let completed = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let Ok(MonitorEvent::ProbeCompleted { status, .. }) = events.recv().await {
                return status;
            }
        }
    })
    .await
    .unwrap();
    assert_eq!(completed, ProbeStatus::Online);

    dashboard.remove(&mock.uri()).unwrap();
    assert!(dashboard.scheduler().state(&mock.uri()).is_none());
    let received_after_remove = mock.received_requests().await.unwrap().len();

    // 間隔（1秒）を超えて待ってもリクエストは増えない
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(
        mock.received_requests().await.unwrap().len(),
        received_after_remove
    );
}

#[tokio::test]
async fn test_check_probes_once_without_monitoring() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = open_http_dashboard(dir.path());
    dashboard.add("Mock", &mock.uri()).unwrap();

    let results = dashboard
        .scheduler()
        .check_all_parallel(&dashboard.registry().urls())
        .await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].1.status, ProbeStatus::Online);
    assert_eq!(dashboard.scheduler().monitored_count(), 0);
}
