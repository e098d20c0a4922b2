//! ダッシュボード操作と永続化の結合テスト
//!
//! FileStoreを使い、再起動（再オープン）後も状態が残ることを確認する。

use crate::support::open_file_dashboard;
use aura::common::AuraError;
use aura::types::endpoint::Endpoint;

fn names(dashboard: &aura::Dashboard) -> Vec<String> {
    dashboard.visible().iter().map(|e| e.name.clone()).collect()
}

#[test]
fn test_github_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = open_file_dashboard(dir.path());

    dashboard.add("Github API", "https://api.github.com").unwrap();
    dashboard.add("Status", "https://status.example").unwrap();
    assert_eq!(dashboard.toggle_pin("https://status.example").unwrap(), Some(true));

    let err = dashboard
        .add("Github again", "https://api.github.com")
        .unwrap_err();
    assert!(matches!(err, AuraError::DuplicateUrl(_)));
    assert_eq!(dashboard.registry().len(), 2);

    assert_eq!(names(&dashboard), vec!["Status", "Github API"]);

    dashboard.set_search("github");
    assert_eq!(names(&dashboard), vec!["Github API"]);

    dashboard.set_search("nothing");
    assert!(dashboard.visible().is_empty());
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut dashboard = open_file_dashboard(dir.path());
        for name in ["a", "b", "c"] {
            dashboard
                .add(name, &format!("https://{}.example", name))
                .unwrap();
        }
        dashboard.toggle_pin("https://b.example").unwrap();
        dashboard.reorder("https://c.example", 0).unwrap();
        dashboard.remove("https://a.example").unwrap();
    }

    let dashboard = open_file_dashboard(dir.path());
    assert_eq!(
        dashboard.registry().list(),
        &[
            Endpoint::new("c", "https://c.example"),
            Endpoint::new("b", "https://b.example").pinned(true),
        ]
    );
    // ピン留めは表示順だけに影響する
    assert_eq!(names(&dashboard), vec!["b", "c"]);
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("aura-projects.json"), "{not json").unwrap();

    let mut dashboard = open_file_dashboard(dir.path());
    assert!(dashboard.registry().is_empty());

    // 次の書き込みで正常なスナップショットに置き換わる
    dashboard.add("A", "https://a.example").unwrap();
    let reopened = open_file_dashboard(dir.path());
    assert_eq!(reopened.registry().len(), 1);
}

#[test]
fn test_snapshot_without_pin_flag_loads_unpinned() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("aura-projects.json"),
        r#"[{"name":"Legacy","url":"https://legacy.example"}]"#,
    )
    .unwrap();

    let dashboard = open_file_dashboard(dir.path());
    assert_eq!(
        dashboard.registry().list(),
        &[Endpoint::new("Legacy", "https://legacy.example")]
    );
}
