//! バックアップファイル経由のエクスポート/インポート

use crate::support::open_file_dashboard;
use aura::backup::backup_file_name;
use aura::common::AuraError;
use chrono::NaiveDate;

#[test]
fn test_export_file_restores_into_new_data_dir() {
    let source_dir = tempfile::tempdir().unwrap();
    let target_dir = tempfile::tempdir().unwrap();
    let backup_dir = tempfile::tempdir().unwrap();

    let mut source = open_file_dashboard(source_dir.path());
    source.add("Github API", "https://api.github.com").unwrap();
    source.add("Docs", "https://docs.example").unwrap();
    source.toggle_pin("https://docs.example").unwrap();

    let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    let path = backup_dir.path().join(backup_file_name(date));
    std::fs::write(&path, source.export_backup().unwrap()).unwrap();
    assert!(path.ends_with("aura-backup-2024-03-09.json"));

    let mut target = open_file_dashboard(target_dir.path());
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(target.import_backup(&text).unwrap(), 2);
    assert_eq!(target.registry().list(), source.registry().list());

    // 2回目は全件既存なので追加なし
    assert_eq!(target.import_backup(&text).unwrap(), 0);
}

#[test]
fn test_import_keeps_existing_entries() {
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = open_file_dashboard(dir.path());
    dashboard.add("Mine", "https://a.example").unwrap();

    let added = dashboard
        .import_backup(
            r#"[
                {"name": "Theirs", "url": "https://a.example", "isPinned": true},
                {"name": "New", "url": "https://b.example"},
                {"name": "No url"},
                {"url": "https://c.example", "extra": 1}
            ]"#,
        )
        .unwrap();
    assert_eq!(added, 2);

    let list = dashboard.registry().list();
    assert_eq!(list[0].name, "Mine");
    assert!(!list[0].is_pinned);
    assert_eq!(list[1].name, "New");
    assert_eq!(list[2].name, "https://c.example");
}

#[test]
fn test_import_rejects_non_array_and_leaves_registry() {
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = open_file_dashboard(dir.path());
    dashboard.add("Mine", "https://a.example").unwrap();

    for text in ["not json", r#"{"url": "https://b.example"}"#, "[1, 2]"] {
        let err = dashboard.import_backup(text).unwrap_err();
        assert!(matches!(err, AuraError::Parse(_)), "text: {text}");
    }
    assert_eq!(dashboard.registry().len(), 1);

    let reopened = open_file_dashboard(dir.path());
    assert_eq!(reopened.registry().len(), 1);
}
