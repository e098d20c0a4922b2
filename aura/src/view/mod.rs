//! 表示用プロジェクション
//!
//! レジストリの並びと検索語から表示順を導出する純粋関数

use crate::types::endpoint::Endpoint;

/// 検索語で絞り込み、ピン留めを先頭に並べ替える
///
/// - 名前に検索語を含むもの（大文字小文字を区別しない）だけを残す。空の検索語は全件一致
/// - ピン留めグループ→非ピン留めグループの順。各グループ内はレジストリの順序を保つ
pub fn project<'a>(endpoints: &'a [Endpoint], search_term: &str) -> Vec<&'a Endpoint> {
    let needle = search_term.to_lowercase();
    let (pinned, unpinned): (Vec<&Endpoint>, Vec<&Endpoint>) = endpoints
        .iter()
        .filter(|endpoint| matches_search(endpoint, &needle))
        .partition(|endpoint| endpoint.is_pinned);

    pinned.into_iter().chain(unpinned).collect()
}

/// 名前が（小文字化済みの）検索語を含むか
fn matches_search(endpoint: &Endpoint, needle: &str) -> bool {
    needle.is_empty() || endpoint.name.to_lowercase().contains(needle)
}
