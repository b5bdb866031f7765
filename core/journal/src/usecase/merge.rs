//! ローカルとサーバーのエントリを 1 本の一覧にまとめる

use crate::domain::date::newest_first;
use crate::domain::{Entry, LocalEntry, RemoteReflection};

/// ローカル（そのまま）→ リモート（変換）の順に連結し、日付の新しい順に安定ソートする。
///
/// 同じ日付ならローカルが先。日付が解析できないものは末尾。
pub fn merge_entries(local: &[LocalEntry], remote: &[RemoteReflection]) -> Vec<Entry> {
    let mut merged: Vec<Entry> = local
        .iter()
        .map(Entry::from_local)
        .chain(
            remote
                .iter()
                .enumerate()
                .map(|(index, record)| Entry::from_remote(record, index)),
        )
        .collect();
    merged.sort_by(|a, b| newest_first(a.sort_key, b.sort_key));
    merged
}
