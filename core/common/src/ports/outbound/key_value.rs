//! キー値ストア Outbound ポート
//!
//! 1 キーにつき 1 つの文字列スロット。書き込みは常にスロット全体の置き換え。

use crate::error::Error;

/// 永続キー値ストア
///
/// 実装は `FileKeyValueStore`（キーごとの JSON ファイル）や `MemoryKeyValueStore`（テスト用）。
pub trait KeyValueStore: Send + Sync {
    /// キーの値を返す。未保存なら None
    fn get(&self, key: &str) -> Result<Option<String>, Error>;
    /// キーの値を丸ごと置き換える
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
    /// キーを削除する。存在しなければ何もしない
    fn remove(&self, key: &str) -> Result<(), Error>;
}
