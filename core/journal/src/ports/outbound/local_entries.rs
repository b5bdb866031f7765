//! ローカルエントリストアの Outbound ポート

use crate::domain::{JournalError, LocalEntry, NewEntry};

/// ローカルに作成したエントリを所有するストア
///
/// 実装は `adapter::LocalEntryStore`（KeyValueStore の 1 スロットに配列を丸ごと保存）。
pub trait LocalEntryRepository: Send + Sync {
    /// id / date を割り当てて先頭に追加し、保存した 1 件を返す
    fn save(&self, entry: NewEntry) -> Result<LocalEntry, JournalError>;
    /// 保存済みの全件（新しい順）。読めないときは空
    fn list(&self) -> Vec<LocalEntry>;
    /// 一致する id を削除する。削除したら true、無ければ何もせず false
    fn delete_by_id(&self, id: u64) -> Result<bool, JournalError>;
    fn get_by_id(&self, id: u64) -> Option<LocalEntry>;
}
