//! サーバー側リフレクション一覧の Outbound ポート

use crate::domain::{JournalError, NewEntry, RemoteReflection};

/// リモートのリフレクション一覧（読み取り・作成・位置指定削除）
///
/// 実装は状態を持たない。呼び出しのたびにサーバーへ問い合わせる。
pub trait ReflectionRepository: Send + Sync {
    /// 取得できなければ空。「空」と「到達不能」は区別しない
    fn list(&self) -> Vec<RemoteReflection>;
    /// 201 のときだけ Ok。それ以外は RemoteWriteFailed
    fn create(&self, entry: &NewEntry) -> Result<(), JournalError>;
    /// 2xx のときだけ Ok。それ以外は RemoteDeleteFailed
    fn delete_by_index(&self, index: usize) -> Result<(), JournalError>;
}
