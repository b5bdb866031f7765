//! ユーザー通知の Outbound ポート

/// ユーザーへの通知
///
/// usecase は stderr やデスクトップ通知に直接触れず、この trait 経由で知らせる。
pub trait Notifier: Send + Sync {
    /// 操作結果の通知（システム通知 + トースト）
    fn notify(&self, title: &str, body: &str);
    /// 画面内のトーストのみ（検証エラー・接続状態の変化など）
    fn feedback(&self, title: &str, body: &str);
}
