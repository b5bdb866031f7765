//! 接続状態の表示先（ステータスドットとオフライン表示）

use crate::domain::ConnectivityState;

pub trait ConnectivityView: Send + Sync {
    /// ルートコンテナの「オフラインモード」表示を切り替える
    fn set_offline_mode(&self, offline: bool);
    /// ステータス表示を更新する
    fn set_status(&self, state: ConnectivityState);
}
