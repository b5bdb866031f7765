//! 疎通確認の Outbound ポート

use crate::domain::JournalError;
use std::time::Duration;

/// キャッシュを通さずにサーバーへ到達できるかを確かめる
pub trait ReachabilityProbe: Send + Sync {
    /// 2xx が返れば Ok。タイムアウトは ProbeTimeout、それ以外は RemoteUnreachable
    fn head_probe(&self, timeout: Duration) -> Result<(), JournalError>;
}
