//! journal のエラー分類
//!
//! リモート失敗はクライアント境界でこの型（または空の結果）に変換され、UI 側へ panic や
//! 生の I/O エラーとしては出ていかない。

use common::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JournalError {
    /// 必須項目が空（送信は中断、状態は変更しない）
    #[error("Validation error: {0}")]
    Validation(String),
    /// サーバーに到達できない
    #[error("Server unreachable: {0}")]
    RemoteUnreachable(String),
    /// POST が 201 以外・通信失敗（ローカル保存へフォールバックする）
    #[error("Server write failed: {0}")]
    RemoteWriteFailed(String),
    /// DELETE 失敗（自動リトライはしない）
    #[error("Server delete failed: {0}")]
    RemoteDeleteFailed(String),
    /// ローカルストアへ書けない
    #[error("Local storage unavailable: {0}")]
    PersistenceUnavailable(String),
    /// 疎通確認のタイムアウト
    #[error("Connectivity probe timed out after {0} ms")]
    ProbeTimeout(u64),
    #[error("Entry not found: {0}")]
    NotFound(String),
    #[error("Export failed: {0}")]
    ExportFailed(String),
}

impl JournalError {
    /// 接続状態の判定上「オフライン」とみなす失敗か
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::RemoteUnreachable(_) | Self::ProbeTimeout(_))
    }
}

impl From<JournalError> for Error {
    fn from(e: JournalError) -> Self {
        let msg = e.to_string();
        match e {
            JournalError::Validation(_) | JournalError::NotFound(_) => Error::invalid_argument(msg),
            JournalError::RemoteUnreachable(_)
            | JournalError::RemoteWriteFailed(_)
            | JournalError::RemoteDeleteFailed(_) => Error::http(msg),
            JournalError::ProbeTimeout(_) => Error::timeout(msg),
            JournalError::PersistenceUnavailable(_) | JournalError::ExportFailed(_) => {
                Error::io_msg(msg)
            }
        }
    }
}
