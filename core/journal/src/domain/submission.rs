//! 送信 1 回分の状態遷移と、マージ済みビュー

use crate::domain::{Entry, LocalEntry};

/// Idle → Submitting → Saved → Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    /// remote: サーバーにも保存できたか（false ならローカルのみ）
    Saved { remote: bool },
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Saved { remote: true } => "saved_remote_and_local",
            Self::Saved { remote: false } => "saved_local_only",
        }
    }
}

/// マージ済みの一覧
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JournalView {
    /// 新しい順
    pub entries: Vec<Entry>,
    /// 取得できたサーバー側の件数（"Total Server Reflections"）
    pub server_count: usize,
}

/// 送信結果
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub entry: LocalEntry,
    pub remote_saved: bool,
    pub view: JournalView,
}

/// サーバー側削除の結果
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteDeleteOutcome {
    /// 確認で取りやめた
    Cancelled,
    Deleted(JournalView),
}
