//! 破壊的操作の確認 Port

/// 確認結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Declined,
}

/// ユーザーに確認を求める（adapter で実装）
pub trait Confirmation: Send + Sync {
    fn confirm(&self, message: &str) -> Decision;
}
