//! 端末側のネットワーク状態（ブラウザの navigator.onLine に相当）

/// OS から見たネットワーク接続の有無
///
/// 実際にサーバーへ届くかは保証しない。ハートビートが補う。
pub trait HardwareStatus: Send + Sync {
    fn is_online(&self) -> bool;
}
