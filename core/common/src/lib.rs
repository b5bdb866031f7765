//! journal 共通ライブラリ
//!
//! エラー型・ポート（trait）・標準アダプターを提供する。
//! journal バイナリはここの trait を通してのみ外界に触れる。

/// エラーハンドリング
pub mod error;

/// 共通ドメイン型
pub mod domain;

/// Outbound ポート
pub mod ports;

/// ポートの標準実装
pub mod adapter;
