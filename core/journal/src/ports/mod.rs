//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（ストア・サーバー・通知・表示・キャッシュ）を使うための trait

pub mod inbound;
pub mod outbound;
