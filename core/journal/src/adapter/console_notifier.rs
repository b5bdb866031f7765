//! stderr へ通知を出す Notifier 実装
//!
//! stdout はコマンドの出力（一覧・JSON）に使うため、通知はすべて stderr に寄せる。

use crate::ports::outbound::Notifier;

pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// 1 行に整形する（本文が空ならタイトルのみ）
pub fn format_notice(title: &str, body: &str) -> String {
    if body.is_empty() {
        format!("[{}]", title)
    } else {
        format!("[{}] {}", title, body)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, body: &str) {
        eprintln!("{}", format_notice(title, body));
    }

    fn feedback(&self, title: &str, body: &str) {
        eprintln!("  {}", format_notice(title, body));
    }
}
