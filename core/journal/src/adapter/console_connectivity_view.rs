//! 接続状態を端末に表示する ConnectivityView 実装

use crate::domain::ConnectivityState;
use crate::ports::outbound::ConnectivityView;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// ステータス行を stderr に出す（前回と同じ状態なら出さない）。
pub struct ConsoleConnectivityView {
    offline_mode: AtomicBool,
    shown: Mutex<Option<ConnectivityState>>,
}

impl ConsoleConnectivityView {
    pub fn new() -> Self {
        Self {
            offline_mode: AtomicBool::new(false),
            shown: Mutex::new(None),
        }
    }
}

impl Default for ConsoleConnectivityView {
    fn default() -> Self {
        Self::new()
    }
}

/// オフラインモード中は保存先がローカルだけになることも添える
pub fn status_line(state: ConnectivityState, offline_mode: bool) -> String {
    let dot = if state.is_online() { "●" } else { "○" };
    if offline_mode {
        format!("{} {} (entries are saved locally)", dot, state.label())
    } else {
        format!("{} {}", dot, state.label())
    }
}

impl ConnectivityView for ConsoleConnectivityView {
    fn set_offline_mode(&self, offline: bool) {
        self.offline_mode.store(offline, Ordering::Relaxed);
    }

    fn set_status(&self, state: ConnectivityState) {
        let mut shown = match self.shown.lock() {
            Ok(s) => s,
            Err(poisoned) => poisoned.into_inner(),
        };
        if *shown != Some(state) {
            let offline_mode = self.offline_mode.load(Ordering::Relaxed);
            eprintln!("{}", status_line(state, offline_mode));
            *shown = Some(state);
        }
    }
}
