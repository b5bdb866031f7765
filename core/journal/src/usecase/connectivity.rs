//! 接続状態モニタ（ハートビート）
//!
//! Online / Offline の 2 状態。端末のネットワークイベントは当てにならないため、
//! 定期 tick ごとにサーバーへ HEAD を送って実際の到達性で状態を決める。
//! 状態が変わったときだけトーストを出す（同じ状態の tick では通知しない）。

use crate::domain::{ConnectivityState, JournalError};
use crate::ports::outbound::{ConnectivityView, Notifier, ReachabilityProbe};
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct ConnectivityDeps {
    pub probe: Arc<dyn ReachabilityProbe>,
    pub view: Arc<dyn ConnectivityView>,
    pub notifier: Arc<dyn Notifier>,
    pub log: Arc<dyn Log>,
}

#[derive(Debug)]
struct MonitorState {
    current: ConnectivityState,
    hardware_online: bool,
}

pub struct ConnectivityMonitor {
    deps: ConnectivityDeps,
    probe_timeout: Duration,
    state: Mutex<MonitorState>,
}

impl ConnectivityMonitor {
    /// 初期状態は端末の報告どおり。表示は反映するがトーストは出さない。
    pub fn new(deps: ConnectivityDeps, probe_timeout: Duration, hardware_online: bool) -> Self {
        let initial = ConnectivityState::from_online(hardware_online);
        deps.view.set_offline_mode(!initial.is_online());
        deps.view.set_status(initial);
        Self {
            deps,
            probe_timeout,
            state: Mutex::new(MonitorState {
                current: initial,
                hardware_online,
            }),
        }
    }

    pub fn state(&self) -> ConnectivityState {
        match self.state.lock() {
            Ok(s) => s.current,
            Err(poisoned) => poisoned.into_inner().current,
        }
    }

    /// 端末が offline を報告した。プローブせずに即 Offline。
    pub fn on_hardware_offline(&self) -> ConnectivityState {
        self.set_hardware(false);
        self.apply(ConnectivityState::Offline, "hardware")
    }

    /// 端末が online を報告した。実際に届くかはプローブで確かめる。
    pub fn on_hardware_online(&self) -> ConnectivityState {
        self.set_hardware(true);
        self.probe_now("hardware")
    }

    /// 定期 tick。端末が offline のままならプローブしない。
    pub fn tick(&self) -> ConnectivityState {
        let hardware_online = match self.state.lock() {
            Ok(s) => s.hardware_online,
            Err(poisoned) => poisoned.into_inner().hardware_online,
        };
        if !hardware_online {
            return self.apply(ConnectivityState::Offline, "tick");
        }
        self.probe_now("tick")
    }

    /// 1 回だけプローブして状態を更新する
    pub fn check(&self) -> ConnectivityState {
        self.probe_now("check")
    }

    fn set_hardware(&self, online: bool) {
        match self.state.lock() {
            Ok(mut s) => s.hardware_online = online,
            Err(poisoned) => poisoned.into_inner().hardware_online = online,
        }
    }

    fn probe_now(&self, trigger: &str) -> ConnectivityState {
        // プローブ中はロックを持たない（最大 probe_timeout かかる）
        let next = match self.deps.probe.head_probe(self.probe_timeout) {
            Ok(()) => ConnectivityState::Online,
            Err(e) => {
                let detail = match &e {
                    JournalError::ProbeTimeout(ms) => format!("timeout after {} ms", ms),
                    other => other.to_string(),
                };
                let _ = self.deps.log.log(
                    &LogRecord::new(LogLevel::Debug, "probe failed")
                        .layer("usecase")
                        .kind("connectivity")
                        .field("trigger", trigger)
                        .field("detail", detail),
                );
                ConnectivityState::Offline
            }
        };
        self.apply(next, trigger)
    }

    fn apply(&self, next: ConnectivityState, trigger: &str) -> ConnectivityState {
        let (previous, next) = {
            let mut s = match self.state.lock() {
                Ok(s) => s,
                Err(poisoned) => poisoned.into_inner(),
            };
            // プローブ中に端末が offline を報告していたら、その結果では Online に戻さない
            let next = if s.hardware_online {
                next
            } else {
                ConnectivityState::Offline
            };
            let previous = s.current;
            s.current = next;
            (previous, next)
        };
        self.deps.view.set_offline_mode(!next.is_online());
        self.deps.view.set_status(next);
        if previous != next {
            let _ = self.deps.log.log(
                &LogRecord::new(LogLevel::Info, "connectivity changed")
                    .layer("usecase")
                    .kind("connectivity")
                    .field("from", previous.label())
                    .field("to", next.label())
                    .field("trigger", trigger),
            );
            match next {
                ConnectivityState::Online => self
                    .deps
                    .notifier
                    .feedback("Back Online", "Connection to the server restored."),
                ConnectivityState::Offline => self
                    .deps
                    .notifier
                    .feedback("You are offline", "Entries will be saved locally."),
            }
        }
        next
    }
}
