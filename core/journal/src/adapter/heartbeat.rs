//! ハートビートの起動（watch コマンド用）
//!
//! 2 本の PeriodicTask を持つ:
//! - heartbeat: 設定間隔ごとに ConnectivityMonitor::tick
//! - hardware: 1 秒ごとに HardwareStatus を見て、変化したときだけイベントを上げる

use crate::adapter::PeriodicTask;
use crate::ports::outbound::HardwareStatus;
use crate::usecase::ConnectivityMonitor;
use common::error::Error;
use std::sync::Arc;
use std::time::Duration;

pub const HARDWARE_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub struct Heartbeat {
    tasks: Vec<PeriodicTask>,
}

impl Heartbeat {
    pub fn start(
        monitor: Arc<ConnectivityMonitor>,
        hardware: Arc<dyn HardwareStatus>,
        interval: Duration,
    ) -> Result<Self, Error> {
        Self::start_with_poll(monitor, hardware, interval, HARDWARE_POLL_INTERVAL)
    }

    pub fn start_with_poll(
        monitor: Arc<ConnectivityMonitor>,
        hardware: Arc<dyn HardwareStatus>,
        interval: Duration,
        poll: Duration,
    ) -> Result<Self, Error> {
        let m = Arc::clone(&monitor);
        let heartbeat = PeriodicTask::spawn("journal-heartbeat", interval, move || {
            m.tick();
        })?;

        let mut last = hardware.is_online();
        let hardware_task = PeriodicTask::spawn("journal-hardware", poll, move || {
            let now = hardware.is_online();
            if now != last {
                last = now;
                if now {
                    monitor.on_hardware_online();
                } else {
                    monitor.on_hardware_offline();
                }
            }
        })?;

        Ok(Self {
            tasks: vec![heartbeat, hardware_task],
        })
    }

    /// 両方のタスクを止めて終了を待つ
    pub fn cancel(&mut self) {
        for task in &mut self.tasks {
            task.cancel();
        }
    }
}
