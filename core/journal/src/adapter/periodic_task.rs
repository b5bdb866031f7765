//! 一定間隔で処理を繰り返すバックグラウンドスレッド
//!
//! cancel()（または drop）で停止要求を送り、スレッドの終了を待つ。
//! 停止要求は待機中でもすぐに届く（recv_timeout で待つため）。

use common::error::Error;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

pub struct PeriodicTask {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    /// `interval` ごとに `tick` を呼ぶスレッドを起動する。最初の呼び出しは 1 間隔後。
    pub fn spawn<F>(name: &str, interval: Duration, mut tick: F) -> Result<Self, Error>
    where
        F: FnMut() + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<()>();
        let handle = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || loop {
                match rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => tick(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .map_err(|e| Error::system(format!("failed to spawn {}: {}", name, e)))?;
        Ok(Self {
            stop: Some(tx),
            handle: Some(handle),
        })
    }

    /// 停止してスレッドの終了を待つ。2 回目以降は何もしない。
    pub fn cancel(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
