//! サーバーのリフレクション API クライアント
//!
//! すべての失敗はこの境界で型付きの結果か空配列に変換する。呼び出し間で状態は持たない。

use crate::domain::cache::{join_url, REFLECTIONS_PATH};
use crate::domain::{JournalError, NewEntry, RemoteReflection};
use crate::ports::outbound::{ReachabilityProbe, ReflectionRepository};
use common::error::Error;
use common::ports::outbound::{HttpRequest, HttpTransport, Log, LogLevel, LogRecord};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub struct RemoteReflectionClient {
    transport: Arc<dyn HttpTransport>,
    /// `<server>/api/reflections`
    collection: Url,
    log: Arc<dyn Log>,
}

impl RemoteReflectionClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: &Url,
        log: Arc<dyn Log>,
    ) -> Result<Self, Error> {
        let collection = join_url(base_url, REFLECTIONS_PATH).map_err(|e| {
            Error::invalid_argument(format!("Invalid server URL '{}': {}", base_url, e))
        })?;
        Ok(Self {
            transport,
            collection,
            log,
        })
    }

    fn collection_url(&self) -> String {
        self.collection.to_string()
    }

    fn item_url(&self, index: usize) -> String {
        let mut url = self.collection.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&index.to_string());
        }
        url.to_string()
    }

    fn log_failure(&self, op: &str, detail: &str) {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Warn, format!("remote {} failed", op))
                .layer("adapter")
                .kind("remote")
                .field("detail", detail),
        );
    }
}

impl ReflectionRepository for RemoteReflectionClient {
    fn list(&self) -> Vec<RemoteReflection> {
        let response = match self.transport.send(&HttpRequest::get(self.collection_url())) {
            Ok(r) => r,
            Err(e) => {
                self.log_failure("list", &e.to_string());
                return Vec::new();
            }
        };
        if !response.is_ok() {
            self.log_failure("list", &format!("HTTP {}", response.status));
            return Vec::new();
        }
        match response.json::<Vec<RemoteReflection>>() {
            Ok(records) => records,
            Err(e) => {
                self.log_failure("list", &format!("malformed body: {}", e));
                Vec::new()
            }
        }
    }

    fn create(&self, entry: &NewEntry) -> Result<(), JournalError> {
        let request = HttpRequest::post_json(self.collection_url(), &entry.to_remote_body())
            .map_err(|e| JournalError::RemoteWriteFailed(e.to_string()))?;
        match self.transport.send(&request) {
            Ok(response) if response.status == 201 => Ok(()),
            Ok(response) => {
                let detail = format!("HTTP {}", response.status);
                self.log_failure("create", &detail);
                Err(JournalError::RemoteWriteFailed(detail))
            }
            Err(e) => {
                self.log_failure("create", &e.to_string());
                Err(JournalError::RemoteWriteFailed(e.to_string()))
            }
        }
    }

    fn delete_by_index(&self, index: usize) -> Result<(), JournalError> {
        let url = self.item_url(index);
        match self.transport.send(&HttpRequest::delete(url)) {
            Ok(response) if response.is_ok() => Ok(()),
            Ok(response) => {
                let detail = format!("HTTP {}", response.status);
                self.log_failure("delete", &detail);
                Err(JournalError::RemoteDeleteFailed(detail))
            }
            Err(e) => {
                self.log_failure("delete", &e.to_string());
                Err(JournalError::RemoteDeleteFailed(e.to_string()))
            }
        }
    }
}

impl ReachabilityProbe for RemoteReflectionClient {
    fn head_probe(&self, timeout: Duration) -> Result<(), JournalError> {
        let request = HttpRequest::head(self.collection_url())
            .header("Cache-Control", "no-store")
            .header("Pragma", "no-cache")
            .with_timeout(timeout);
        match self.transport.send(&request) {
            Ok(response) if response.is_ok() => Ok(()),
            Ok(response) => Err(JournalError::RemoteUnreachable(format!(
                "HTTP {}",
                response.status
            ))),
            Err(Error::Timeout(_)) => Err(JournalError::ProbeTimeout(timeout.as_millis() as u64)),
            Err(e) => Err(JournalError::RemoteUnreachable(e.to_string())),
        }
    }
}
