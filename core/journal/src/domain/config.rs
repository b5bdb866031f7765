//! config.json の型と既定値

use crate::domain::cache::{is_valid_cache_name, DEFAULT_CACHE_NAME, DEFAULT_STATIC_ASSETS};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 1200;

/// 設定。すべてのキーは省略可能。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JournalConfig {
    pub server_url: String,
    pub heartbeat_interval_ms: u64,
    pub probe_timeout_ms: u64,
    pub cache_name: String,
    pub static_assets: Vec<String>,
    /// true ならリモート通信をキャッシュ層経由にする
    pub offline_cache: bool,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            heartbeat_interval_ms: DEFAULT_HEARTBEAT_INTERVAL_MS,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            cache_name: DEFAULT_CACHE_NAME.to_string(),
            static_assets: DEFAULT_STATIC_ASSETS.iter().map(|s| s.to_string()).collect(),
            offline_cache: true,
        }
    }
}

impl JournalConfig {
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// server_url を解釈する。http / https でホストを持つ URL だけを受け付ける。
    pub fn parsed_server_url(&self) -> Result<Url, String> {
        let url = Url::parse(&self.server_url)
            .map_err(|e| format!("Invalid server_url '{}': {}", self.server_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "server_url must use http or https (got '{}')",
                self.server_url
            ));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(format!("server_url has no host (got '{}')", self.server_url));
        }
        Ok(url)
    }

    /// 値の整合性チェック。問題があればメッセージを返す。
    pub fn validate(&self) -> Result<(), String> {
        self.parsed_server_url()?;
        if self.heartbeat_interval_ms == 0 {
            return Err("heartbeat_interval_ms must be greater than 0".to_string());
        }
        if self.probe_timeout_ms == 0 {
            return Err("probe_timeout_ms must be greater than 0".to_string());
        }
        if !is_valid_cache_name(&self.cache_name) {
            return Err(format!(
                "cache_name may only contain ASCII letters, digits, '-', '_' and '.' (got '{}')",
                self.cache_name
            ));
        }
        Ok(())
    }
}
