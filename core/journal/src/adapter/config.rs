//! config.json の読み込み（adapter 層）

use crate::domain::JournalConfig;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::Path;

/// 設定ファイルを読む。無ければ既定値。壊れていれば usage エラー。
pub fn load_config(fs: &dyn FileSystem, path: &Path) -> Result<JournalConfig, Error> {
    if !fs.exists(path) {
        return Ok(JournalConfig::default());
    }
    let content = fs.read_to_string(path)?;
    let config: JournalConfig = serde_json::from_str(&content).map_err(|e| {
        Error::invalid_argument(format!("Invalid config {}: {}", path.display(), e))
    })?;
    config.validate().map_err(|msg| {
        Error::invalid_argument(format!("Invalid config {}: {}", path.display(), msg))
    })?;
    Ok(config)
}

/// server_url の上書き（--server が JOURNAL_SERVER より優先）
pub fn apply_server_override(
    mut config: JournalConfig,
    env_server: Option<String>,
    flag_server: Option<String>,
) -> Result<JournalConfig, Error> {
    if let Some(url) = flag_server.or(env_server).filter(|s| !s.trim().is_empty()) {
        config.server_url = url.trim().to_string();
        config
            .validate()
            .map_err(Error::invalid_argument)?;
    }
    Ok(config)
}
