//! エクスポート文書（ローカル + サーバーのスナップショット）

use crate::domain::date::datetime_from_ms;
use crate::domain::{LocalEntry, RemoteReflection};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub exported_at: String,
    pub total_entries: usize,
    pub local_storage_entries: Vec<LocalEntry>,
    pub server_reflections: Vec<RemoteReflection>,
}

impl ExportDocument {
    pub fn new(
        exported_at: String,
        local_storage_entries: Vec<LocalEntry>,
        server_reflections: Vec<RemoteReflection>,
    ) -> Self {
        Self {
            exported_at,
            total_entries: local_storage_entries.len() + server_reflections.len(),
            local_storage_entries,
            server_reflections,
        }
    }
}

/// journal-export-<YYYY-MM-DD>.json（UTC の日付）
pub fn export_file_name(now_ms: u64) -> String {
    let day = datetime_from_ms(now_ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown-date".to_string());
    format!("journal-export-{}.json", day)
}
