//! ローカルエントリストア（KeyValueStore の 1 スロットに JSON 配列を丸ごと保存）
//!
//! 書き込みは毎回スロット全体の読み込み → 変更 → 書き戻し。書き手は 1 プロセスのみ。

use crate::domain::date::{iso_timestamp, local_date_string};
use crate::domain::{JournalError, LocalEntry, NewEntry};
use crate::ports::outbound::LocalEntryRepository;
use common::ports::outbound::{Clock, KeyValueStore, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// エントリ配列を保存するキー
pub const ENTRIES_KEY: &str = "learningJournalEntries";

pub struct LocalEntryStore {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
}

impl LocalEntryStore {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, log: Arc<dyn Log>) -> Self {
        Self { store, clock, log }
    }

    fn warn(&self, message: &str, detail: String) {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Warn, message)
                .layer("adapter")
                .kind("store")
                .field("key", ENTRIES_KEY)
                .field("detail", detail),
        );
    }

    fn persist(&self, entries: &[LocalEntry]) -> Result<(), JournalError> {
        let json = serde_json::to_string(entries)
            .map_err(|e| JournalError::PersistenceUnavailable(e.to_string()))?;
        self.store
            .set(ENTRIES_KEY, &json)
            .map_err(|e| JournalError::PersistenceUnavailable(e.to_string()))
    }
}

impl LocalEntryRepository for LocalEntryStore {
    fn save(&self, entry: NewEntry) -> Result<LocalEntry, JournalError> {
        let mut entries = self.list();
        let now = self.clock.now_ms();
        // 同じミリ秒に 2 件作っても id が重複・逆転しないようにする
        let id = match entries.iter().map(|e| e.id).max() {
            Some(max) if max >= now => max.checked_add(1).ok_or_else(|| {
                JournalError::PersistenceUnavailable(format!("no id left after {}", max))
            })?,
            _ => now,
        };
        let saved = LocalEntry {
            id,
            reflection: Some(entry.content.clone()),
            title: entry.title,
            content: entry.content,
            tags: entry.tags,
            date: local_date_string(now),
            timestamp: Some(iso_timestamp(now)),
        };
        entries.insert(0, saved.clone());
        self.persist(&entries)?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "local entry saved")
                .layer("adapter")
                .kind("store")
                .field("id", saved.id)
                .field("count", entries.len()),
        );
        Ok(saved)
    }

    fn list(&self) -> Vec<LocalEntry> {
        let raw = match self.store.get(ENTRIES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                self.warn("local store unreadable", e.to_string());
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                self.warn("local store malformed; treating as empty", e.to_string());
                Vec::new()
            }
        }
    }

    fn delete_by_id(&self, id: u64) -> Result<bool, JournalError> {
        let mut entries = self.list();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.persist(&entries)?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "local entry deleted")
                .layer("adapter")
                .kind("store")
                .field("id", id),
        );
        Ok(true)
    }

    fn get_by_id(&self, id: u64) -> Option<LocalEntry> {
        self.list().into_iter().find(|e| e.id == id)
    }
}
