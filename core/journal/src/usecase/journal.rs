//! 送信・再読み込み・削除・エクスポートのオーケストレーション
//!
//! 送信はサーバー → ローカルの順に逐次実行する。サーバー側は成功すれば儲けもの、
//! ローカル保存は結果にかかわらず必ず行う（二重書き込み）。

use crate::domain::date::iso_timestamp;
use crate::domain::export::export_file_name;
use crate::domain::{
    Entry, ExportDocument, JournalError, JournalView, RemoteDeleteOutcome, SubmissionForm,
    SubmissionState, SubmitOutcome,
};
use crate::ports::outbound::{Confirmation, Decision, LocalEntryRepository, Notifier, ReflectionRepository};
use crate::usecase::merge::merge_entries;
use common::ports::outbound::{Clock, FileSystem, Log, LogLevel, LogRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DELETE_REMOTE_PROMPT: &str = "Delete from server?";

pub struct JournalDeps {
    pub local: Arc<dyn LocalEntryRepository>,
    pub remote: Arc<dyn ReflectionRepository>,
    pub notifier: Arc<dyn Notifier>,
    pub confirmation: Arc<dyn Confirmation>,
    pub fs: Arc<dyn FileSystem>,
    pub clock: Arc<dyn Clock>,
    pub log: Arc<dyn Log>,
}

pub struct JournalUseCase {
    deps: JournalDeps,
}

impl JournalUseCase {
    pub fn new(deps: JournalDeps) -> Self {
        Self { deps }
    }

    /// 両ストアを読み直してマージする
    pub fn load(&self) -> JournalView {
        let local = self.deps.local.list();
        let remote = self.deps.remote.list();
        JournalView {
            server_count: remote.len(),
            entries: merge_entries(&local, &remote),
        }
    }

    pub fn submit(&self, form: SubmissionForm) -> Result<SubmitOutcome, JournalError> {
        let entry = match form.validate() {
            Ok(entry) => entry,
            Err(e) => {
                self.deps.notifier.feedback(
                    "Validation Error",
                    "Please fill in both title and content fields.",
                );
                return Err(e);
            }
        };
        self.log_state(SubmissionState::Submitting);

        let remote_saved = match self.deps.remote.create(&entry) {
            Ok(()) => {
                self.deps.notifier.notify(
                    "Entry Saved (Server)!",
                    &format!("\"{}\" saved to server.", entry.title),
                );
                true
            }
            Err(e) => {
                let _ = self.deps.log.log(
                    &LogRecord::new(LogLevel::Warn, "remote write failed, saving locally")
                        .layer("usecase")
                        .kind("submit")
                        .field("error", e.to_string()),
                );
                false
            }
        };

        let title = entry.title.clone();
        let saved = match self.deps.local.save(entry) {
            Ok(saved) => saved,
            Err(e) => {
                self.deps.notifier.feedback(
                    "Save Failed",
                    &format!("\"{}\" could not be saved locally.", title),
                );
                self.log_state(SubmissionState::Idle);
                return Err(e);
            }
        };
        if !remote_saved {
            self.deps.notifier.notify(
                "Entry Saved (Local)!",
                &format!("\"{}\" saved locally only.", saved.title),
            );
        }
        self.log_state(SubmissionState::Saved { remote: remote_saved });

        let view = self.load();
        self.log_state(SubmissionState::Idle);
        Ok(SubmitOutcome {
            entry: saved,
            remote_saved,
            view,
        })
    }

    /// ローカルエントリを削除する。存在しない id は何もしない。
    pub fn delete_local(&self, id: u64) -> Result<JournalView, JournalError> {
        if self.deps.local.delete_by_id(id)? {
            self.deps.notifier.notify("Entry Deleted", "Journal entry has been removed");
        }
        Ok(self.load())
    }

    /// サーバー側エントリを位置で削除する（確認あり、失敗時はリトライしない）
    pub fn delete_remote(&self, index: usize) -> Result<RemoteDeleteOutcome, JournalError> {
        if self.deps.confirmation.confirm(DELETE_REMOTE_PROMPT) == Decision::Declined {
            return Ok(RemoteDeleteOutcome::Cancelled);
        }
        match self.deps.remote.delete_by_index(index) {
            Ok(()) => {
                let view = self.load();
                self.deps
                    .notifier
                    .notify("Entry Deleted", "Server entry has been removed");
                Ok(RemoteDeleteOutcome::Deleted(view))
            }
            Err(e) => {
                self.deps
                    .notifier
                    .feedback("Delete Failed", "Could not delete from server");
                Err(e)
            }
        }
    }

    /// 両ストアのスナップショットを out_dir に書き出し、書いたパスを返す
    pub fn export(&self, out_dir: &Path) -> Result<PathBuf, JournalError> {
        let now = self.deps.clock.now_ms();
        let document = ExportDocument::new(
            iso_timestamp(now),
            self.deps.local.list(),
            self.deps.remote.list(),
        );
        let path = out_dir.join(export_file_name(now));
        let written = serde_json::to_string_pretty(&document)
            .map_err(|e| JournalError::ExportFailed(e.to_string()))
            .and_then(|json| {
                self.deps
                    .fs
                    .write_atomic(&path, &json)
                    .map_err(|e| JournalError::ExportFailed(e.to_string()))
            });
        match written {
            Ok(()) => {
                self.deps.notifier.notify(
                    "Export Successful",
                    &format!("Exported {} entries!", document.total_entries),
                );
                Ok(path)
            }
            Err(e) => {
                self.deps
                    .notifier
                    .feedback("Export Failed", "Could not export entries");
                Err(e)
            }
        }
    }

    /// ローカルエントリ 1 件
    pub fn show(&self, id: u64) -> Result<Entry, JournalError> {
        self.deps
            .local
            .get_by_id(id)
            .map(|local| Entry::from_local(&local))
            .ok_or_else(|| JournalError::NotFound(id.to_string()))
    }

    fn log_state(&self, state: SubmissionState) {
        let _ = self.deps.log.log(
            &LogRecord::new(LogLevel::Debug, "submission state")
                .layer("usecase")
                .kind("submit")
                .field("state", state.as_str()),
        );
    }
}
