//! 実行時ディレクトリ（XDG / JOURNAL_HOME 解決結果）
//!
//! EnvResolver::resolve_dirs() で取得し、設定・ストア・ログ・キャッシュのパス計算に使う。

use std::path::PathBuf;

const CONFIG_FILENAME: &str = "config.json";
const LOG_FILENAME: &str = "journal.jsonl";

/// 解決済みの config / data / state / cache ディレクトリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub state_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl Dirs {
    /// 1 つのルート配下にすべてを置く（JOURNAL_HOME 指定時・テスト用）
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
            state_dir: root.join("state"),
            cache_dir: root.join("cache"),
        }
    }

    /// 設定ファイル（config/config.json）
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILENAME)
    }

    /// キー値ストアの格納ディレクトリ（data/store）
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    /// ログ格納ディレクトリ（state/logs）
    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }

    /// JSONL ログファイル
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILENAME)
    }
}
