//! 環境変数解決 Outbound ポート
//!
//! config / data / state / cache ディレクトリを環境変数から解決する。
//! usecase はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::Dirs;
use crate::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// 環境変数を読む（未設定・空文字は None）
    fn var(&self, name: &str) -> Option<String>;

    /// 実行時ディレクトリを解決する
    ///
    /// 優先順位:
    /// 1. JOURNAL_HOME（設定されていれば config/data/state/cache すべてその配下）
    /// 2. XDG_*_HOME/journal
    /// 3. $HOME/.config/journal 等
    fn resolve_dirs(&self) -> Result<Dirs, Error>;

    /// カレントディレクトリ（export の既定出力先）
    fn current_dir(&self) -> Result<PathBuf, Error>;
}
