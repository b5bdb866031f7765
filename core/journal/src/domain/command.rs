//! CLI から解釈されたコマンド（main でディスパッチする）

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalCommand {
    /// エントリを追加（サーバー → ローカルの二重書き込み）
    Add {
        title: String,
        content: String,
        tags: String,
    },
    /// マージ済み一覧
    List { json: bool },
    /// ローカルエントリ 1 件をコピー用テキストで表示
    Show { id: u64 },
    /// ローカルエントリを削除
    Delete { id: u64 },
    /// サーバー側エントリを位置で削除（確認あり）
    DeleteRemote { index: usize, yes: bool },
    /// 両ストアを JSON へ書き出す
    Export { out_dir: Option<PathBuf> },
    /// 疎通確認を 1 回だけ行う
    Status,
    /// ハートビートを回し続ける（Ctrl+C で終了）
    Watch,
    CacheInstall,
    CacheActivate,
    CacheList,
}

impl JournalCommand {
    /// ログ用の名前
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List { .. } => "list",
            Self::Show { .. } => "show",
            Self::Delete { .. } => "delete",
            Self::DeleteRemote { .. } => "delete-remote",
            Self::Export { .. } => "export",
            Self::Status => "status",
            Self::Watch => "watch",
            Self::CacheInstall => "cache-install",
            Self::CacheActivate => "cache-activate",
            Self::CacheList => "cache-list",
        }
    }
}
