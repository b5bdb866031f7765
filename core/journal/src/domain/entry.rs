//! ジャーナルエントリのドメイン型
//!
//! - LocalEntry: ローカルストアの永続形式（新しい順の配列で保存）
//! - RemoteReflection: サーバーが返す生レコード
//! - Entry: 両者をマージした表示用の統一形。由来は EntryOrigin で明示する。

use crate::domain::date::{self, parse_date};
use crate::domain::JournalError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// サーバー由来エントリのタイトル既定値
pub const DEFAULT_REMOTE_TITLE: &str = "Server Reflection Entry";

/// サーバー由来エントリに付ける由来タグ
pub const REMOTE_TAGS: [&str; 3] = ["flask", "backend", "live"];

/// ローカルストアに保存された 1 件。作成後は変更しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalEntry {
    /// 作成時刻（epoch ミリ秒）。ストア内で一意かつ単調増加
    pub id: u64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// 表示用の日付（ローカル日付のみ）
    pub date: String,
    /// 作成時刻の ISO8601。古い保存データには無い
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
}

/// サーバーの reflections 配列の 1 要素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteReflection {
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    /// 未知のフィールド（エクスポートでそのまま書き戻す）
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl RemoteReflection {
    #[cfg(test)]
    pub fn new(date: impl Into<String>, reflection: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            title: None,
            reflection: Some(reflection.into()),
            extra: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// 保存前のエントリ（検証済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NewEntry {
    /// サーバーへ送る JSON ボディ。reflection は content の写し。
    pub fn to_remote_body(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "content": self.content,
            "tags": self.tags,
            "reflection": self.content,
        })
    }
}

/// 入力フォームの値（未検証）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    pub title: String,
    pub content: String,
    /// カンマ区切りのタグ
    pub tags: String,
}

impl SubmissionForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: tags.into(),
        }
    }

    /// title / content が空白のみなら Validation。それ以外は NewEntry にする。
    pub fn validate(self) -> Result<NewEntry, JournalError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(JournalError::Validation(
                "Please fill in both title and content fields.".to_string(),
            ));
        }
        Ok(NewEntry {
            tags: parse_tags(&self.tags),
            title: self.title,
            content: self.content,
        })
    }
}

/// "a, b,,c " → ["a", "b", "c"]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// エントリ ID。ローカルは作成時刻、リモートはレコードの date 文字列（一意とは限らない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntryId {
    Local(u64),
    Remote(String),
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local(id) => id.fmt(f),
            Self::Remote(date) => date.fmt(f),
        }
    }
}

/// エントリの由来
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum EntryOrigin {
    Local,
    /// index は直近に取得したリモート配列内の位置。削除のたびにずれる。
    Remote { index: usize },
}

/// マージ後の表示用エントリ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub date: String,
    pub origin: EntryOrigin,
    /// 並び替えキー。None は解析不能（最も古い扱い）
    #[serde(skip)]
    pub sort_key: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn from_local(local: &LocalEntry) -> Self {
        let sort_key = local
            .timestamp
            .as_deref()
            .and_then(parse_date)
            .or_else(|| parse_date(&local.date));
        Self {
            id: EntryId::Local(local.id),
            title: local.title.clone(),
            content: local.content.clone(),
            tags: local.tags.clone(),
            date: local.date.clone(),
            origin: EntryOrigin::Local,
            sort_key,
        }
    }

    pub fn from_remote(record: &RemoteReflection, index: usize) -> Self {
        let sort_key = parse_date(&record.date);
        let title = record
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_REMOTE_TITLE)
            .to_string();
        Self {
            id: EntryId::Remote(record.date.clone()),
            title,
            content: record.reflection.clone().unwrap_or_default(),
            tags: REMOTE_TAGS.iter().map(|t| t.to_string()).collect(),
            date: date::remote_display(sort_key),
            origin: EntryOrigin::Remote { index },
            sort_key,
        }
    }

    pub fn is_local(&self) -> bool {
        self.origin == EntryOrigin::Local
    }

    /// 「コピー」用のテキスト
    pub fn format_for_copy(&self) -> String {
        format!("{}\nDate: {}\n\n{}", self.title, self.date, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_trims_and_drops_empty() {
        assert_eq!(parse_tags("a, b,,c "), vec!["a", "b", "c"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let err = SubmissionForm::new("  ", "body", "").validate().unwrap_err();
        assert!(matches!(err, JournalError::Validation(_)));
        let err = SubmissionForm::new("T", "\n\t", "").validate().unwrap_err();
        assert!(matches!(err, JournalError::Validation(_)));
    }

    #[test]
    fn test_validate_keeps_untrimmed_text() {
        let entry = SubmissionForm::new(" T ", "C", "a,b").validate().unwrap();
        assert_eq!(entry.title, " T ");
        assert_eq!(entry.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_remote_body_mirrors_content_into_reflection() {
        let body = SubmissionForm::new("T", "C", "x").validate().unwrap().to_remote_body();
        assert_eq!(body["reflection"], "C");
        assert_eq!(body["content"], "C");
        assert_eq!(body["tags"], serde_json::json!(["x"]));
    }

    #[test]
    fn test_from_remote_defaults() {
        let record = RemoteReflection::new("2024-01-01T00:00:00Z", "hello");
        let entry = Entry::from_remote(&record, 3);
        assert_eq!(entry.title, DEFAULT_REMOTE_TITLE);
        assert_eq!(entry.content, "hello");
        assert_eq!(entry.tags, vec!["flask", "backend", "live"]);
        assert_eq!(entry.origin, EntryOrigin::Remote { index: 3 });
        assert_eq!(entry.id, EntryId::Remote("2024-01-01T00:00:00Z".to_string()));
        assert!(entry.sort_key.is_some());
    }

    #[test]
    fn test_from_remote_invalid_date() {
        let record = RemoteReflection::new("yesterday-ish", "x");
        let entry = Entry::from_remote(&record, 0);
        assert_eq!(entry.sort_key, None);
        assert_eq!(entry.date, date::INVALID_DATE);
    }

    #[test]
    fn test_remote_record_keeps_unknown_fields() {
        let json = r#"{"date":"2024-01-01 10:00:00","reflection":"r","mood":"ok"}"#;
        let record: RemoteReflection = serde_json::from_str(json).unwrap();
        assert_eq!(record.extra.get("mood"), Some(&serde_json::json!("ok")));
        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["mood"], "ok");
        assert!(back.get("title").is_none());
    }

    #[test]
    fn test_local_entry_without_timestamp_uses_date() {
        let local = LocalEntry {
            id: 1,
            title: "t".into(),
            content: "c".into(),
            tags: vec![],
            date: "1/2/2024".into(),
            timestamp: None,
            reflection: None,
        };
        let entry = Entry::from_local(&local);
        assert!(entry.sort_key.is_some());
        assert!(entry.is_local());
    }

    #[test]
    fn test_format_for_copy() {
        let record = RemoteReflection::new("bad", "body").with_title("Title");
        let entry = Entry::from_remote(&record, 0);
        assert_eq!(entry.format_for_copy(), "Title\nDate: Invalid Date\n\nbody");
    }
}
