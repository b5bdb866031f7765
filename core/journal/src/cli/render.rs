//! 一覧の端末表示

use crate::domain::{Entry, EntryOrigin, JournalView};

/// 1 件を 1 ブロックに整形する（見出し行 + 本文 + タグ）
pub fn render_entry(entry: &Entry) -> String {
    let origin = match entry.origin {
        EntryOrigin::Local => format!("local #{}", entry.id),
        EntryOrigin::Remote { index } => format!("server [{}]", index),
    };
    let mut out = format!("{}  {}  ({})\n", entry.date, entry.title, origin);
    for line in entry.content.lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    if !entry.tags.is_empty() {
        let tags: Vec<String> = entry.tags.iter().map(|t| format!("#{}", t)).collect();
        out.push_str("    ");
        out.push_str(&tags.join(" "));
        out.push('\n');
    }
    out
}

pub fn render_view(view: &JournalView) -> String {
    let mut out = String::new();
    if view.entries.is_empty() {
        out.push_str("No entries yet.\n");
    }
    for entry in &view.entries {
        out.push_str(&render_entry(entry));
        out.push('\n');
    }
    out.push_str(&format!("Total Server Reflections: {}\n", view.server_count));
    out
}
