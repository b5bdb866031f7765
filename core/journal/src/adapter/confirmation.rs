//! 対話による削除確認（CLI 境界）
//!
//! stdin/stderr を用いた対話は adapter 層の責務。

use crate::ports::outbound::{Confirmation, Decision};
use std::io::{self, BufRead, Write};

/// stdin で y/yes を受けたときだけ確認済みとする
pub struct CliConfirmation;

impl CliConfirmation {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

/// 入力行を確認結果に変換する（空行・その他は拒否）
pub fn parse_answer(line: &str) -> Decision {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Decision::Confirmed,
        _ => Decision::Declined,
    }
}

impl Confirmation for CliConfirmation {
    fn confirm(&self, message: &str) -> Decision {
        eprint!("{} [y/N]: ", message);
        let _ = io::stderr().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => Decision::Declined,
            Ok(_) => parse_answer(&line),
        }
    }
}

/// 非対話用: 常に確認済み（--yes 指定時）
pub struct AssumeYes;

impl Confirmation for AssumeYes {
    fn confirm(&self, _message: &str) -> Decision {
        Decision::Confirmed
    }
}
