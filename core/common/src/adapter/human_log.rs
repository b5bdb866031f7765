//! 人間向けログ（LogRecord → stderr に要点のみ）と、複数 Log への分配
//!
//! -v 指定時のみ FileJsonLog と並べて使う。fields の全量は出さず要点のみ（巨大化防止）。

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

const FIELDS_SUMMARY_MAX: usize = 200;

fn fields_summary(record: &LogRecord) -> String {
    let Some(fields) = &record.fields else {
        return String::new();
    };
    let s = serde_json::to_string(fields).unwrap_or_default();
    if s.chars().count() <= FIELDS_SUMMARY_MAX {
        return s;
    }
    let truncated = s.chars().take(FIELDS_SUMMARY_MAX).collect::<String>();
    format!("{}... (len={})", truncated, s.len())
}

/// LogRecord を 1 行に整形する
pub fn format_human(record: &LogRecord) -> String {
    let level = match record.level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
    };
    let mut line = format!("[log] {} {}", level, record.message);
    if let Some(kind) = &record.kind {
        line.push_str(&format!(" ({})", kind));
    }
    let summary = fields_summary(record);
    if !summary.is_empty() {
        line.push(' ');
        line.push_str(&summary);
    }
    line
}

/// stderr へ整形して出す Log 実装
#[derive(Debug, Clone, Default)]
pub struct HumanLog;

impl Log for HumanLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        eprintln!("{}", format_human(record));
        Ok(())
    }
}

/// 複数の Log へ順に配信する。1 つが失敗しても残りへは配信し、最初のエラーを返す。
pub struct TeeLog {
    logs: Vec<Arc<dyn Log>>,
}

impl TeeLog {
    pub fn new(logs: Vec<Arc<dyn Log>>) -> Self {
        Self { logs }
    }
}

impl Log for TeeLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for log in &self.logs {
            if let Err(e) = log.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CollectLog(Mutex<Vec<String>>);

    impl Log for CollectLog {
        fn log(&self, record: &LogRecord) -> Result<(), Error> {
            self.0.lock().unwrap().push(record.message.clone());
            Ok(())
        }
    }

    struct FailingLog;

    impl Log for FailingLog {
        fn log(&self, _record: &LogRecord) -> Result<(), Error> {
            Err(Error::io_msg("disk full"))
        }
    }

    #[test]
    fn test_format_human_includes_kind_and_fields() {
        let rec = LogRecord::new(LogLevel::Warn, "probe failed")
            .kind("connectivity")
            .field("timeout_ms", 1200);
        let line = format_human(&rec);
        assert!(line.starts_with("[log] warn probe failed (connectivity)"));
        assert!(line.contains("\"timeout_ms\":1200"));
    }

    #[test]
    fn test_format_human_truncates_large_fields() {
        let rec = LogRecord::new(LogLevel::Info, "big").field("body", "x".repeat(1000));
        assert!(format_human(&rec).contains("... (len="));
    }

    #[test]
    fn test_tee_continues_after_failure() {
        let collect = Arc::new(CollectLog(Mutex::new(Vec::new())));
        let tee = TeeLog::new(vec![Arc::new(FailingLog), collect.clone()]);
        let result = tee.log(&LogRecord::new(LogLevel::Info, "hello"));
        assert!(result.is_err());
        assert_eq!(*collect.0.lock().unwrap(), vec!["hello".to_string()]);
    }
}
