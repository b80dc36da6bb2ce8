//! 人間向けログ（stderr へ要点のみ）と複数出力先への分配

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

const FIELDS_SUMMARY_MAX: usize = 400;

/// レコードを 1 行の人間向け文字列にする（fields は長すぎれば切り詰める）
pub fn format_human(record: &LogRecord) -> String {
    let mut line = format!("[{}] {}", record.level.as_str(), record.message);
    if let Some(kind) = &record.kind {
        line = format!("[{}] {}: {}", record.level.as_str(), kind, record.message);
    }
    if let Some(fields) = &record.fields {
        let s = serde_json::to_string(fields).unwrap_or_default();
        if s.chars().count() > FIELDS_SUMMARY_MAX {
            let truncated: String = s.chars().take(FIELDS_SUMMARY_MAX).collect();
            line.push_str(&format!(" {}... (len={})", truncated, s.len()));
        } else {
            line.push(' ');
            line.push_str(&s);
        }
    }
    line
}

/// `--verbose` 用: min_level 以上を stderr に出す
#[derive(Debug, Clone)]
pub struct StderrLog {
    min_level: LogLevel,
}

impl StderrLog {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        // Error < Warn < Info < Debug の順に詳細になる
        level <= self.min_level
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if self.enabled(record.level) {
            eprintln!("{}", format_human(record));
        }
        Ok(())
    }
}

/// 複数の Log にそのまま配る。1 つが失敗しても残りには書く
pub struct FanoutLog {
    sinks: Vec<Arc<dyn Log>>,
}

impl FanoutLog {
    pub fn new(sinks: Vec<Arc<dyn Log>>) -> Self {
        Self { sinks }
    }
}

impl Log for FanoutLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
