//! メッセージプロセッサの選択

use common::error::Error;
use std::str::FromStr;

/// どちらのプロセッサで発話を処理するか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessorMode {
    /// 正規表現ルール（オフラインで動く）
    #[default]
    Rules,
    /// Gemini の function calling
    Gemini,
}

impl ProcessorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessorMode::Rules => "rules",
            ProcessorMode::Gemini => "gemini",
        }
    }
}

impl FromStr for ProcessorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rules" | "rule" => Ok(ProcessorMode::Rules),
            "gemini" | "model" => Ok(ProcessorMode::Gemini),
            other => Err(Error::invalid_argument(format!(
                "Unknown mode: {} (expected rules or gemini)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!("rules".parse::<ProcessorMode>().unwrap(), ProcessorMode::Rules);
        assert_eq!("Gemini".parse::<ProcessorMode>().unwrap(), ProcessorMode::Gemini);
        assert!("gpt".parse::<ProcessorMode>().is_err());
        assert_eq!(ProcessorMode::default(), ProcessorMode::Rules);
    }
}
