//! エントリのカテゴリ（閉じた集合）

use common::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// ジャーナルエントリのカテゴリ
///
/// ワイヤ上（ツールのスキーマ・結果）では SHOPPING などの大文字表記。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Shopping,
    Reminder,
    Note,
    Recommendation,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Shopping,
        Category::Reminder,
        Category::Note,
        Category::Recommendation,
    ];

    /// ワイヤ表記（SHOPPING 等）
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Shopping => "SHOPPING",
            Category::Reminder => "REMINDER",
            Category::Note => "NOTE",
            Category::Recommendation => "RECOMMENDATION",
        }
    }

    /// 応答文に埋め込む小文字表記（shopping 等）
    pub fn label(&self) -> &'static str {
        match self {
            Category::Shopping => "shopping",
            Category::Reminder => "reminder",
            Category::Note => "note",
            Category::Recommendation => "recommendation",
        }
    }

    /// 本文のキーワードからカテゴリを推定する（部分一致、先勝ち）
    pub fn detect(text: &str) -> Category {
        let t = text.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| t.contains(w));
        if has(&["shopping", "buy", "supermarket", "grocery"]) {
            Category::Shopping
        } else if has(&["remind"]) {
            Category::Reminder
        } else if has(&["recommend"]) {
            Category::Recommendation
        } else {
            Category::Note
        }
    }

    /// ツールスキーマの enum に並べる値
    pub fn wire_values() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == upper)
            .ok_or_else(|| Error::invalid_argument(format!("Unknown category: {}", s)))
    }
}
