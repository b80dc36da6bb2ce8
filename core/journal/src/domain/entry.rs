//! ジャーナルエントリ 1 件のドメイン型

use crate::domain::Category;
use chrono::{DateTime, Utc};
use common::domain::SortableId;
use common::error::Error;
use serde::Serialize;

/// エントリ ID（生成順に辞書順で並ぶ）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::ops::Deref for EntryId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<SortableId> for EntryId {
    fn from(id: SortableId) -> Self {
        Self(id.into_string())
    }
}

/// ジャーナルエントリ（作成後は不変）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    id: EntryId,
    category: Category,
    content: String,
    timestamp: DateTime<Utc>,
}

impl JournalEntry {
    /// content は前後の空白を除いて保持する。空なら InvalidArgument
    pub fn new(
        id: EntryId,
        category: Category,
        content: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, Error> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::invalid_argument("Entry content must not be empty"));
        }
        Ok(Self {
            id,
            category,
            content: content.to_string(),
            timestamp,
        })
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
