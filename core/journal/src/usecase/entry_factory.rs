//! エントリ生成（ID と時刻を注入されたポートから取る）

use crate::domain::{Category, EntryId, JournalEntry};
use crate::ports::outbound::{Clock, IdGenerator};
use common::error::Error;
use std::sync::Arc;

/// ID 生成と時計を束ね、エントリとターン ID を作る
#[derive(Clone)]
pub struct EntryFactory {
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl EntryFactory {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    /// 空の content は InvalidArgument（ID は消費しない）
    pub fn create(&self, category: Category, content: &str) -> Result<JournalEntry, Error> {
        if content.trim().is_empty() {
            return Err(Error::invalid_argument("Entry content must not be empty"));
        }
        let id = EntryId::from(self.ids.next_id());
        JournalEntry::new(id, category, content, self.clock.now_utc())
    }

    /// トランスクリプトのターン ID
    pub fn next_turn_id(&self) -> String {
        self.ids.next_id().into_string()
    }
}
