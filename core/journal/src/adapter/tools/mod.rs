//! ジャーナル操作ツール（adapter 層）

mod add_journal_entry;
mod get_journal_entries;

pub use add_journal_entry::AddJournalEntryTool;
pub use get_journal_entries::GetJournalEntriesTool;

use crate::usecase::ToolContext;
use common::tool::ToolRegistry;
use std::sync::Arc;

/// モデルに宣言する 2 ツールを登録したレジストリ（addJournalEntry, getJournalEntries の順）
pub fn journal_tools() -> ToolRegistry<ToolContext> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(AddJournalEntryTool::new()));
    registry.register(Arc::new(GetJournalEntriesTool::new()));
    registry
}

#[cfg(test)]
pub(crate) fn test_context() -> ToolContext {
    use crate::domain::Journal;
    use crate::usecase::EntryFactory;
    use common::adapter::{FixedClock, StdIdGenerator};

    let clock = Arc::new(FixedClock::new(1_700_000_000_000));
    let ids = Arc::new(StdIdGenerator::new(clock.clone()));
    ToolContext::new(Journal::new(), EntryFactory::new(ids, clock))
}
