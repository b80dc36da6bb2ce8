//! ツール実行コンテキスト
//!
//! 1 回の `process` の間だけ生きる作業用コピー。処理が成功したときだけ
//! `journal` が新しい Journal としてセッションへ返る。

use crate::domain::Journal;
use crate::usecase::EntryFactory;

pub struct ToolContext {
    pub journal: Journal,
    pub factory: EntryFactory,
}

impl ToolContext {
    pub fn new(journal: Journal, factory: EntryFactory) -> Self {
        Self { journal, factory }
    }

    pub fn into_journal(self) -> Journal {
        self.journal
    }
}
