//! チャットセッション（UI から呼ばれる操作の集約）
//!
//! Journal・モデル用の履歴・画面用のトランスクリプトを唯一所有する。
//! プロセッサが成功したときだけ、返ってきた履歴と Journal を丸ごと差し替える。

use crate::domain::{Category, ConversationTurn, EntryId, Journal, JournalEntry};
use crate::ports::inbound::MessageProcessor;
use crate::ports::outbound::Log;
use crate::usecase::EntryFactory;
use common::error::Error;
use common::msg::Msg;
use common::ports::outbound::LogRecord;
use std::sync::Arc;

pub const GREETING_ID: &str = "init";
pub const GREETING: &str = "Hello! I'm your personal journal assistant. How can I help you today? You can tell me things to remember, add to your shopping list, or ask me what you've saved.";

pub struct ChatSession {
    processor: Box<dyn MessageProcessor>,
    factory: EntryFactory,
    log: Arc<dyn Log>,
    journal: Journal,
    history: Vec<Msg>,
    transcript: Vec<ConversationTurn>,
}

impl ChatSession {
    pub fn new(processor: Box<dyn MessageProcessor>, factory: EntryFactory, log: Arc<dyn Log>) -> Self {
        Self {
            processor,
            factory,
            log,
            journal: Journal::new(),
            history: Vec::new(),
            transcript: vec![ConversationTurn::model(GREETING_ID, GREETING)],
        }
    }

    /// 発話を 1 件処理して応答文を返す
    ///
    /// 空の発話は InvalidArgument（何も追記しない）。プロセッサの失敗は Err にせず、
    /// エラーターンとして応答する（履歴・Journal は変更しない）。
    pub fn send_message(&mut self, text: &str) -> Result<String, Error> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::invalid_argument("Message must not be empty"));
        }
        self.transcript
            .push(ConversationTurn::user(self.factory.next_turn_id(), text));

        let reply = match self.processor.process(text, &self.history, &self.journal) {
            Ok(processed) => {
                self.history = processed.new_history;
                self.journal = processed.new_journal;
                processed.reply
            }
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::error(e.to_string())
                        .layer("usecase")
                        .kind("error")
                        .field("processor", self.processor.name())
                        .field("exit_code", e.exit_code()),
                );
                format!("Sorry, something went wrong: {}", e)
            }
        };

        self.transcript
            .push(ConversationTurn::model(self.factory.next_turn_id(), reply.as_str()));
        Ok(reply)
    }

    /// 買い物リストに直接追加する
    pub fn add_item(&mut self, text: &str) -> Result<EntryId, Error> {
        let entry = self.factory.create(Category::Shopping, text)?;
        let id = entry.id().clone();
        self.journal.push(entry);
        Ok(id)
    }

    /// 該当 ID のエントリだけを消す。無ければ false
    pub fn delete_item(&mut self, id: &EntryId) -> bool {
        self.journal.remove(id).is_some()
    }

    pub fn shopping_list(&self) -> Vec<&JournalEntry> {
        self.journal.by_category(Category::Shopping)
    }

    pub fn shopping_count(&self) -> usize {
        self.shopping_list().len()
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    #[cfg(test)]
    pub fn history(&self) -> &[Msg] {
        &self.history
    }

    pub fn transcript(&self) -> &[ConversationTurn] {
        &self.transcript
    }

    #[cfg(test)]
    pub fn processor_name(&self) -> &'static str {
        self.processor.name()
    }
}
