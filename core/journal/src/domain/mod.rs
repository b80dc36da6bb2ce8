//! journal 固有のドメイン型（型と不変条件）

pub mod category;
pub mod command;
pub mod entry;
pub mod intent;
pub mod journal;
pub mod mode;
pub mod turn;

pub use category::Category;
pub use command::{JournalCommand, SessionOptions};
pub use entry::{EntryId, JournalEntry};
pub use intent::Intent;
pub use journal::Journal;
pub use mode::ProcessorMode;
pub use turn::ConversationTurn;
