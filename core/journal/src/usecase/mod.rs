//! UseCase: アプリケーションの振る舞い（ポート経由でのみ外界に触れる）

pub mod entry_factory;
pub mod remote_model;
pub mod rule_based;
pub mod session;
pub mod tool_context;

pub use entry_factory::EntryFactory;
pub use remote_model::RemoteModelProcessor;
pub use rule_based::RuleBasedProcessor;
pub use session::ChatSession;
pub use tool_context::ToolContext;
