//! Outbound ポート: アプリが外界（時刻・ID・環境変数・ログ・LLM）を使うための trait

pub mod clock;
pub mod env_resolver;
pub mod id_generator;
pub mod llm_provider;
pub mod log;

pub use clock::Clock;
pub use env_resolver::EnvResolver;
pub use id_generator::IdGenerator;
pub use llm_provider::{FunctionCall, LlmProvider, ModelResponse};
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
