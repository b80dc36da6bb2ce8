//! Adapter: ポートの実装（モデル呼び出し・ツール）

pub mod model_client;
pub mod stub_model;
pub mod tools;

pub use tools::journal_tools;
