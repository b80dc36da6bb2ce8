//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI / REPL）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（LLM）を使うための trait

pub mod inbound;
pub mod outbound;
