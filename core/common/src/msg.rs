//! 型付き会話履歴（Msg）
//!
//! セッションは Vec<Msg> を保持し、LLM プロバイダが各 API のリクエスト形式に変換する。
//! 関数呼び出しが起きたターンでは ToolCall / ToolResult の組がユーザー発話と最終応答の間に入る。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 会話メッセージ（システム・ユーザー・アシスタント・ツール呼び出し・ツール結果）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    System(String),
    User(String),
    Assistant(String),
    ToolCall {
        call_id: String,
        name: String,
        args: Value,
        /// Gemini が functionCall part に付与する署名（返送が必要）
        thought_signature: Option<String>,
    },
    ToolResult {
        call_id: String,
        name: String,
        result: Value,
    },
}

impl Msg {
    pub fn system(s: impl Into<String>) -> Self {
        Msg::System(s.into())
    }
    pub fn user(s: impl Into<String>) -> Self {
        Msg::User(s.into())
    }
    pub fn assistant(s: impl Into<String>) -> Self {
        Msg::Assistant(s.into())
    }
    pub fn tool_call(
        call_id: impl Into<String>,
        name: impl Into<String>,
        args: Value,
        thought_signature: Option<String>,
    ) -> Self {
        Msg::ToolCall {
            call_id: call_id.into(),
            name: name.into(),
            args,
            thought_signature,
        }
    }
    pub fn tool_result(call_id: impl Into<String>, name: impl Into<String>, result: Value) -> Self {
        Msg::ToolResult {
            call_id: call_id.into(),
            name: name.into(),
            result,
        }
    }
}
