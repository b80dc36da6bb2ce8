//! リモートモデル Outbound ポート
//!
//! テストでは StubModel で差し替え可能。

use common::error::Error;
use common::llm::ModelResponse;
use common::msg::Msg;
use common::tool::ToolDef;

/// 会話履歴を送ってモデルの応答（テキスト / 関数呼び出し）を受け取る Outbound ポート
pub trait ModelClient: Send + Sync {
    fn generate(
        &self,
        history: &[Msg],
        system_instruction: &str,
        tools: Option<&[ToolDef]>,
    ) -> Result<ModelResponse, Error>;
}
