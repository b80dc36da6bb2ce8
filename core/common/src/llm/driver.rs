//! LLMドライバーの実装
//!
//! プロバイダに依存しない共通処理（ペイロード生成 → JSON 化 → HTTP → 解析）を提供します。

use crate::error::Error;
use crate::llm::provider::{LlmProvider, ModelResponse};
use crate::msg::Msg;
use crate::tool::ToolDef;

/// LLMドライバー
pub struct LlmDriver<P: LlmProvider> {
    provider: P,
}

impl<P: LlmProvider> LlmDriver<P> {
    /// 新しいドライバーを作成
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// 履歴を送り、テキストと関数呼び出しを受け取る
    ///
    /// # Arguments
    /// * `history` - 会話履歴
    /// * `system_instruction` - システム指示（オプション）
    /// * `tools` - 宣言するツール（None ならツール無効）
    pub fn generate(
        &self,
        history: &[Msg],
        system_instruction: Option<&str>,
        tools: Option<&[ToolDef]>,
    ) -> Result<ModelResponse, Error> {
        let payload = self
            .provider
            .make_request_payload(history, system_instruction, tools)?;

        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;

        let response_json = self.provider.make_http_request(&request_json)?;

        self.provider.parse_response(&response_json)
    }

    /// プロバイダを取得
    pub fn provider(&self) -> &P {
        &self.provider
    }
}
