//! ModelClient の実装: common の LlmDriver（payload → JSON → HTTP → 解析）をそのまま使う

use crate::ports::outbound::ModelClient;
use common::error::Error;
use common::llm::{LlmDriver, LlmProvider, ModelResponse};
use common::msg::Msg;
use common::tool::ToolDef;

impl<P: LlmProvider> ModelClient for LlmDriver<P> {
    fn generate(
        &self,
        history: &[Msg],
        system_instruction: &str,
        tools: Option<&[ToolDef]>,
    ) -> Result<ModelResponse, Error> {
        LlmDriver::generate(self, history, Some(system_instruction), tools)
    }
}
