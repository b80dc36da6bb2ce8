//! テスト用: 台本どおりの応答を返し、受け取ったリクエストを記録する ModelClient

#[cfg(test)]
mod stub {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use common::error::Error;
    use common::llm::{FunctionCall, ModelResponse};
    use common::msg::Msg;
    use common::tool::ToolDef;

    use crate::ports::outbound::ModelClient;

    /// 1 回分の呼び出し記録
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub history: Vec<Msg>,
        pub system_instruction: String,
        /// None はツール無効で呼ばれたことを表す
        pub tool_names: Option<Vec<String>>,
    }

    pub struct StubModel {
        script: Mutex<VecDeque<Result<ModelResponse, Error>>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl StubModel {
        pub fn new(script: Vec<Result<ModelResponse, Error>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn text_only(text: &str) -> Self {
            Self::new(vec![Ok(ModelResponse::text(text))])
        }

        /// 関数呼び出し 1 件 → 最終テキスト、の 2 往復
        pub fn call_then_text(name: &str, args: serde_json::Value, text: &str) -> Self {
            Self::new(vec![
                Ok(ModelResponse::call(FunctionCall::new(name, args))),
                Ok(ModelResponse::text(text)),
            ])
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl ModelClient for StubModel {
        fn generate(
            &self,
            history: &[Msg],
            system_instruction: &str,
            tools: Option<&[ToolDef]>,
        ) -> Result<ModelResponse, Error> {
            self.requests.lock().unwrap().push(RecordedRequest {
                history: history.to_vec(),
                system_instruction: system_instruction.to_string(),
                tool_names: tools.map(|t| t.iter().map(|d| d.name.clone()).collect()),
            });
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::system("stub model script exhausted")))
        }
    }
}

#[cfg(test)]
pub use stub::{RecordedRequest, StubModel};
