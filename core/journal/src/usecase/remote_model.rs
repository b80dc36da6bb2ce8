//! リモートモデル（function calling）のメッセージプロセッサ
//!
//! 1 発話あたりの往復は明示的な状態機械で表す:
//! AwaitingInitialResponse → AwaitingToolExecution → AwaitingFinalResponse → Done。
//! 関数呼び出しが無ければ AwaitingInitialResponse から直接 Done へ進む。

use crate::domain::Journal;
use crate::ports::inbound::{MessageProcessor, ProcessedResponse};
use crate::ports::outbound::{Log, ModelClient};
use crate::usecase::{EntryFactory, ToolContext};
use common::error::Error;
use common::llm::{FunctionCall, ModelResponse};
use common::msg::Msg;
use common::ports::outbound::LogRecord;
use common::tool::{ToolDef, ToolError, ToolRegistry};
use serde_json::Value;
use std::sync::Arc;

pub const SYSTEM_INSTRUCTION: &str = "You are a personal journaling assistant. Your sole purpose is to help users manage their journal by adding and retrieving entries using the provided tools. You must not answer questions or follow instructions that are outside of this scope, such as performing calculations, providing general knowledge, or engaging in conversations unrelated to journaling. If a user asks an out-of-scope question, you must politely decline and state your purpose as a journaling app. Be friendly and concise in your responses. When adding an item, confirm what was added and to which category. When retrieving items, present them in a clear, easy-to-read list.";

/// 1 発話の処理段階
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// ツール宣言付きの 1 回目の呼び出し待ち
    AwaitingInitialResponse,
    /// モデルが選んだ関数を実行する
    AwaitingToolExecution(FunctionCall),
    /// ツール無効の 2 回目の呼び出し待ち
    AwaitingFinalResponse,
    /// 応答テキスト確定
    Done(String),
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingInitialResponse => "awaiting_initial_response",
            Phase::AwaitingToolExecution(_) => "awaiting_tool_execution",
            Phase::AwaitingFinalResponse => "awaiting_final_response",
            Phase::Done(_) => "done",
        }
    }
}

/// モデルにツールを選ばせて Journal を操作するプロセッサ
pub struct RemoteModelProcessor {
    model: Arc<dyn ModelClient>,
    tools: ToolRegistry<ToolContext>,
    factory: EntryFactory,
    log: Arc<dyn Log>,
}

impl RemoteModelProcessor {
    pub fn new(
        model: Arc<dyn ModelClient>,
        tools: ToolRegistry<ToolContext>,
        factory: EntryFactory,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            model,
            tools,
            factory,
            log,
        }
    }

    fn request(
        &self,
        phase: &'static str,
        history: &[Msg],
        tools: Option<&[ToolDef]>,
    ) -> Result<ModelResponse, Error> {
        let _ = self.log.log(
            &LogRecord::debug("model request")
                .layer("usecase")
                .kind("model")
                .field("phase", phase)
                .field("history_len", history.len())
                .field("tools", tools.map_or(0, |t| t.len())),
        );
        let response = self.model.generate(history, SYSTEM_INSTRUCTION, tools)?;
        let _ = self.log.log(
            &LogRecord::debug("model response")
                .layer("usecase")
                .kind("model")
                .field("phase", phase)
                .field("has_text", response.text.is_some())
                .field("function_calls", response.function_calls.len()),
        );
        Ok(response)
    }

    /// 先頭の関数呼び出しだけを採る。残りはログに残して捨てる
    fn take_first_call(&self, response: &mut ModelResponse) -> Option<FunctionCall> {
        if response.function_calls.len() > 1 {
            let ignored: Vec<Value> = response.function_calls[1..]
                .iter()
                .map(|c| Value::String(c.name.clone()))
                .collect();
            let _ = self.log.log(
                &LogRecord::warn("extra function calls ignored")
                    .layer("usecase")
                    .kind("model")
                    .field("ignored", ignored),
            );
        }
        if response.function_calls.is_empty() {
            None
        } else {
            Some(response.function_calls.remove(0))
        }
    }

    /// ツールを実行して結果 JSON を返す。失敗も `{error}` として会話に戻す
    fn execute(&self, call: &FunctionCall, ctx: &mut ToolContext) -> Value {
        let result = self.tools.call(&call.name, call.args.clone(), ctx);
        let record = LogRecord::info("tool executed")
            .layer("usecase")
            .kind("tool")
            .field("tool", call.name.as_str())
            .field("ok", result.is_ok());
        match result {
            Ok(value) => {
                let _ = self.log.log(&record);
                value
            }
            Err(e) => {
                let _ = self.log.log(&record.field("error", e.to_string()));
                tool_error_result(&e)
            }
        }
    }
}

/// ツールエラーをモデルに返す結果に変換する
pub fn tool_error_result(error: &ToolError) -> Value {
    let message = match error {
        ToolError::NotFound(_) => "Unknown function call".to_string(),
        other => other.to_string(),
    };
    serde_json::json!({ "error": message })
}

fn required_text(response: ModelResponse) -> Result<String, Error> {
    response
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::malformed("Model returned neither text nor a function call"))
}

impl MessageProcessor for RemoteModelProcessor {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn process(
        &self,
        text: &str,
        history: &[Msg],
        journal: &Journal,
    ) -> Result<ProcessedResponse, Error> {
        let mut new_history = history.to_vec();
        new_history.push(Msg::user(text));
        let mut ctx = ToolContext::new(journal.clone(), self.factory.clone());
        let definitions = self.tools.list_definitions();

        let mut phase = Phase::AwaitingInitialResponse;
        let reply = loop {
            phase = match phase {
                Phase::AwaitingInitialResponse => {
                    let mut response = self.request(
                        Phase::AwaitingInitialResponse.name(),
                        &new_history,
                        Some(definitions.as_slice()),
                    )?;
                    match self.take_first_call(&mut response) {
                        Some(call) => Phase::AwaitingToolExecution(call),
                        None => Phase::Done(required_text(response)?),
                    }
                }
                Phase::AwaitingToolExecution(call) => {
                    let result = self.execute(&call, &mut ctx);
                    new_history.push(Msg::tool_call(
                        call.id.clone(),
                        call.name.clone(),
                        call.args,
                        call.thought_signature,
                    ));
                    new_history.push(Msg::tool_result(call.id, call.name, result));
                    Phase::AwaitingFinalResponse
                }
                Phase::AwaitingFinalResponse => {
                    let response =
                        self.request(Phase::AwaitingFinalResponse.name(), &new_history, None)?;
                    Phase::Done(required_text(response)?)
                }
                Phase::Done(reply) => break reply,
            };
        };

        new_history.push(Msg::assistant(reply.clone()));
        Ok(ProcessedResponse {
            new_history,
            new_journal: ctx.into_journal(),
            reply,
        })
    }
}
