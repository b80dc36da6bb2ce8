//! LLMプロバイダのトレイト定義

use crate::error::Error;
use crate::msg::Msg;
use crate::tool::ToolDef;
use serde_json::Value;

/// LLMプロバイダのトレイト
///
/// 各プロバイダはリクエスト生成・HTTP 送信・レスポンス解析の 3 段に分けて実装する。
/// 3 段に分けておくと、HTTP を通さずにペイロードと解析だけをテストできる。
pub trait LlmProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// リクエストペイロードを生成
    ///
    /// # Arguments
    /// * `history` - 会話履歴（末尾が今回のユーザー発話またはツール結果）
    /// * `system_instruction` - システム指示（オプション）
    /// * `tools` - 宣言するツール（None ならツール無効）
    fn make_request_payload(
        &self,
        history: &[Msg],
        system_instruction: Option<&str>,
        tools: Option<&[ToolDef]>,
    ) -> Result<Value, Error>;

    /// HTTPリクエストを実行してレスポンスJSON文字列を取得
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスからテキストと関数呼び出しを取り出す
    ///
    /// 期待した構造（候補・content）が無い場合は `Error::MalformedResponse`。
    fn parse_response(&self, response_json: &str) -> Result<ModelResponse, Error>;
}

/// モデルが選んだ関数呼び出し 1 件
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// プロバイダが ID を返さない場合は `call_<name>`
    pub id: String,
    pub name: String,
    pub args: Value,
    pub thought_signature: Option<String>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Value) -> Self {
        let name = name.into();
        Self {
            id: format!("call_{}", name),
            name,
            args,
            thought_signature: None,
        }
    }
}

/// 1 回の生成呼び出しの結果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelResponse {
    /// text part を連結したもの（無ければ None）
    pub text: Option<String>,
    /// 出現順の関数呼び出し
    pub function_calls: Vec<FunctionCall>,
}

impl ModelResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            function_calls: Vec::new(),
        }
    }

    pub fn call(call: FunctionCall) -> Self {
        Self {
            text: None,
            function_calls: vec![call],
        }
    }

    pub fn first_call(&self) -> Option<&FunctionCall> {
        self.function_calls.first()
    }
}
