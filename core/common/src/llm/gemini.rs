//! Geminiプロバイダの実装（generateContent + function calling）

use crate::domain::{ApiKey, ModelName};
use crate::error::Error;
use crate::llm::provider::{FunctionCall, LlmProvider, ModelResponse};
use crate::msg::Msg;
use crate::tool::ToolDef;
use serde_json::{json, Value};
use std::time::Duration;

/// 既定のモデル
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Geminiプロバイダ
pub struct GeminiProvider {
    model: String,
    /// 未設定でも生成はできる。送信時に Env エラーにする
    api_key: Option<ApiKey>,
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl GeminiProvider {
    /// 新しいGeminiプロバイダを作成
    ///
    /// # Arguments
    /// * `model` - モデル名（デフォルト: "gemini-2.5-flash"）
    /// * `api_key` - API キー（None なら呼び出しのたびに Env エラー）
    /// * `timeout` - 1 リクエストあたりのタイムアウト
    pub fn new(
        model: Option<ModelName>,
        api_key: Option<ApiKey>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let model = model
            .map(|m| m.to_string())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            model,
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client,
        })
    }

    /// エンドポイントを差し替える（ローカルのモックサーバ向け）
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

/// Msg 1 件を (role, parts) に変換する。System は contents に入れない
fn msg_to_content(msg: &Msg) -> Option<(&'static str, Vec<Value>)> {
    match msg {
        Msg::System(_) => None,
        Msg::User(s) => Some(("user", vec![json!({ "text": s })])),
        // Gemini API は "assistant" ではなく "model" という role を使う
        Msg::Assistant(s) => {
            if s.is_empty() {
                Some(("model", Vec::new()))
            } else {
                Some(("model", vec![json!({ "text": s })]))
            }
        }
        Msg::ToolCall {
            name,
            args,
            thought_signature,
            ..
        } => {
            let mut part = json!({
                "functionCall": {
                    "name": name,
                    "args": args
                }
            });
            if let Some(sig) = thought_signature {
                part["thoughtSignature"] = json!(sig);
            }
            Some(("model", vec![part]))
        }
        // ツール結果は user ターンの functionResponse として返す（name 必須）
        Msg::ToolResult { name, result, .. } => Some((
            "user",
            vec![json!({
                "functionResponse": {
                    "name": name,
                    "response": result
                }
            })],
        )),
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn make_request_payload(
        &self,
        history: &[Msg],
        system_instruction: Option<&str>,
        tools: Option<&[ToolDef]>,
    ) -> Result<Value, Error> {
        let mut payload = json!({});

        // 明示の指示が無ければ履歴中の最初の System を使う
        let system = system_instruction.map(String::from).or_else(|| {
            history.iter().find_map(|m| match m {
                Msg::System(s) => Some(s.clone()),
                _ => None,
            })
        });
        if let Some(system) = system {
            payload["systemInstruction"] = json!({
                "parts": [{"text": system}]
            });
        }

        if let Some(defs) = tools {
            if !defs.is_empty() {
                let declarations: Vec<Value> = defs
                    .iter()
                    .map(|d| {
                        json!({
                            "name": d.name,
                            "description": d.description,
                            "parameters": d.parameters
                        })
                    })
                    .collect();
                payload["tools"] = json!([{ "functionDeclarations": declarations }]);
            }
        }

        // 同じ role が続く model ターン（テキスト + functionCall）は 1 つの content にまとめる
        let mut contents: Vec<(&'static str, Vec<Value>)> = Vec::new();
        for msg in history {
            let Some((role, parts)) = msg_to_content(msg) else {
                continue;
            };
            let merge = role == "model"
                && matches!(contents.last(), Some((last_role, _)) if *last_role == "model");
            if merge {
                if let Some((_, last_parts)) = contents.last_mut() {
                    last_parts.extend(parts);
                }
            } else {
                contents.push((role, parts));
            }
        }

        let contents: Vec<Value> = contents
            .into_iter()
            .map(|(role, mut parts)| {
                if parts.is_empty() {
                    parts.push(json!({"text": ""}));
                }
                json!({ "role": role, "parts": parts })
            })
            .collect();
        if contents.is_empty() {
            return Err(Error::invalid_argument("Cannot send an empty conversation"));
        }
        payload["contents"] = json!(contents);

        Ok(payload)
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| Error::env("GEMINI_API_KEY environment variable not set."))?;

        let response = self
            .client
            .post(self.url())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", api_key.expose())
            .body(request_json.to_string())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            // エラーレスポンスを解析してメッセージを抽出
            let error_msg = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(String::from))
                .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text));
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        Ok(response_text)
    }

    fn parse_response(&self, response_json: &str) -> Result<ModelResponse, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        let content = &v["candidates"][0]["content"];
        if !content.is_object() {
            return Err(Error::malformed("Invalid response from model"));
        }

        let mut text: Option<String> = None;
        let mut function_calls = Vec::new();
        for part in content["parts"].as_array().into_iter().flatten() {
            // 思考過程の part は応答テキストに含めない
            if part["thought"].as_bool() == Some(true) {
                continue;
            }
            if let Some(t) = part["text"].as_str() {
                text.get_or_insert_with(String::new).push_str(t);
            }
            if let Some(fc) = part["functionCall"].as_object() {
                let name = fc
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::malformed("functionCall without name"))?
                    .to_string();
                let id = fc
                    .get("id")
                    .and_then(Value::as_str)
                    .map(String::from)
                    .unwrap_or_else(|| format!("call_{}", name));
                let args = fc.get("args").cloned().unwrap_or_else(|| json!({}));
                function_calls.push(FunctionCall {
                    id,
                    name,
                    args,
                    thought_signature: part["thoughtSignature"].as_str().map(String::from),
                });
            }
        }

        Ok(ModelResponse {
            text,
            function_calls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(api_key: Option<&str>) -> GeminiProvider {
        GeminiProvider::new(None, api_key.map(ApiKey::new), Duration::from_secs(5)).unwrap()
    }

    fn tool_defs() -> Vec<ToolDef> {
        vec![ToolDef {
            name: "addJournalEntry".to_string(),
            description: "Adds an entry".to_string(),
            parameters: json!({"type": "object"}),
        }]
    }

    #[test]
    fn test_default_model_and_url() {
        let p = provider(Some("k"));
        assert_eq!(p.model(), "gemini-2.5-flash");
        assert_eq!(
            p.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        let p = p.with_endpoint("http://127.0.0.1:9/v1/");
        assert_eq!(p.url(), "http://127.0.0.1:9/v1/models/gemini-2.5-flash:generateContent");
    }

    #[test]
    fn test_make_request_payload_simple() {
        let p = provider(Some("k"));
        let payload = p
            .make_request_payload(&[Msg::user("Hello")], None, None)
            .unwrap();
        let contents = payload["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "Hello");
        // ツール未指定なら tools キー自体を出さない
        assert!(payload.get("tools").is_none());
        assert!(payload.get("systemInstruction").is_none());
    }

    #[test]
    fn test_make_request_payload_with_system_and_tools() {
        let p = provider(Some("k"));
        let defs = tool_defs();
        let payload = p
            .make_request_payload(&[Msg::user("Hi")], Some("Journal only"), Some(&defs))
            .unwrap();
        assert_eq!(payload["systemInstruction"]["parts"][0]["text"], "Journal only");
        let decls = payload["tools"][0]["functionDeclarations"].as_array().unwrap();
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0]["name"], "addJournalEntry");
    }

    #[test]
    fn test_make_request_payload_system_from_history() {
        let p = provider(Some("k"));
        let payload = p
            .make_request_payload(&[Msg::system("from history"), Msg::user("Hi")], None, None)
            .unwrap();
        assert_eq!(payload["systemInstruction"]["parts"][0]["text"], "from history");
        assert_eq!(payload["contents"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_make_request_payload_tool_exchange() {
        let p = provider(Some("k"));
        let history = vec![
            Msg::user("add eggs"),
            Msg::assistant("Sure."),
            Msg::tool_call(
                "call_addJournalEntry",
                "addJournalEntry",
                json!({"category": "SHOPPING", "content": "eggs"}),
                Some("sig".to_string()),
            ),
            Msg::tool_result(
                "call_addJournalEntry",
                "addJournalEntry",
                json!({"success": true}),
            ),
        ];
        let payload = p.make_request_payload(&history, None, None).unwrap();
        let contents = payload["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[1]["role"], "model");
        let parts = contents[1]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["text"], "Sure.");
        assert_eq!(parts[1]["functionCall"]["name"], "addJournalEntry");
        assert_eq!(parts[1]["thoughtSignature"], "sig");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["functionResponse"]["name"], "addJournalEntry");
        assert_eq!(
            contents[2]["parts"][0]["functionResponse"]["response"]["success"],
            true
        );
    }

    #[test]
    fn test_make_request_payload_rejects_empty_history() {
        let p = provider(Some("k"));
        let r = p.make_request_payload(&[], Some("sys"), None);
        assert!(matches!(r, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_make_http_request_without_key_is_env_error() {
        let p = provider(None);
        let r = p.make_http_request("{}");
        assert!(matches!(r, Err(Error::Env(_))));
    }

    #[test]
    fn test_parse_response_text() {
        let p = provider(Some("k"));
        let r = p
            .parse_response(r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello"},{"text":" there"}]}}]}"#)
            .unwrap();
        assert_eq!(r.text.as_deref(), Some("Hello there"));
        assert!(r.function_calls.is_empty());
    }

    #[test]
    fn test_parse_response_function_call() {
        let p = provider(Some("k"));
        let r = p
            .parse_response(
                r#"{"candidates":[{"content":{"role":"model","parts":[
                    {"functionCall":{"name":"getJournalEntries","args":{"category":"SHOPPING"}},"thoughtSignature":"abc"}
                ]}}]}"#,
            )
            .unwrap();
        assert!(r.text.is_none());
        let call = r.first_call().unwrap();
        assert_eq!(call.id, "call_getJournalEntries");
        assert_eq!(call.name, "getJournalEntries");
        assert_eq!(call.args["category"], "SHOPPING");
        assert_eq!(call.thought_signature.as_deref(), Some("abc"));
    }

    #[test]
    fn test_parse_response_skips_thought_parts() {
        let p = provider(Some("k"));
        let r = p
            .parse_response(r#"{"candidates":[{"content":{"parts":[{"text":"thinking","thought":true},{"text":"Done"}]}}]}"#)
            .unwrap();
        assert_eq!(r.text.as_deref(), Some("Done"));
    }

    #[test]
    fn test_parse_response_missing_content_is_malformed() {
        let p = provider(Some("k"));
        let r = p.parse_response(r#"{"candidates":[]}"#);
        assert_eq!(r, Err(Error::malformed("Invalid response from model")));
    }

    #[test]
    fn test_parse_response_api_error() {
        let p = provider(Some("k"));
        let r = p.parse_response(r#"{"error":{"message":"API key not valid"}}"#);
        assert_eq!(r, Err(Error::http("Gemini API error: API key not valid")));
    }

    #[test]
    fn test_parse_response_invalid_json() {
        let p = provider(Some("k"));
        assert!(matches!(p.parse_response("not json"), Err(Error::Json(_))));
    }
}
