//! ツール実行の Ports & Adapters（trait で副作用隔離）
//!
//! ToolRegistry で name -> Tool を解決する。実行コンテキストの型 `C` は利用側が決める
//! （journal では作業用コピーの Journal を持つ ToolContext）。

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// ツール実行エラー（ドメイン層）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),
}

/// LLM に宣言するツール定義（function declaration）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// ツールのトレイト
pub trait Tool<C: ?Sized>: Send + Sync {
    /// ツール名（API の name と一致させる）
    fn name(&self) -> &'static str;
    /// モデルに見せる説明
    fn description(&self) -> &'static str;
    /// 引数の JSON Schema（None なら引数なし）
    fn parameters_schema(&self) -> Option<Value> {
        None
    }
    /// 引数とコンテキストで実行し、JSON 結果を返す
    fn call(&self, args: Value, ctx: &mut C) -> Result<Value, ToolError>;

    fn definition(&self) -> ToolDef {
        ToolDef {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self
                .parameters_schema()
                .unwrap_or_else(|| serde_json::json!({ "type": "object", "properties": {} })),
        }
    }
}

/// ツール名で解決するレジストリ（宣言順を保持する）
pub struct ToolRegistry<C: ?Sized> {
    tools: Vec<Arc<dyn Tool<C>>>,
}

impl<C: ?Sized> ToolRegistry<C> {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// 同名のツールは置き換える
    pub fn register(&mut self, tool: Arc<dyn Tool<C>>) {
        if let Some(slot) = self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            *slot = tool;
        } else {
            self.tools.push(tool);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool<C>>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// 登録順の定義一覧（リクエストの functionDeclarations に使う）
    pub fn list_definitions(&self) -> Vec<ToolDef> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn call(&self, name: &str, args: Value, ctx: &mut C) -> Result<Value, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.call(args, ctx)
    }
}

impl<C: ?Sized> Default for ToolRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
