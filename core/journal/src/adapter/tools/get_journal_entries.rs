//! getJournalEntries ツール: カテゴリ・キーワードで絞り込んで返す（読み取りのみ）

use crate::domain::Category;
use crate::usecase::ToolContext;
use common::tool::{Tool, ToolError};
use serde_json::Value;

pub struct GetJournalEntriesTool;

impl GetJournalEntriesTool {
    pub const NAME: &'static str = "getJournalEntries";

    pub fn new() -> Self {
        Self
    }
}

impl Default for GetJournalEntriesTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool<ToolContext> for GetJournalEntriesTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Retrieves entries from the user's journal. Use this to answer questions about what the user has saved, such as \"what is on my shopping list?\"."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(serde_json::json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "enum": Category::wire_values(),
                    "description": "The category to filter entries by."
                },
                "keywords": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "A list of keywords to search for in the entry content."
                }
            },
            "required": []
        }))
    }

    fn call(&self, args: Value, ctx: &mut ToolContext) -> Result<Value, ToolError> {
        let category = match args.get("category") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(
                s.parse::<Category>()
                    .map_err(|e| ToolError::InvalidArgs(e.to_string()))?,
            ),
            Some(_) => return Err(ToolError::InvalidArgs("'category' must be a string".to_string())),
        };
        let keywords: Vec<String> = match args.get("keywords") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect(),
            Some(_) => return Err(ToolError::InvalidArgs("'keywords' must be an array".to_string())),
        };

        let entries: Vec<Value> = ctx
            .journal
            .query(category, &keywords)
            .into_iter()
            .map(|e| {
                serde_json::json!({
                    "content": e.content(),
                    "category": e.category().as_str()
                })
            })
            .collect();

        Ok(serde_json::json!({ "entries": entries }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::tools::test_context;

    fn seeded() -> ToolContext {
        let mut ctx = test_context();
        for (c, s) in [
            (Category::Shopping, "Milk"),
            (Category::Reminder, "call mom"),
            (Category::Shopping, "eggs"),
        ] {
            let e = ctx.factory.create(c, s).unwrap();
            ctx.journal.push(e);
        }
        ctx
    }

    #[test]
    fn test_get_by_category() {
        let mut ctx = seeded();
        let r = GetJournalEntriesTool::new()
            .call(serde_json::json!({"category": "SHOPPING"}), &mut ctx)
            .unwrap();
        assert_eq!(
            r,
            serde_json::json!({"entries": [
                {"content": "Milk", "category": "SHOPPING"},
                {"content": "eggs", "category": "SHOPPING"}
            ]})
        );
    }

    #[test]
    fn test_get_by_keywords_case_insensitive() {
        let mut ctx = seeded();
        let r = GetJournalEntriesTool::new()
            .call(serde_json::json!({"keywords": ["milk", "MOM"]}), &mut ctx)
            .unwrap();
        assert_eq!(r["entries"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_get_without_filters_returns_all_and_does_not_mutate() {
        let mut ctx = seeded();
        let before = ctx.journal.clone();
        let r = GetJournalEntriesTool::new()
            .call(serde_json::json!({"keywords": []}), &mut ctx)
            .unwrap();
        assert_eq!(r["entries"].as_array().unwrap().len(), 3);
        assert_eq!(ctx.journal, before);
    }

    #[test]
    fn test_get_no_match_is_empty_list() {
        let mut ctx = seeded();
        let r = GetJournalEntriesTool::new()
            .call(serde_json::json!({"category": "NOTE"}), &mut ctx)
            .unwrap();
        assert_eq!(r, serde_json::json!({"entries": []}));
    }

    #[test]
    fn test_schema_descriptions() {
        let def = GetJournalEntriesTool::new().definition();
        assert_eq!(def.name, "getJournalEntries");
        assert_eq!(
            def.parameters["properties"]["category"]["description"],
            "The category to filter entries by."
        );
        assert_eq!(
            def.parameters["properties"]["keywords"]["description"],
            "A list of keywords to search for in the entry content."
        );
        assert_eq!(def.parameters["required"], serde_json::json!([]));
    }

    #[test]
    fn test_get_unknown_category_is_invalid() {
        let mut ctx = seeded();
        let r = GetJournalEntriesTool::new().call(serde_json::json!({"category": "TODO"}), &mut ctx);
        assert!(matches!(r, Err(ToolError::InvalidArgs(_))));
    }
}
