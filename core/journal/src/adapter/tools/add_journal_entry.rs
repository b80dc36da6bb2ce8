//! addJournalEntry ツール: 作業用 Journal にエントリを 1 件追加

use crate::domain::Category;
use crate::usecase::ToolContext;
use common::tool::{Tool, ToolError};
use serde_json::Value;

pub struct AddJournalEntryTool;

impl AddJournalEntryTool {
    pub const NAME: &'static str = "addJournalEntry";

    pub fn new() -> Self {
        Self
    }
}

impl Default for AddJournalEntryTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool<ToolContext> for AddJournalEntryTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Adds an entry to the user's journal. Use this to save notes, reminders, shopping list items, or recommendations."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(serde_json::json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "enum": Category::wire_values(),
                    "description": "The category of the journal entry."
                },
                "content": {
                    "type": "string",
                    "description": "The content of the journal entry. Should be a specific item, e.g., \"eggs\" or \"check out Kritunga\"."
                }
            },
            "required": ["category", "content"]
        }))
    }

    fn call(&self, args: Value, ctx: &mut ToolContext) -> Result<Value, ToolError> {
        let category = args
            .get("category")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArgs("missing 'category'".to_string()))?
            .parse::<Category>()
            .map_err(|e| ToolError::InvalidArgs(e.to_string()))?;
        let content = args
            .get("content")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArgs("missing 'content'".to_string()))?;

        let entry = ctx
            .factory
            .create(category, content)
            .map_err(|e| ToolError::InvalidArgs(e.to_string()))?;
        let message = format!("Added '{}' to {}.", entry.content(), category.label());
        ctx.journal.push(entry);

        Ok(serde_json::json!({
            "success": true,
            "message": message
        }))
    }
}
