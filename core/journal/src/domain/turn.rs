//! 画面に並べる会話ターン（トランスクリプト）

/// 発話者
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// トランスクリプトの 1 ターン（追記のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub id: String,
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn model(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Model,
            content: content.into(),
        }
    }
}
