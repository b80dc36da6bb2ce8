//! ルールベース分類の結果（タグ付き variant）

use crate::domain::Category;

/// ユーザー発話の意図
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// 計算・一般知識の質問（断る）
    OutOfScope,
    /// 買い物リストの問い合わせ
    ShoppingQuery,
    /// 明示的な追加
    Add { content: String, category: Category },
    /// どれにも当たらなかった発話をそのまま保存
    Fallback { content: String, category: Category },
}

impl Intent {
    /// ログ用の短い名前
    pub fn name(&self) -> &'static str {
        match self {
            Intent::OutOfScope => "out_of_scope",
            Intent::ShoppingQuery => "shopping_query",
            Intent::Add { .. } => "add",
            Intent::Fallback { .. } => "fallback",
        }
    }
}
