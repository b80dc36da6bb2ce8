//! Inbound ポート: ドライバ（CLI / REPL）がアプリを呼び出すインターフェース

use crate::domain::{Journal, JournalCommand};
use common::error::Error;
use common::msg::Msg;

/// 1 発話を処理した結果。セッションが成功時にまとめて反映する
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedResponse {
    pub new_history: Vec<Msg>,
    pub new_journal: Journal,
    pub reply: String,
}

/// 発話を解釈してジャーナルを更新するプロセッサ（ルールベース / リモートモデル）
///
/// 入力の history / journal は変更しない。失敗したら何も反映されない。
pub trait MessageProcessor: Send + Sync {
    /// ログ用の名前
    fn name(&self) -> &'static str;

    fn process(
        &self,
        text: &str,
        history: &[Msg],
        journal: &Journal,
    ) -> Result<ProcessedResponse, Error>;
}

/// コマンドを実行する Inbound ポート（main はこれを呼ぶ）
pub trait UseCaseRunner {
    fn run(&self, command: JournalCommand) -> Result<i32, Error>;
}
