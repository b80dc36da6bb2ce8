//! journal コマンドの enum（Command Pattern）
//!
//! 対話モード vs 1 回送信の分岐を enum で明示する。

use crate::domain::ProcessorMode;
use clap_complete::Shell;
use common::domain::ModelName;
use std::path::PathBuf;
use std::time::Duration;

/// セッションの組み立てに必要な設定
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub mode: ProcessorMode,
    pub model: Option<ModelName>,
    pub timeout: Duration,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

/// journal の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum JournalCommand {
    /// ヘルプ表示
    Help,
    /// 補完スクリプトを出力
    Completion(Shell),
    /// 対話（REPL）
    Chat(SessionOptions),
    /// メッセージを 1 件送って終了
    Send {
        options: SessionOptions,
        message: String,
    },
}
