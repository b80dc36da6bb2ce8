//! journal 共通ライブラリ
//!
//! `journal` コマンドが使うエラー型・会話履歴・ツール・LLM プロバイダ・ポートとアダプタを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// 型付き会話履歴
pub mod msg;

/// ツールとレジストリ
pub mod tool;

/// LLMドライバーとプロバイダ
pub mod llm;

/// Outbound ポート
pub mod ports;

/// ポートの標準実装
pub mod adapter;
