//! 環境変数解決 Outbound ポート
//!
//! usecase はこの trait 経由でのみ環境変数にアクセスする。
//! 参照する環境変数は API キーだけ。

use crate::domain::ApiKey;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// Gemini の API キー
    ///
    /// 優先順位:
    /// 1. GEMINI_API_KEY
    /// 2. API_KEY
    ///
    /// 空文字は未設定として扱う。
    fn api_key(&self) -> Option<ApiKey>;
}
