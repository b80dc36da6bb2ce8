//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::ApiKey;
use crate::ports::outbound::EnvResolver;
use std::env;

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn api_key(&self) -> Option<ApiKey> {
        ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|name| env::var(name).ok())
            .find(|v| !v.trim().is_empty())
            .map(|v| ApiKey::new(v.trim()))
    }
}
