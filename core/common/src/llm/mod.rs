//! LLMドライバーとプロバイダの実装
//!
//! プロバイダ（Gemini）の差異を provider 層で吸収し、ドライバーは共通の流れだけを持つ。

pub mod driver;
pub mod gemini;
pub mod provider;

pub use driver::LlmDriver;
pub use gemini::GeminiProvider;
pub use provider::{FunctionCall, LlmProvider, ModelResponse};
