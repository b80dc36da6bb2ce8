//! アダプター（外界の I/O を trait で抽象化した Outbound ポートの実装）
//!
//! usecase はポートの trait 経由でのみ時刻・ID・環境変数・ログに触れる。
//! 実装は標準実装（Std*）やテスト用の固定実装を注入する。

pub mod file_json_log;
pub mod stderr_log;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_id_generator;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use stderr_log::{format_human, FanoutLog, StderrLog};
pub use std_clock::{FixedClock, StdClock};
pub use std_env_resolver::StdEnvResolver;
pub use std_id_generator::StdIdGenerator;
