//! Outbound ポート: アプリが外界を使うための trait
//!
//! 時刻・ID・ログは common のポートをそのまま使う。

pub mod model_client;

pub use common::ports::outbound::{Clock, IdGenerator, Log};
pub use model_client::ModelClient;
