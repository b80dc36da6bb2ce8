//! エラーハンドリング
//!
//! 全レイヤーで共通のエラー型。終了コードは sysexits.h に合わせる。

/// エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 引数不正・空入力・不変条件違反
    #[error("{0}")]
    InvalidArgument(String),
    /// 認証情報などの設定不足
    #[error("{0}")]
    Env(String),
    /// HTTP 通信失敗・非 2xx ステータス
    #[error("{0}")]
    Http(String),
    /// JSON のシリアライズ／デシリアライズ失敗
    #[error("{0}")]
    Json(String),
    /// モデル応答に期待した構造がない
    #[error("{0}")]
    MalformedResponse(String),
    /// 端末・ログファイルの I/O
    #[error("{0}")]
    Io(String),
    /// その他
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Error::Env(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Error::Http(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Error::Json(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedResponse(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Error::System(msg.into())
    }

    /// 使い方の誤りか（main で usage を表示するかの判定に使う）
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 64,
            Error::Json(_) => 65,
            Error::Http(_) => 69,
            Error::System(_) => 70,
            Error::Io(_) => 74,
            Error::MalformedResponse(_) => 76,
            Error::Env(_) => 78,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        let err = Error::invalid_argument("test");
        assert_eq!(err.to_string(), "test");
        assert_eq!(err.exit_code(), 64);
        assert!(err.is_usage());

        let err = Error::system("test");
        assert_eq!(err.exit_code(), 70);
        assert!(!err.is_usage());
    }

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        assert_eq!(Error::env("no key").exit_code(), 78);
        assert_eq!(Error::http("down").exit_code(), 69);
        assert_eq!(Error::malformed("no candidates").exit_code(), 76);
        assert_eq!(Error::json("bad").exit_code(), 65);
        assert_eq!(Error::io_msg("closed").exit_code(), 74);
    }

    #[test]
    fn test_from_serde_json_error() {
        let e = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = e.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
