//! # Domain Errors
//!
//! エラー分類（回復可能 / リトライ可能 / 致命的）
//!
//! - **ValidationError**: Entry の不正なフィールド（回復可能）
//! - **InputError**: プロンプトへの不正な入力（再入力で回復）
//! - **PromptError**: 入力ストリームの終了・I/O 失敗（致命的）
//! - **TransportError**: 転送エラー（`is_retriable()` で分類）
//! - **UploadError**: アップロードの致命的失敗
//! - **UsageError**: 起動時・スコープ取得時の利用エラー

use std::path::PathBuf;
use thiserror::Error;

/// Entry 構築時のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid exercise {0}")]
    InvalidExercise(String),

    #[error("Invalid set {0}")]
    InvalidSet(String),

    #[error("Invalid reps {0}")]
    InvalidReps(String),

    #[error("Invalid weight {0}")]
    InvalidWeight(String),

    #[error("Invalid day {0}")]
    InvalidDay(String),
}

/// プロンプト入力の検証エラー（常に再入力で回復）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Expected an integer, got \"{0}\".")]
    NotAnInteger(String),

    #[error("Received integer too small. Minimum is {0}.")]
    TooSmall(i64),

    #[error("Received integer too large. Maximum is {0}.")]
    TooLarge(i64),

    #[error("Expected boolean value ie yes/y, no/n.")]
    NotABoolean,
}

/// ユーザー入力の取得に失敗した場合のエラー
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Input stream closed")]
    Closed,

    #[error("Nothing to choose from")]
    EmptyMenu,

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// 接続レベルの転送失敗
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionFailure {
    NotConnected,
    IncompleteRead,
    ImproperConnectionState,
    CannotSendRequest,
    CannotSendHeader,
    ResponseNotReady,
    BadStatusLine,
}

impl std::fmt::Display for ConnectionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConnectionFailure::NotConnected => "not connected",
            ConnectionFailure::IncompleteRead => "incomplete read",
            ConnectionFailure::ImproperConnectionState => "improper connection state",
            ConnectionFailure::CannotSendRequest => "cannot send request",
            ConnectionFailure::CannotSendHeader => "cannot send header",
            ConnectionFailure::ResponseNotReady => "response not ready",
            ConnectionFailure::BadStatusLine => "bad status line",
        };
        f.write_str(name)
    }
}

/// Error reported by an upload session for a single chunk request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("{kind}: {detail}")]
    Connection {
        kind: ConnectionFailure,
        detail: String,
    },

    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Upload made no progress (server has {uploaded} bytes)")]
    Stalled { uploaded: u64 },

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn connection(kind: ConnectionFailure, detail: impl Into<String>) -> Self {
        TransportError::Connection {
            kind,
            detail: detail.into(),
        }
    }

    /// リトライ可能な一時的エラーかどうか
    pub fn is_retriable(&self) -> bool {
        match self {
            TransportError::Connection { .. } => true,
            TransportError::Http { status, .. } => {
                crate::domain::services::retry_policy::is_retriable_status(*status)
            }
            TransportError::Stalled { .. } => true,
            TransportError::Other(_) => false,
        }
    }
}

/// アップロードの致命的エラー
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No longer attempting to retry after {retries} retries: {last}")]
    RetriesExhausted { retries: u32, last: TransportError },

    #[error("Upload failed: {0}")]
    Transport(TransportError),

    #[error("The upload failed with an unexpected response: {0}")]
    MissingIdentifier(String),

    #[error("Video file {0} does not exist")]
    MissingFile(PathBuf),

    #[error("Could not open upload session: {0}")]
    Session(String),
}

/// 利用エラー（起動時・スコープ取得時に致命的）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Path {0} is not a directory!")]
    NotADirectory(PathBuf),

    #[error("No video files found in {0}")]
    NoVideos(PathBuf),

    #[error("Could not find client secrets file {0}")]
    MissingClientSecrets(PathBuf),

    #[error("Cannot acquire the upload session while it is already active")]
    ScopeAlreadyActive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_errors_are_retriable() {
        let err = TransportError::connection(ConnectionFailure::BadStatusLine, "garbage");
        assert!(err.is_retriable());
        assert_eq!(err.to_string(), "bad status line: garbage");
    }

    #[test]
    fn test_http_retriable_statuses() {
        for status in [500, 502, 503, 504] {
            let err = TransportError::Http {
                status,
                body: String::new(),
            };
            assert!(err.is_retriable(), "{} should be retriable", status);
        }

        for status in [400, 401, 403, 404, 501] {
            let err = TransportError::Http {
                status,
                body: String::new(),
            };
            assert!(!err.is_retriable(), "{} should not be retriable", status);
        }
    }

    #[test]
    fn test_stalled_is_retriable() {
        let err = TransportError::Stalled { uploaded: 0 };
        assert!(err.is_retriable());
        assert_eq!(
            err.to_string(),
            "Upload made no progress (server has 0 bytes)"
        );
    }

    #[test]
    fn test_other_is_fatal() {
        assert!(!TransportError::Other("file vanished".to_string()).is_retriable());
    }

    #[test]
    fn test_input_error_messages() {
        assert_eq!(
            InputError::TooSmall(1).to_string(),
            "Received integer too small. Minimum is 1."
        );
        assert_eq!(
            InputError::TooLarge(600).to_string(),
            "Received integer too large. Maximum is 600."
        );
    }
}
