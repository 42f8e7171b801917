//! # Upload Video Use Case
//!
//! 再開可能なチャンクアップロードを指数バックオフ付きで最後まで進める

use async_trait::async_trait;
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::video_metadata::VideoMetadata;
use crate::domain::errors::{TransportError, UploadError};
use crate::domain::repositories::upload_transport::{ChunkOutcome, UploadTransport};
use crate::domain::services::retry_policy::{max_backoff, MAX_RETRIES};

/// リトライ前の待機
#[async_trait]
pub trait Backoff: Send + Sync {
    /// `[0, max)` の範囲のランダムな時間だけ待機する
    async fn sleep_up_to(&self, max: Duration);
}

/// 動画アップローダー
pub struct Uploader {
    backoff: Arc<dyn Backoff>,
    max_retries: u32,
}

impl Uploader {
    pub fn new(backoff: Arc<dyn Backoff>) -> Self {
        Self {
            backoff,
            max_retries: MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// 動画をアップロードし、リモートの動画 ID を返す
    ///
    /// リトライ可能な転送エラーは同じチャンクを再送する。サーバーの受信済み
    /// バイト数が増えない InProgress もリトライとして数える。リトライ回数が上限を
    /// 超えた場合、リトライ不可能なエラー、ID のない完了レスポンスは致命的エラー。
    pub async fn upload(
        &self,
        transport: &dyn UploadTransport,
        file: &Path,
        metadata: &VideoMetadata,
    ) -> Result<String, UploadError> {
        let mut session = transport
            .begin_resumable_upload(file, metadata)
            .await
            .map_err(|e| UploadError::Session(e.to_string()))?;

        let mut retry = 0;
        let mut acknowledged = 0;
        println!("Uploading file {}...", file.display());

        loop {
            // 進捗のない InProgress はリトライ上限に数える
            let outcome = match session.next_chunk().await {
                Ok(ChunkOutcome::InProgress { uploaded, .. }) if uploaded <= acknowledged => {
                    Err(TransportError::Stalled { uploaded })
                }
                other => other,
            };

            match outcome {
                Ok(ChunkOutcome::Completed(response)) => {
                    return match response.id {
                        Some(id) => {
                            println!("Video id '{}' was successfully uploaded.", id);
                            Ok(id)
                        }
                        None => Err(UploadError::MissingIdentifier(response.raw)),
                    };
                }
                Ok(ChunkOutcome::InProgress { uploaded, total }) => {
                    debug!("Uploaded {} of {} bytes of {}", uploaded, total, file.display());
                    acknowledged = uploaded;
                }
                Err(e) if e.is_retriable() => {
                    warn!("A retriable error occurred: {}", e);
                    retry += 1;
                    if retry > self.max_retries {
                        return Err(UploadError::RetriesExhausted {
                            retries: self.max_retries,
                            last: e,
                        });
                    }

                    let max_sleep = max_backoff(retry);
                    info!(
                        "Retry {}/{}: sleeping up to {}s and then retrying...",
                        retry,
                        self.max_retries,
                        max_sleep.as_secs()
                    );
                    self.backoff.sleep_up_to(max_sleep).await;
                }
                Err(e) => return Err(UploadError::Transport(e)),
            }
        }
    }
}
