//! YouTube Service
//!
//! 認証済みアップロード転送のスコープ付き取得

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::path::Path;
use std::sync::Arc;

use super::auth::{Authorizer, CredentialCache, OAuthClient};
use super::client::ReqwestTransport;
use crate::domain::entities::video_metadata::VideoMetadata;
use crate::domain::errors::{TransportError, UsageError};
use crate::domain::repositories::upload_transport::{
    TransportProvider, UploadSession, UploadTransport,
};
use crate::domain::repositories::user_prompt::UserPrompt;
use crate::domain::services::scope_latch::{ScopeLatch, ScopeToken};

/// YouTube Data API へのアップロードサービス
///
/// `acquire` で得たリースが生きている間だけ転送が使える
pub struct YouTubeService {
    oauth: OAuthClient,
    prompt: Arc<dyn UserPrompt>,
    latch: ScopeLatch,
}

impl YouTubeService {
    /// client secrets を読み込んでサービスを作成
    ///
    /// # Errors
    ///
    /// ファイルが存在しない場合は `UsageError::MissingClientSecrets`
    pub fn new(secrets_path: &Path, prompt: Arc<dyn UserPrompt>) -> Result<Self> {
        if !secrets_path.is_file() {
            return Err(UsageError::MissingClientSecrets(secrets_path.to_path_buf()).into());
        }
        let oauth = OAuthClient::load(secrets_path)?;
        debug!("Loaded client secrets for {}", oauth.client_id);

        Ok(Self {
            oauth,
            prompt,
            latch: ScopeLatch::new(),
        })
    }
}

/// 有効なアップロードスコープ
///
/// drop で認証キャッシュを削除し、スコープを解放する
struct YouTubeLease<'a> {
    transport: ReqwestTransport,
    cache: CredentialCache,
    _token: ScopeToken<'a>,
}

#[async_trait]
impl UploadTransport for YouTubeLease<'_> {
    async fn begin_resumable_upload(
        &self,
        file: &Path,
        metadata: &VideoMetadata,
    ) -> Result<Box<dyn UploadSession>, TransportError> {
        self.transport.begin_resumable_upload(file, metadata).await
    }
}

impl Drop for YouTubeLease<'_> {
    fn drop(&mut self) {
        info!(
            "Releasing upload session, removing credential cache {}",
            self.cache.path().display()
        );
    }
}

#[async_trait]
impl TransportProvider for YouTubeService {
    async fn acquire<'a>(&'a self) -> Result<Box<dyn UploadTransport + 'a>> {
        let token = self.latch.enter()?;

        let mut cache = CredentialCache::create()?;
        let credentials = match cache.load()? {
            Some(credentials) => credentials,
            None => {
                let authorizer = Authorizer::new(&self.oauth, self.prompt.as_ref())?;
                let credentials = authorizer
                    .authorize()
                    .await
                    .context("YouTube authorization failed")?;
                cache.save(&credentials)?;
                credentials
            }
        };

        let transport = ReqwestTransport::new(credentials.access_token)?;
        info!("Acquired upload session");

        Ok(Box::new(YouTubeLease {
            transport,
            cache,
            _token: token,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::terminal::prompt::TerminalPrompt;
    use std::io::{sink, Cursor};
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn secrets_file() -> NamedTempFile {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{"installed": {"client_id": "id", "client_secret": "secret"}}"#,
        )
        .unwrap();
        file
    }

    fn closed_prompt() -> Arc<dyn UserPrompt> {
        Arc::new(TerminalPrompt::new(Cursor::new(Vec::new()), sink()))
    }

    #[test]
    fn test_missing_secrets_is_usage_error() {
        let result = YouTubeService::new(Path::new("/nonexistent/secrets.json"), closed_prompt());
        let err = result.err().unwrap();
        assert_eq!(
            err.downcast_ref::<UsageError>(),
            Some(&UsageError::MissingClientSecrets(PathBuf::from(
                "/nonexistent/secrets.json"
            )))
        );
    }

    #[test]
    fn test_invalid_secrets() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{}").unwrap();
        assert!(YouTubeService::new(file.path(), closed_prompt()).is_err());
    }

    #[tokio::test]
    async fn test_acquire_rejects_reentry() {
        let secrets = secrets_file();
        let service = YouTubeService::new(secrets.path(), closed_prompt()).unwrap();

        let _held = service.latch.enter().unwrap();
        let err = service.acquire().await.err().unwrap();

        assert_eq!(
            err.downcast_ref::<UsageError>(),
            Some(&UsageError::ScopeAlreadyActive)
        );
    }

    #[tokio::test]
    async fn test_failed_authorization_releases_scope() {
        let secrets = secrets_file();
        let service = YouTubeService::new(secrets.path(), closed_prompt()).unwrap();

        // 入力が閉じているので認可コードを読めない
        assert!(service.acquire().await.is_err());
        assert!(!service.latch.is_active());
    }
}
