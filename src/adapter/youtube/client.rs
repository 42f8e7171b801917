//! YouTube Resumable Upload Client
//!
//! YouTube Data API v3 の再開可能アップロードプロトコル
//!
//! 1. メタデータを POST してセッションURI（`Location`）を取得
//! 2. チャンクを `Content-Range: bytes a-b/total` 付きで PUT
//! 3. `308` なら送信途中（`Range` から次の位置を決める）、`200/201` なら完了
//! 4. エラーの後は `Content-Range: bytes */total` で位置を再同期

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{CONTENT_LENGTH, CONTENT_RANGE, LOCATION, RANGE};
use reqwest::{Response, StatusCode};
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use url::Url;

use crate::domain::entities::video_metadata::VideoMetadata;
use crate::domain::errors::{ConnectionFailure, TransportError};
use crate::domain::repositories::upload_transport::{
    ChunkOutcome, UploadResponse, UploadSession, UploadTransport,
};

pub const UPLOAD_URL: &str = "https://www.googleapis.com/upload/youtube/v3/videos";
/// 256 KiB の倍数である必要がある
pub const CHUNK_SIZE: u64 = 8 * 1024 * 1024;

const CONNECT_TIMEOUT_SECS: u64 = 30;
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// reqwest のエラーを接続レベルの失敗に分類する
pub fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    let kind = if e.is_timeout() {
        ConnectionFailure::ResponseNotReady
    } else if e.is_connect() {
        ConnectionFailure::NotConnected
    } else if e.is_body() || e.is_decode() {
        ConnectionFailure::IncompleteRead
    } else if e.is_request() {
        ConnectionFailure::CannotSendRequest
    } else {
        ConnectionFailure::ImproperConnectionState
    };
    TransportError::connection(kind, e.to_string())
}

/// チャンク送信用の `Content-Range` ヘッダー値
pub fn content_range(start: u64, len: u64, total: u64) -> String {
    if len == 0 {
        format!("bytes */{}", total)
    } else {
        format!("bytes {}-{}/{}", start, start + len - 1, total)
    }
}

/// `308` レスポンスの `Range: bytes=0-N` から次の送信位置を求める
pub fn parse_range_header(value: &str) -> Option<u64> {
    let (first, last) = value.trim().strip_prefix("bytes=")?.split_once('-')?;
    if first.parse::<u64>().ok()? != 0 {
        return None;
    }
    last.parse::<u64>().ok().map(|last| last + 1)
}

/// 完了レスポンスのボディから動画IDを取り出す
pub fn parse_completed(body: String) -> UploadResponse {
    let id = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("id").and_then(|id| id.as_str()).map(String::from));
    UploadResponse { id, raw: body }
}

/// 認証済みの YouTube アップロード転送
pub struct ReqwestTransport {
    client: reqwest::Client,
    access_token: String,
    upload_url: Url,
}

impl ReqwestTransport {
    pub fn new(access_token: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            // 308 はリダイレクトではなく送信途中を表す
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            access_token: access_token.into(),
            upload_url: Url::parse(UPLOAD_URL)?,
        })
    }

    /// アップロード先のURLを差し替える
    pub fn with_upload_url(mut self, upload_url: Url) -> Self {
        self.upload_url = upload_url;
        self
    }
}

#[async_trait]
impl UploadTransport for ReqwestTransport {
    async fn begin_resumable_upload(
        &self,
        file: &Path,
        metadata: &VideoMetadata,
    ) -> Result<Box<dyn UploadSession>, TransportError> {
        let total = tokio::fs::metadata(file)
            .await
            .map_err(|e| TransportError::Other(format!("{}: {}", file.display(), e)))?
            .len();

        let mut start_url = self.upload_url.clone();
        start_url
            .query_pairs_mut()
            .append_pair("uploadType", "resumable")
            .append_pair("part", metadata.parts());

        Ok(Box::new(YouTubeUploadSession {
            client: self.client.clone(),
            access_token: self.access_token.clone(),
            start_url,
            body: metadata.to_body(),
            file: file.to_path_buf(),
            total,
            chunk_size: CHUNK_SIZE,
            session_uri: None,
            offset: 0,
            needs_resync: false,
        }))
    }
}

/// 1ファイル分のアップロードセッション
///
/// ネットワーク通信はすべて `next_chunk` の中で行う
pub struct YouTubeUploadSession {
    client: reqwest::Client,
    access_token: String,
    start_url: Url,
    body: serde_json::Value,
    file: PathBuf,
    total: u64,
    chunk_size: u64,
    session_uri: Option<Url>,
    offset: u64,
    needs_resync: bool,
}

impl YouTubeUploadSession {
    async fn start_session(&self) -> Result<Url, TransportError> {
        let response = self
            .client
            .post(self.start_url.clone())
            .bearer_auth(&self.access_token)
            .header("X-Upload-Content-Length", self.total)
            .header("X-Upload-Content-Type", "video/*")
            .json(&self.body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(map_reqwest_error)?;
            return Err(TransportError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                TransportError::connection(
                    ConnectionFailure::BadStatusLine,
                    "resumable session response without Location",
                )
            })?;
        let session_uri = Url::parse(location).map_err(|e| {
            TransportError::connection(ConnectionFailure::BadStatusLine, e.to_string())
        })?;

        info!("Opened resumable upload session for {}", self.file.display());
        debug!("Session URI: {}", session_uri);
        Ok(session_uri)
    }

    async fn read_chunk(&self) -> Result<Vec<u8>, TransportError> {
        let len = self.chunk_size.min(self.total.saturating_sub(self.offset));
        let read = async {
            let mut file = tokio::fs::File::open(&self.file).await?;
            file.seek(SeekFrom::Start(self.offset)).await?;
            let mut buf = vec![0; len as usize];
            file.read_exact(&mut buf).await?;
            Ok::<_, std::io::Error>(buf)
        };
        read.await
            .map_err(|e| TransportError::Other(format!("{}: {}", self.file.display(), e)))
    }

    /// 308 / 200 / 201 を解釈する
    async fn handle_response(&mut self, response: Response) -> Result<ChunkOutcome, TransportError> {
        let status = response.status();
        match status {
            StatusCode::PERMANENT_REDIRECT => {
                self.offset = match response.headers().get(RANGE) {
                    Some(value) => value
                        .to_str()
                        .ok()
                        .and_then(parse_range_header)
                        .ok_or_else(|| {
                            TransportError::connection(
                                ConnectionFailure::BadStatusLine,
                                format!("unparsable Range header {:?}", value),
                            )
                        })?,
                    None => 0,
                };
                debug!("Server has {} of {} bytes", self.offset, self.total);
                Ok(ChunkOutcome::InProgress {
                    uploaded: self.offset,
                    total: self.total,
                })
            }
            StatusCode::OK | StatusCode::CREATED => {
                let body = response.text().await.map_err(map_reqwest_error)?;
                self.offset = self.total;
                Ok(ChunkOutcome::Completed(parse_completed(body)))
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(TransportError::Http {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    async fn resync(&mut self, session_uri: Url) -> Result<ChunkOutcome, TransportError> {
        debug!("Resynchronising upload of {}", self.file.display());
        let response = self
            .client
            .put(session_uri)
            .bearer_auth(&self.access_token)
            .header(CONTENT_RANGE, format!("bytes */{}", self.total))
            .header(CONTENT_LENGTH, 0)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.handle_response(response).await
    }

    async fn advance(&mut self) -> Result<ChunkOutcome, TransportError> {
        let session_uri = match &self.session_uri {
            Some(uri) => uri.clone(),
            None => {
                let uri = self.start_session().await?;
                self.session_uri = Some(uri.clone());
                uri
            }
        };

        if self.needs_resync {
            let outcome = self.resync(session_uri.clone()).await?;
            self.needs_resync = false;
            if let ChunkOutcome::Completed(_) = outcome {
                return Ok(outcome);
            }
        }

        let chunk = self.read_chunk().await?;
        let range = content_range(self.offset, chunk.len() as u64, self.total);
        debug!("PUT {} ({})", self.file.display(), range);

        let response = self
            .client
            .put(session_uri)
            .bearer_auth(&self.access_token)
            .header(CONTENT_RANGE, range)
            .header(CONTENT_LENGTH, chunk.len())
            .body(chunk)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.handle_response(response).await
    }
}

#[async_trait]
impl UploadSession for YouTubeUploadSession {
    async fn next_chunk(&mut self) -> Result<ChunkOutcome, TransportError> {
        let result = self.advance().await;
        if result.is_err() && self.session_uri.is_some() {
            self.needs_resync = true;
        }
        result
    }
}
