//! # Upload Transport Traits
//!
//! 再開可能なチャンクアップロードの転送プリミティブを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::domain::entities::video_metadata::VideoMetadata;
use crate::domain::errors::TransportError;

/// 完了したアップロードのレスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    /// リモートの動画 ID
    pub id: Option<String>,
    /// レスポンスボディ（診断用）
    pub raw: String,
}

/// 1チャンク送信の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// まだ送信途中
    InProgress { uploaded: u64, total: u64 },
    /// 転送完了
    Completed(UploadResponse),
}

/// 再開可能なアップロードセッション
#[async_trait]
pub trait UploadSession: Send {
    /// 次のチャンクを送信する
    ///
    /// 失敗した後に呼び出すと、同じ位置から送信を再開する
    async fn next_chunk(&mut self) -> Result<ChunkOutcome, TransportError>;
}

/// アップロード転送
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// 再開可能なアップロードを開始する
    ///
    /// # Arguments
    ///
    /// * `file` - アップロードする動画ファイル
    /// * `metadata` - 動画メタデータ
    async fn begin_resumable_upload(
        &self,
        file: &Path,
        metadata: &VideoMetadata,
    ) -> Result<Box<dyn UploadSession>, TransportError>;
}

/// 認証済み転送のスコープ付き取得
///
/// 返されたリースが drop されるとスコープは解放される
#[async_trait]
pub trait TransportProvider: Send + Sync {
    /// 転送を取得する
    ///
    /// # Errors
    ///
    /// 既にスコープが有効な場合、または認証に失敗した場合にエラーを返す
    async fn acquire<'a>(&'a self) -> Result<Box<dyn UploadTransport + 'a>>;
}
