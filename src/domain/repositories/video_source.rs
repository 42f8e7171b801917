//! # Video Source Trait
//!
//! 動画ファイルの発見と更新日時の取得を抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

/// 動画ソース
///
/// ディレクトリ内の動画ファイルの列挙、日付の取得、削除を担当する
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// ディレクトリ内の動画ファイルを列挙する
    ///
    /// # Arguments
    ///
    /// * `dir` - 動画が置かれたディレクトリ
    ///
    /// # Returns
    ///
    /// 拡張子が動画として認識されたファイルのパス
    async fn list_videos(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// 更新日時から動画の日付（`YYYY-MM-DD`）を返す
    async fn date_of(&self, video: &Path) -> Result<String>;

    /// 更新日時の昇順に並べ替える
    async fn sort_by_mod_time(&self, videos: Vec<PathBuf>) -> Result<Vec<PathBuf>>;

    /// アップロード済みの動画を削除する
    async fn remove_video(&self, video: &Path) -> Result<()>;
}
