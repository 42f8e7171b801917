//! Filesystem Video Source Implementation
//!
//! VideoSourceのファイルシステム実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

use crate::domain::repositories::video_source::VideoSource;

/// ファイルシステムベースの動画ソース
///
/// ディレクトリ直下のみを対象とし、サブディレクトリは辿らない
pub struct FsVideoSource {
    extensions: Vec<String>,
}

impl FsVideoSource {
    /// 新しい動画ソースを作成
    ///
    /// # Arguments
    ///
    /// * `extensions` - 動画として扱う拡張子（大文字小文字は区別しない）
    pub fn new(extensions: Vec<String>) -> Self {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        Self { extensions }
    }

    fn is_video(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    fn list_videos_internal(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            warn!("Video directory does not exist: {}", dir.display());
            return Ok(Vec::new());
        }

        let mut videos = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && self.is_video(path) {
                videos.push(path.to_path_buf());
            }
        }
        videos.sort();

        info!("Found {} video files in {}", videos.len(), dir.display());
        Ok(videos)
    }

    fn modified(video: &Path) -> Result<SystemTime> {
        fs::metadata(video)
            .and_then(|m| m.modified())
            .with_context(|| format!("Failed to read modification time: {}", video.display()))
    }

    fn date_of_internal(video: &Path) -> Result<String> {
        let modified: DateTime<Utc> = Self::modified(video)?.into();
        Ok(modified.format("%Y-%m-%d").to_string())
    }

    fn sort_by_mod_time_internal(videos: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
        let mut timed = videos
            .into_iter()
            .map(|video| Self::modified(&video).map(|time| (time, video)))
            .collect::<Result<Vec<_>>>()?;
        // 同時刻はパス順
        timed.sort();
        Ok(timed.into_iter().map(|(_, video)| video).collect())
    }
}

#[async_trait]
impl VideoSource for FsVideoSource {
    async fn list_videos(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let source = Self {
            extensions: self.extensions.clone(),
        };
        let dir = dir.to_path_buf();
        tokio::task::spawn_blocking(move || source.list_videos_internal(&dir))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn date_of(&self, video: &Path) -> Result<String> {
        let video = video.to_path_buf();
        tokio::task::spawn_blocking(move || Self::date_of_internal(&video))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn sort_by_mod_time(&self, videos: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
        tokio::task::spawn_blocking(move || Self::sort_by_mod_time_internal(videos))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn remove_video(&self, video: &Path) -> Result<()> {
        info!("Removing {}", video.display());
        tokio::fs::remove_file(video)
            .await
            .with_context(|| format!("Failed to remove video file: {}", video.display()))
    }
}

impl Default for FsVideoSource {
    fn default() -> Self {
        Self::new(vec!["mp4".to_string()])
    }
}
