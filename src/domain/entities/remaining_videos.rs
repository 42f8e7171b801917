//! # RemainingVideos Value Object
//!
//! 選択中の日付で、まだエントリに割り当てられていない動画のキュー

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// 未割り当て動画のキュー（更新日時の昇順）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemainingVideos {
    queue: VecDeque<PathBuf>,
}

impl RemainingVideos {
    /// 当日の動画から割り当て済みの動画を除いたキューを作成
    ///
    /// # Arguments
    ///
    /// * `day_videos` - 当日の動画（更新日時の昇順でソート済み）
    /// * `claimed` - 既にエントリに割り当てられた動画
    pub fn new(day_videos: Vec<PathBuf>, claimed: &[PathBuf]) -> Self {
        let queue = day_videos
            .into_iter()
            .filter(|video| !claimed.contains(video))
            .collect();
        Self { queue }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// 先頭の動画
    pub fn peek(&self) -> Option<&Path> {
        self.queue.front().map(PathBuf::as_path)
    }

    /// 先頭の動画を取り出して割り当てる
    pub fn claim_next(&mut self) -> Option<PathBuf> {
        self.queue.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.queue.iter()
    }
}
