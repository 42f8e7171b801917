//! # Planner Options DTO
//!
//! ワークフローの設定のData Transfer Object

use std::path::PathBuf;

use crate::domain::entities::entry::Entry;
use crate::domain::entities::video_metadata::{PrivacyStatus, VideoMetadata, DEFAULT_CATEGORY_ID};

/// ワークフロー設定
#[derive(Debug, Clone)]
pub struct PlannerOptions {
    /// 動画が置かれたディレクトリ
    pub directory: PathBuf,
    /// 動画の説明文
    pub description: String,
    /// YouTube のカテゴリID
    pub category_id: u32,
    /// 公開設定
    pub privacy_status: PrivacyStatus,
    /// アップロードせずに内容だけ表示する
    pub dry_run: bool,
}

impl PlannerOptions {
    /// 既定値で作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use workout_uploader::application::dto::planner_options::PlannerOptions;
    ///
    /// let options = PlannerOptions::new("/videos");
    ///
    /// assert_eq!(options.category_id, 22);
    /// assert_eq!(options.description, "");
    /// assert!(!options.dry_run);
    /// ```
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            description: String::new(),
            category_id: DEFAULT_CATEGORY_ID,
            privacy_status: PrivacyStatus::default(),
            dry_run: false,
        }
    }

    /// エントリのアップロード用メタデータ
    pub fn metadata_for(&self, entry: &Entry) -> VideoMetadata {
        VideoMetadata::new(entry.label(), entry.tags())
            .with_description(self.description.clone())
            .with_category(self.category_id)
            .with_privacy(self.privacy_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::entry::Exercise;

    #[test]
    fn test_metadata_for_entry() {
        let mut options = PlannerOptions::new("/videos");
        options.description = "garage gym".to_string();
        options.privacy_status = PrivacyStatus::Private;

        let entry = Entry::warmup("/videos/a.mp4", Exercise::Deadlift, 2, "2024-03-04").unwrap();
        let metadata = options.metadata_for(&entry);

        assert_eq!(metadata.title, "day 2 deadlift warmup 2024-03-04");
        assert_eq!(metadata.tags, vec!["Deadlift", "Warming Up"]);
        assert_eq!(metadata.description, "garage gym");
        assert_eq!(metadata.category_id, 22);
        assert_eq!(metadata.privacy_status, PrivacyStatus::Private);
    }
}
