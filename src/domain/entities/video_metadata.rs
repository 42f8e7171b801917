//! # VideoMetadata Value Object
//!
//! アップロード時に送信する動画メタデータ（snippet / status）

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// YouTube の "People & Blogs" カテゴリ
pub const DEFAULT_CATEGORY_ID: u32 = 22;

/// 公開設定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyStatus {
    Public,
    Private,
    #[default]
    Unlisted,
}

impl PrivacyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyStatus::Public => "public",
            PrivacyStatus::Private => "private",
            PrivacyStatus::Unlisted => "unlisted",
        }
    }
}

impl fmt::Display for PrivacyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid privacy status \"{0}\" (expected public, private or unlisted)")]
pub struct ParsePrivacyError(String);

impl FromStr for PrivacyStatus {
    type Err = ParsePrivacyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(PrivacyStatus::Public),
            "private" => Ok(PrivacyStatus::Private),
            "unlisted" => Ok(PrivacyStatus::Unlisted),
            other => Err(ParsePrivacyError(other.to_string())),
        }
    }
}

/// 動画メタデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category_id: u32,
    pub privacy_status: PrivacyStatus,
}

/// API リクエストボディ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoResource<'a> {
    snippet: Snippet<'a>,
    status: Status,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Snippet<'a> {
    title: &'a str,
    description: &'a str,
    tags: &'a [String],
    category_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Status {
    privacy_status: PrivacyStatus,
}

impl VideoMetadata {
    /// タイトルとタグから作成（説明は空、カテゴリと公開設定は既定値）
    pub fn new(title: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            tags,
            category_id: DEFAULT_CATEGORY_ID,
            privacy_status: PrivacyStatus::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category_id: u32) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn with_privacy(mut self, privacy_status: PrivacyStatus) -> Self {
        self.privacy_status = privacy_status;
        self
    }

    /// `part` クエリパラメータに指定するリソース名
    pub fn parts(&self) -> &'static str {
        "snippet,status"
    }

    /// snippet / status 形式の JSON ボディ
    pub fn to_body(&self) -> serde_json::Value {
        let resource = VideoResource {
            snippet: Snippet {
                title: &self.title,
                description: &self.description,
                tags: &self.tags,
                category_id: self.category_id.to_string(),
            },
            status: Status {
                privacy_status: self.privacy_status,
            },
        };
        serde_json::to_value(resource).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let metadata = VideoMetadata::new("day 1 squat warmup 2024-01-01", vec![]);
        assert_eq!(metadata.description, "");
        assert_eq!(metadata.category_id, 22);
        assert_eq!(metadata.privacy_status, PrivacyStatus::Unlisted);
    }

    #[test]
    fn test_to_body() {
        let metadata = VideoMetadata::new(
            "day 3 squat set 1 6x200 2024-01-01",
            vec!["Squat".to_string()],
        )
        .with_description("leg day")
        .with_privacy(PrivacyStatus::Private);

        assert_eq!(
            metadata.to_body(),
            json!({
                "snippet": {
                    "title": "day 3 squat set 1 6x200 2024-01-01",
                    "description": "leg day",
                    "tags": ["Squat"],
                    "categoryId": "22"
                },
                "status": {
                    "privacyStatus": "private"
                }
            })
        );
    }

    #[test]
    fn test_privacy_from_str() {
        assert_eq!("public".parse::<PrivacyStatus>().unwrap(), PrivacyStatus::Public);
        assert_eq!(
            "unlisted".parse::<PrivacyStatus>().unwrap(),
            PrivacyStatus::Unlisted
        );
        assert!("friends".parse::<PrivacyStatus>().is_err());
    }
}
