//! Configuration
//!
//! JSON設定ファイルの読み込み（全フィールドに既定値あり）

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::domain::entities::video_metadata::{PrivacyStatus, DEFAULT_CATEGORY_ID};
use crate::domain::services::retry_policy::MAX_RETRIES;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    // Authentication
    pub client_secrets_path: String,

    // Video metadata
    pub category_id: u32,
    pub privacy_status: PrivacyStatus,
    pub description: String,

    // Discovery
    pub video_extensions: Vec<String>,

    // Upload (0..=MAX_RETRIES)
    pub max_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_secrets_path: "client_secrets.json".to_string(),
            category_id: DEFAULT_CATEGORY_ID,
            privacy_status: PrivacyStatus::default(),
            description: String::new(),
            video_extensions: vec!["mp4".to_string()],
            max_retries: MAX_RETRIES,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let path = shellexpand::tilde(path);
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        anyhow::ensure!(
            config.max_retries <= MAX_RETRIES,
            "max_retries must be at most {}, got {} in {}",
            MAX_RETRIES,
            config.max_retries,
            path
        );
        Ok(config)
    }
}
