//! YouTube OAuth Authentication
//!
//! インストールアプリ向けOAuth 2.0フロー（認可コードを手動で貼り付ける）

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use url::Url;

use crate::domain::repositories::user_prompt::UserPrompt;

pub const YOUTUBE_UPLOAD_SCOPE: &str = "https://www.googleapis.com/auth/youtube.upload";

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
/// リダイレクト先がない場合に認可コードを画面に表示させる
const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

const MISSING_CLIENT_SECRETS_MESSAGE: &str = "Could not open client secrets file. \
For more information see https://console.developers.google.com/";

/// Expands tilde in path and returns the full path
pub fn expand_secrets_path(secrets_path: &str) -> String {
    shellexpand::tilde(secrets_path).to_string()
}

/// OAuthクライアントの情報
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OAuthClient {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Google形式の client secrets ファイル
#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    installed: Option<OAuthClient>,
    web: Option<OAuthClient>,
}

impl OAuthClient {
    /// client secrets ファイルを読み込む（`installed` または `web`）
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| {
            format!("{} ({})", MISSING_CLIENT_SECRETS_MESSAGE, path.display())
        })?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid client secrets file: {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: ClientSecretsFile = serde_json::from_str(content)?;
        file.installed
            .or(file.web)
            .context("Expected an \"installed\" or \"web\" client")
    }

    pub fn redirect_uri(&self) -> &str {
        self.redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or(OOB_REDIRECT_URI)
    }

    /// ユーザーがブラウザで開く認可URL
    pub fn authorization_url(&self) -> Result<Url> {
        let url = Url::parse_with_params(
            &self.auth_uri,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri()),
                ("scope", YOUTUBE_UPLOAD_SCOPE),
                ("response_type", "code"),
                ("access_type", "offline"),
            ],
        )
        .with_context(|| format!("Invalid auth_uri: {}", self.auth_uri))?;
        Ok(url)
    }
}

/// トークンエンドポイントから受け取る認証情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// 認証情報の一時キャッシュ
///
/// ファイルは drop 時に削除される
pub struct CredentialCache {
    file: NamedTempFile,
}

impl CredentialCache {
    pub fn create() -> Result<Self> {
        let file = NamedTempFile::new().context("Failed to create credential cache")?;
        debug!("Created credential cache {}", file.path().display());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// キャッシュ済みの認証情報（空なら None）
    pub fn load(&self) -> Result<Option<Credentials>> {
        let content = fs::read_to_string(self.file.path())
            .with_context(|| format!("Failed to read {}", self.file.path().display()))?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let credentials = serde_json::from_str(&content).context("Corrupt credential cache")?;
        Ok(Some(credentials))
    }

    pub fn save(&mut self, credentials: &Credentials) -> Result<()> {
        let json = serde_json::to_string(credentials)?;
        let file = self.file.as_file_mut();
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// 認可コードフローを実行する
pub struct Authorizer<'a> {
    client: reqwest::Client,
    oauth: &'a OAuthClient,
    prompt: &'a dyn UserPrompt,
}

impl<'a> Authorizer<'a> {
    pub fn new(oauth: &'a OAuthClient, prompt: &'a dyn UserPrompt) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            oauth,
            prompt,
        })
    }

    /// ブラウザでの認可を依頼し、貼り付けられたコードをトークンに交換する
    pub async fn authorize(&self) -> Result<Credentials> {
        let url = self.oauth.authorization_url()?;
        println!("Go to the following link in your browser:\n\n    {}\n", url);
        println!("Enter verification code:");
        let code = self.prompt.read_text()?;
        anyhow::ensure!(!code.is_empty(), "No verification code entered");

        let credentials = self.exchange_code(&code).await?;
        info!("Authentication successful");
        Ok(credentials)
    }

    async fn exchange_code(&self, code: &str) -> Result<Credentials> {
        let response = self
            .client
            .post(&self.oauth.token_uri)
            .form(&[
                ("code", code),
                ("client_id", self.oauth.client_id.as_str()),
                ("client_secret", self.oauth.client_secret.as_str()),
                ("redirect_uri", self.oauth.redirect_uri()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .context("Failed to reach the token endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Token exchange failed ({}): {}", status, body);
        }

        response
            .json::<Credentials>()
            .await
            .context("Failed to parse token response")
    }
}
