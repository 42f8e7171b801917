//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapter::backoff::JitteredBackoff;
use crate::adapter::config::Config;
use crate::adapter::repositories::fs_video_source::FsVideoSource;
use crate::adapter::terminal::prompt::TerminalPrompt;
use crate::adapter::youtube::auth::expand_secrets_path;
use crate::adapter::youtube::YouTubeService;
use crate::application::dto::planner_options::PlannerOptions;
use crate::application::use_cases::plan_session::{PlanSummary, UploadPlanner};
use crate::application::use_cases::upload_video::Uploader;
use crate::domain::errors::UsageError;
use crate::domain::repositories::upload_transport::{TransportProvider, UploadTransport};
use crate::domain::repositories::user_prompt::UserPrompt;

use super::cli::Args;

/// Dry-run 時の転送（取得は常に失敗する）
struct NoUpload;

#[async_trait]
impl TransportProvider for NoUpload {
    async fn acquire<'a>(&'a self) -> Result<Box<dyn UploadTransport + 'a>> {
        anyhow::bail!("Uploading is disabled in dry-run mode")
    }
}

fn ensure_directory(args: &Args) -> Result<(), UsageError> {
    if !args.directory.is_dir() {
        return Err(UsageError::NotADirectory(args.directory.clone()));
    }
    Ok(())
}

/// Workout Upload Workflow
pub struct WorkoutUploadWorkflow {
    config: Config,
}

impl WorkoutUploadWorkflow {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// client secrets のパス（CLI 指定が設定より優先）
    pub fn secrets_path(&self, args: &Args) -> PathBuf {
        let path = args
            .secrets
            .as_deref()
            .unwrap_or(&self.config.client_secrets_path);
        PathBuf::from(expand_secrets_path(path))
    }

    /// CLI 引数と設定からワークフロー設定を組み立てる
    pub fn planner_options(&self, args: &Args) -> PlannerOptions {
        let mut options = PlannerOptions::new(args.directory.clone());
        options.description = self.config.description.clone();
        options.category_id = self.config.category_id;
        options.privacy_status = args.privacy.unwrap_or(self.config.privacy_status);
        options.dry_run = args.dry_run;
        options
    }

    /// Execute the upload workflow
    pub async fn execute(&self, args: Args) -> Result<PlanSummary> {
        info!("Starting workout video uploader...");
        info!("Dry run: {}", args.dry_run);

        let prompt = Arc::new(TerminalPrompt::stdio());
        let provider: Arc<dyn TransportProvider> = if args.dry_run {
            Arc::new(NoUpload)
        } else {
            let service = YouTubeService::new(&self.secrets_path(&args), prompt.clone())?;
            Arc::new(service)
        };

        let summary = self.run_planner(&args, prompt, provider).await?;
        println!("Done. Workout video uploader exiting.");
        Ok(summary)
    }

    /// 依存性を注入してワークフローを実行する
    pub async fn run_planner<P: UserPrompt + 'static>(
        &self,
        args: &Args,
        prompt: Arc<P>,
        provider: Arc<dyn TransportProvider>,
    ) -> Result<PlanSummary> {
        ensure_directory(args)?;

        let video_source = Arc::new(FsVideoSource::new(self.config.video_extensions.clone()));
        let uploader =
            Uploader::new(Arc::new(JitteredBackoff)).with_max_retries(self.config.max_retries);

        let planner = UploadPlanner::new(
            video_source,
            prompt,
            provider,
            uploader,
            self.planner_options(args),
        );
        let summary = planner.run().await?;

        info!(
            "Logged {} entries, uploaded {}, deleted {}",
            summary.entries.len(),
            summary.uploaded.len(),
            summary.deleted.len()
        );
        Ok(summary)
    }
}
