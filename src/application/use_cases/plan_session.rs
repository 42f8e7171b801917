//! # Plan Session Use Case
//!
//! 日付選択 → 種目の記録 → アップロード → 後片付け の対話的ステートマシン

use anyhow::{Context, Result};
use log::{debug, info};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::log_exercise::{log_exercise, unlogged_exercises};
use super::upload_video::Uploader;
use crate::application::dto::planner_options::PlannerOptions;
use crate::domain::entities::entry::Entry;
use crate::domain::entities::remaining_videos::RemainingVideos;
use crate::domain::entities::session_state::SessionState;
use crate::domain::errors::{UploadError, UsageError};
use crate::domain::repositories::upload_transport::TransportProvider;
use crate::domain::repositories::user_prompt::{IntegerPrompt, UserPrompt};
use crate::domain::repositories::video_source::VideoSource;

/// ワークフローの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerState {
    ChoosingDay,
    LoggingExercise,
    Uploading,
    Cleanup,
    Done,
}

/// 記録中に選べる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerAction {
    AddExercise,
    ResetDay,
    Upload,
}

impl fmt::Display for PlannerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlannerAction::AddExercise => "add exercise",
            PlannerAction::ResetDay => "reset day date, session number",
            PlannerAction::Upload => "upload",
        };
        f.write_str(label)
    }
}

/// アップロード済みの動画
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedVideo {
    pub video_file: PathBuf,
    pub video_id: String,
}

/// ワークフローの結果
#[derive(Debug, Clone, Default)]
pub struct PlanSummary {
    pub entries: Vec<Entry>,
    pub uploaded: Vec<UploadedVideo>,
    pub deleted: Vec<PathBuf>,
}

/// アップロード計画のワークフロー
pub struct UploadPlanner<V: VideoSource, P: UserPrompt> {
    video_source: Arc<V>,
    prompt: Arc<P>,
    transport_provider: Arc<dyn TransportProvider>,
    uploader: Uploader,
    options: PlannerOptions,
    session: SessionState,
    uploaded: Vec<UploadedVideo>,
    deleted: Vec<PathBuf>,
}

impl<V: VideoSource, P: UserPrompt> UploadPlanner<V, P> {
    /// 新しいワークフローを作成
    ///
    /// # Arguments
    ///
    /// * `video_source` - 動画ソース
    /// * `prompt` - ユーザー入力
    /// * `transport_provider` - アップロード転送の取得先
    /// * `uploader` - 動画アップローダー
    /// * `options` - ワークフロー設定
    pub fn new(
        video_source: Arc<V>,
        prompt: Arc<P>,
        transport_provider: Arc<dyn TransportProvider>,
        uploader: Uploader,
        options: PlannerOptions,
    ) -> Self {
        Self {
            video_source,
            prompt,
            transport_provider,
            uploader,
            options,
            session: SessionState::new(),
            uploaded: Vec::new(),
            deleted: Vec::new(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// `Done` になるまで状態遷移を繰り返す
    pub async fn run(mut self) -> Result<PlanSummary> {
        let mut state = PlannerState::ChoosingDay;
        while state != PlannerState::Done {
            debug!("Planner state: {:?}", state);
            state = self.step(state).await?;
        }

        Ok(PlanSummary {
            entries: self.session.into_entries(),
            uploaded: self.uploaded,
            deleted: self.deleted,
        })
    }

    /// 1つの状態を処理し、次の状態を返す
    pub async fn step(&mut self, state: PlannerState) -> Result<PlannerState> {
        match state {
            PlannerState::ChoosingDay => self.choose_day().await,
            PlannerState::LoggingExercise => self.log_exercises().await,
            PlannerState::Uploading => self.upload_entries().await,
            PlannerState::Cleanup => self.cleanup().await,
            PlannerState::Done => Ok(PlannerState::Done),
        }
    }

    /// 全動画の日付（重複なし、昇順）
    pub async fn available_dates(&self) -> Result<Vec<String>> {
        let videos = self
            .video_source
            .list_videos(&self.options.directory)
            .await?;

        let mut dates = Vec::new();
        for video in &videos {
            let date = self.video_source.date_of(video).await?;
            if !dates.contains(&date) {
                dates.push(date);
            }
        }
        dates.sort();
        Ok(dates)
    }

    /// 選択中の日付でまだ割り当てられていない動画
    pub async fn remaining_videos(&self) -> Result<RemainingVideos> {
        let Some(day) = self.session.day() else {
            return Ok(RemainingVideos::default());
        };

        let mut day_videos = Vec::new();
        for video in self
            .video_source
            .list_videos(&self.options.directory)
            .await?
        {
            if self.video_source.date_of(&video).await? == day.date {
                day_videos.push(video);
            }
        }
        let day_videos = self.video_source.sort_by_mod_time(day_videos).await?;

        Ok(RemainingVideos::new(
            day_videos,
            &self.session.videos_claimed(),
        ))
    }

    /// 記録中に選べる操作
    pub fn available_actions(&self, remaining: &RemainingVideos) -> Vec<PlannerAction> {
        let mut actions = Vec::new();
        if !remaining.is_empty() && !unlogged_exercises(&self.session).is_empty() {
            actions.push(PlannerAction::AddExercise);
        }
        actions.push(PlannerAction::ResetDay);
        actions.push(PlannerAction::Upload);
        actions
    }

    async fn choose_day(&mut self) -> Result<PlannerState> {
        let dates = self.available_dates().await?;
        if dates.is_empty() {
            return Err(UsageError::NoVideos(self.options.directory.clone()).into());
        }

        println!("Please choose a date to operate upon:");
        let choice = self.prompt.select_from_menu(&dates, None)?;
        let date = dates
            .get(choice)
            .cloned()
            .with_context(|| format!("Menu choice {} out of range", choice))?;

        println!("And which session number is this?");
        let num = self
            .prompt
            .read_integer(IntegerPrompt::new().min(0).max(i64::from(u32::MAX)))?;
        let num = u32::try_from(num).context("Session number out of range")?;

        info!("Chose day {} ({})", num, date);
        self.session.set_day(num, date);
        Ok(PlannerState::LoggingExercise)
    }

    async fn log_exercises(&mut self) -> Result<PlannerState> {
        println!("\nOperating on {}", self.options.directory.display());

        let exercises = self.session.exercises_logged();
        if !exercises.is_empty() {
            let names: Vec<&str> = exercises.iter().map(|e| e.name()).collect();
            println!("Exercises added: {}", names.join(", "));
        }

        let mut remaining = self.remaining_videos().await?;
        println!("Videos remaining: {}", remaining.len());

        println!("What would you like to do?");
        let actions = self.available_actions(&remaining);
        let labels: Vec<String> = actions.iter().map(ToString::to_string).collect();
        let choice = self.prompt.select_from_menu(&labels, None)?;
        let action = *actions
            .get(choice)
            .with_context(|| format!("Menu choice {} out of range", choice))?;

        match action {
            PlannerAction::AddExercise => {
                log_exercise(self.prompt.as_ref(), &mut self.session, &mut remaining)?;
                Ok(PlannerState::LoggingExercise)
            }
            PlannerAction::ResetDay => {
                self.session.clear_day();
                Ok(PlannerState::ChoosingDay)
            }
            PlannerAction::Upload => Ok(PlannerState::Uploading),
        }
    }

    async fn upload_entries(&mut self) -> Result<PlannerState> {
        let entries = self.session.entries();
        if entries.is_empty() {
            println!("Nothing to upload.");
            return Ok(PlannerState::Done);
        }

        if self.options.dry_run {
            println!("Dry-run mode (not actually uploading)");
            println!("  Would upload {} videos:", entries.len());
            for entry in entries {
                println!(
                    "    - {} | {} | tags: {}",
                    entry.video_file().display(),
                    entry.label(),
                    entry.tags().join(", ")
                );
            }
            return Ok(PlannerState::Done);
        }

        println!("Uploading...");
        // リースは drop でスコープを解放する（失敗時の早期 return でも）
        let transport = self
            .transport_provider
            .acquire()
            .await
            .context("Failed to open upload session")?;

        for (i, entry) in entries.iter().enumerate() {
            if !entry.file_exists() {
                return Err(UploadError::MissingFile(entry.video_file().to_path_buf()).into());
            }

            println!("[{}/{}] {}", i + 1, entries.len(), entry.label());
            let metadata = self.options.metadata_for(entry);
            let video_id = self
                .uploader
                .upload(transport.as_ref(), entry.video_file(), &metadata)
                .await?;

            self.uploaded.push(UploadedVideo {
                video_file: entry.video_file().to_path_buf(),
                video_id,
            });
        }

        info!("Uploaded {} videos", self.uploaded.len());
        Ok(PlannerState::Cleanup)
    }

    async fn cleanup(&mut self) -> Result<PlannerState> {
        if self.uploaded.is_empty() {
            return Ok(PlannerState::Done);
        }

        println!("Delete the {} uploaded video files?", self.uploaded.len());
        if !self.prompt.read_bool(None)? {
            return Ok(PlannerState::Done);
        }

        for uploaded in &self.uploaded {
            self.video_source
                .remove_video(&uploaded.video_file)
                .await
                .with_context(|| format!("Failed to delete {}", uploaded.video_file.display()))?;
            println!("Deleted {}", uploaded.video_file.display());
            self.deleted.push(uploaded.video_file.clone());
        }
        Ok(PlannerState::Done)
    }
}
