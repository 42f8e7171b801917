//! Workflow Integration Tests
//!
//! WorkoutUploadWorkflow の統合テスト（実ディレクトリ + 端末入力のスクリプト）

use async_trait::async_trait;
use clap::Parser;
use std::fs::{self, File};
use std::io::{sink, Cursor, Sink};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

use workout_uploader::adapter::config::Config;
use workout_uploader::adapter::terminal::prompt::TerminalPrompt;
use workout_uploader::domain::entities::video_metadata::VideoMetadata;
use workout_uploader::domain::errors::TransportError;
use workout_uploader::domain::repositories::upload_transport::{
    ChunkOutcome, TransportProvider, UploadResponse, UploadSession, UploadTransport,
};
use workout_uploader::driver::{Args, WorkoutUploadWorkflow};

/// 2024-01-01T12:00:00Z
const JAN_1_NOON: u64 = 1_704_110_400;
const DAY: u64 = 24 * 3600;

type ScriptedPrompt = TerminalPrompt<Cursor<Vec<u8>>, Sink>;

fn scripted(lines: &[&str]) -> Arc<ScriptedPrompt> {
    let mut input = lines.join("\n");
    input.push('\n');
    Arc::new(TerminalPrompt::new(Cursor::new(input.into_bytes()), sink()))
}

/// 更新日時を指定して動画ファイルを作成
fn create_video(dir: &Path, name: &str, secs: u64) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
    path
}

fn args(dir: &Path, extra: &[&str]) -> Args {
    let mut argv = vec!["workout-uploader", dir.to_str().unwrap()];
    argv.extend_from_slice(extra);
    Args::parse_from(argv)
}

struct InstantSession {
    id: String,
}

#[async_trait]
impl UploadSession for InstantSession {
    async fn next_chunk(&mut self) -> Result<ChunkOutcome, TransportError> {
        Ok(ChunkOutcome::Completed(UploadResponse {
            id: Some(self.id.clone()),
            raw: format!(r#"{{"id": "{}"}}"#, self.id),
        }))
    }
}

/// アップロードされた (ファイル, タイトル, タグ) を記録する
#[derive(Default)]
struct FakeYouTube {
    uploads: Mutex<Vec<(PathBuf, String, Vec<String>)>>,
    acquired: Mutex<u32>,
}

struct FakeLease<'a> {
    service: &'a FakeYouTube,
}

#[async_trait]
impl UploadTransport for FakeLease<'_> {
    async fn begin_resumable_upload(
        &self,
        file: &Path,
        metadata: &VideoMetadata,
    ) -> Result<Box<dyn UploadSession>, TransportError> {
        let mut uploads = self.service.uploads.lock().unwrap();
        uploads.push((
            file.to_path_buf(),
            metadata.title.clone(),
            metadata.tags.clone(),
        ));
        Ok(Box::new(InstantSession {
            id: format!("vid{}", uploads.len()),
        }))
    }
}

#[async_trait]
impl TransportProvider for FakeYouTube {
    async fn acquire<'a>(&'a self) -> anyhow::Result<Box<dyn UploadTransport + 'a>> {
        *self.acquired.lock().unwrap() += 1;
        Ok(Box::new(FakeLease { service: self }))
    }
}

#[tokio::test]
async fn test_log_two_squat_sets_dry_run() {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..5 {
        create_video(temp_dir.path(), &format!("clip{}.mp4", i), JAN_1_NOON + i * 60);
    }

    // 日付, セッション3, add exercise, squat, warmup なし, 200, 2セット,
    // 既定レップ, 各セット既定値, upload
    let prompt = scripted(&["0", "3", "0", "0", "n", "200", "2", "", "", "", "", "", "2"]);
    let fake = Arc::new(FakeYouTube::default());
    let workflow = WorkoutUploadWorkflow::new(Config::default());

    let summary = workflow
        .run_planner(&args(temp_dir.path(), &["--dry-run"]), prompt, fake.clone())
        .await
        .unwrap();

    let labels: Vec<String> = summary.entries.iter().map(|e| e.label()).collect();
    assert_eq!(
        labels,
        vec![
            "day 3 squat set 1 6x200 2024-01-01",
            "day 3 squat set 2 6x200 2024-01-01"
        ]
    );
    assert_eq!(summary.entries[0].video_file(), temp_dir.path().join("clip0.mp4"));
    assert_eq!(summary.entries[1].video_file(), temp_dir.path().join("clip1.mp4"));
    assert!(summary.uploaded.is_empty());
    assert_eq!(*fake.acquired.lock().unwrap(), 0);

    // 3本は未割り当てのまま、ファイルも消えていない
    let remaining = fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(remaining, 5);
}

#[tokio::test]
async fn test_upload_and_delete() {
    let temp_dir = TempDir::new().unwrap();
    let warmup = create_video(temp_dir.path(), "b.mp4", JAN_1_NOON);
    let set1 = create_video(temp_dir.path(), "a.mp4", JAN_1_NOON + 120);
    let notes = temp_dir.path().join("notes.txt");
    fs::write(&notes, "squat felt heavy").unwrap();

    // 日付, セッション1, add, deadlift, warmup, 300, 1セット, 3レップ,
    // 既定値, upload, 削除する
    let prompt = scripted(&["0", "1", "0", "4", "y", "300", "1", "3", "", "", "1", "y"]);
    let fake = Arc::new(FakeYouTube::default());
    let workflow = WorkoutUploadWorkflow::new(Config::default());

    let summary = workflow
        .run_planner(&args(temp_dir.path(), &[]), prompt, fake.clone())
        .await
        .unwrap();

    let uploads = fake.uploads.lock().unwrap().clone();
    assert_eq!(
        uploads,
        vec![
            (
                warmup.clone(),
                "day 1 deadlift warmup 2024-01-01".to_string(),
                vec!["Deadlift".to_string(), "Warming Up".to_string()]
            ),
            (
                set1.clone(),
                "day 1 deadlift set 1 3x300 2024-01-01".to_string(),
                vec!["Deadlift".to_string()]
            ),
        ]
    );
    assert_eq!(summary.uploaded.len(), 2);
    assert_eq!(summary.uploaded[0].video_id, "vid1");
    assert_eq!(summary.deleted, vec![warmup.clone(), set1.clone()]);
    assert!(!warmup.exists());
    assert!(!set1.exists());
    assert!(notes.exists());
    assert_eq!(*fake.acquired.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_only_chosen_date_is_used() {
    let temp_dir = TempDir::new().unwrap();
    create_video(temp_dir.path(), "monday.mp4", JAN_1_NOON);
    let tuesday = create_video(temp_dir.path(), "tuesday.mp4", JAN_1_NOON + DAY);

    // 2番目の日付（2024-01-02）, セッション2, add, bench press, warmup, upload, 残す
    let prompt = scripted(&["1", "2", "0", "1", "y", "1", "n"]);
    let fake = Arc::new(FakeYouTube::default());
    let workflow = WorkoutUploadWorkflow::new(Config::default());

    let summary = workflow
        .run_planner(&args(temp_dir.path(), &[]), prompt, fake.clone())
        .await
        .unwrap();

    assert_eq!(summary.entries.len(), 1);
    assert_eq!(
        summary.entries[0].label(),
        "day 2 bench press warmup 2024-01-02"
    );
    assert_eq!(summary.entries[0].video_file(), tuesday);
    assert!(summary.deleted.is_empty());
    assert!(tuesday.exists());
}

#[tokio::test]
async fn test_reset_day_keeps_entries() {
    let temp_dir = TempDir::new().unwrap();
    create_video(temp_dir.path(), "a.mp4", JAN_1_NOON);
    create_video(temp_dir.path(), "b.mp4", JAN_1_NOON + DAY);

    // 1日目で squat warmup を記録 → reset → 2日目（squat は記録済みなので先頭は bench press）
    // の warmup → upload（dry-run）
    let prompt = scripted(&["0", "1", "0", "0", "y", "0", "1", "2", "0", "0", "y", "1"]);
    let workflow = WorkoutUploadWorkflow::new(Config::default());

    let summary = workflow
        .run_planner(
            &args(temp_dir.path(), &["--dry-run"]),
            prompt,
            Arc::new(FakeYouTube::default()),
        )
        .await
        .unwrap();

    let labels: Vec<String> = summary.entries.iter().map(|e| e.label()).collect();
    assert_eq!(
        labels,
        vec![
            "day 1 squat warmup 2024-01-01",
            "day 2 bench press warmup 2024-01-02"
        ]
    );
}

#[tokio::test]
async fn test_empty_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let workflow = WorkoutUploadWorkflow::new(Config::default());

    let result = workflow
        .run_planner(
            &args(temp_dir.path(), &[]),
            scripted(&[]),
            Arc::new(FakeYouTube::default()),
        )
        .await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("No video files found"));
}

#[tokio::test]
async fn test_closed_input_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    create_video(temp_dir.path(), "a.mp4", JAN_1_NOON);
    let workflow = WorkoutUploadWorkflow::new(Config::default());

    let result = workflow
        .run_planner(
            &args(temp_dir.path(), &[]),
            scripted(&["0"]),
            Arc::new(FakeYouTube::default()),
        )
        .await;

    assert!(result.is_err());
}
