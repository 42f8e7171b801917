//! Workout Uploader
//!
//! ワークアウト動画を YouTube にアップロード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use clap::Parser;
use std::process::ExitCode;

use workout_uploader::adapter::config::Config;
use workout_uploader::driver::{Args, WorkoutUploadWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
async fn run(args: Args) -> anyhow::Result<()> {
    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Create workflow with injected dependencies
    let workflow = WorkoutUploadWorkflow::new(config);
    workflow.execute(args).await?;
    Ok(())
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
