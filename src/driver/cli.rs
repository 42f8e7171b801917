//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;
use std::path::PathBuf;

use crate::domain::entities::video_metadata::PrivacyStatus;

/// ワークアウト動画にタグを付けてYouTubeにアップロードするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "workout-uploader")]
#[command(about = "Tag workout videos and upload them to YouTube", long_about = None)]
pub struct Args {
    /// Directory containing the workout videos
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// OAuth client secrets file (default: from config, client_secrets.json)
    #[arg(short, long)]
    pub secrets: Option<String>,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Privacy status of the uploaded videos
    #[arg(long)]
    pub privacy: Option<PrivacyStatus>,

    /// Dry run mode - don't actually upload
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["workout-uploader"]);
        assert_eq!(args.directory, PathBuf::from("."));
        assert!(args.secrets.is_none());
        assert!(args.config.is_none());
        assert!(args.privacy.is_none());
        assert!(!args.dry_run);
    }

    #[test]
    fn test_args_directory() {
        let args = Args::parse_from(["workout-uploader", "/videos/monday"]);
        assert_eq!(args.directory, PathBuf::from("/videos/monday"));
    }

    #[test]
    fn test_args_secrets_short() {
        let args = Args::parse_from(["workout-uploader", "-s", "~/secrets.json"]);
        assert_eq!(args.secrets.as_deref(), Some("~/secrets.json"));
    }

    #[test]
    fn test_args_privacy() {
        let args = Args::parse_from(["workout-uploader", "--privacy", "private"]);
        assert_eq!(args.privacy, Some(PrivacyStatus::Private));

        assert!(Args::try_parse_from(["workout-uploader", "--privacy", "friends"]).is_err());
    }

    #[test]
    fn test_args_combined() {
        let args = Args::parse_from([
            "workout-uploader",
            "--dry-run",
            "-c",
            "/custom/config.json",
            "videos",
        ]);
        assert!(args.dry_run);
        assert_eq!(args.config.as_deref(), Some("/custom/config.json"));
        assert_eq!(args.directory, PathBuf::from("videos"));
    }
}
