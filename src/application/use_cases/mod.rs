//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **UploadPlanner**: 日付選択からアップロード・削除までの対話フロー
//! - **log_exercise**: 種目とセットを動画に割り当てる
//! - **Uploader**: 再開可能アップロードとリトライ

pub mod log_exercise;
pub mod plan_session;
pub mod upload_video;
