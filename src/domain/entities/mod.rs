//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **Entry**: 1本の動画に対応するセット記録
//! - **SessionState**: 選択中の日付と記録済みエントリ
//! - **RemainingVideos**: 未割り当て動画のキュー
//! - **VideoMetadata**: アップロード時の動画メタデータ

pub mod entry;
pub mod remaining_videos;
pub mod session_state;
pub mod video_metadata;
