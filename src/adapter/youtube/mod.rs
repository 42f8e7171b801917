//! YouTube Adapter
//!
//! YouTube Data API v3 との統合（OAuth認証、再開可能アップロード）

pub mod auth;
pub mod client;
pub mod service;

pub use service::YouTubeService;
