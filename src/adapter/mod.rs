//! Adapter Layer
//!
//! 外部システム（YouTube, ファイルシステム, 端末）との統合

pub mod backoff;
pub mod config;
pub mod repositories;
pub mod terminal;
pub mod youtube;
