//! # Workout Uploader
//!
//! ワークアウト動画に種目・セット・重量のタグを付けて YouTube にアップロードするツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: エントリ、セッション状態、エラー分類、リトライ方針（外部依存なし）
//! - **Application層**: 対話的なアップロード計画とアップロードのユースケース
//! - **Adapter層**: 外部システムとの統合（YouTube, ファイルシステム, 端末）
//! - **Driver層**: CLI、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部サービス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
