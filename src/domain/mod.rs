//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部システムに依存しない
//! - ファイルシステムや YouTube API について何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（Entry, SessionState など）
//! - **errors**: エラー分類
//! - **repositories**: 外部ケイパビリティの trait（インターフェース定義のみ）
//! - **services**: Domain Service（リトライ方針、スコープ管理）

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
