//! # Domain Services
//!
//! - **retry_policy**: リトライ可能なエラーの分類とバックオフ上限
//! - **scope_latch**: 転送スコープの再入防止

pub mod retry_policy;
pub mod scope_latch;
