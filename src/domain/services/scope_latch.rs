//! # Scope Latch
//!
//! 転送スコープの多重取得を防ぐラッチ

use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::errors::UsageError;

/// 同時に1つだけ有効なスコープを保証する
#[derive(Debug, Default)]
pub struct ScopeLatch {
    active: AtomicBool,
}

impl ScopeLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// スコープに入る
    ///
    /// # Errors
    ///
    /// 既にスコープが有効な場合は `UsageError::ScopeAlreadyActive`
    pub fn enter(&self) -> Result<ScopeToken<'_>, UsageError> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| UsageError::ScopeAlreadyActive)?;
        Ok(ScopeToken { latch: self })
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// 有効なスコープ。drop でラッチを解放する
#[derive(Debug)]
pub struct ScopeToken<'a> {
    latch: &'a ScopeLatch,
}

impl Drop for ScopeToken<'_> {
    fn drop(&mut self) {
        self.latch.active.store(false, Ordering::Release);
    }
}
