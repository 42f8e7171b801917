//! Jittered Backoff
//!
//! リトライ前にランダムな時間だけ待機する

use async_trait::async_trait;
use log::debug;
use rand::Rng;
use std::time::Duration;

use crate::application::use_cases::upload_video::Backoff;

/// `[0, max)` の一様乱数で待機するバックオフ
#[derive(Debug, Default, Clone, Copy)]
pub struct JitteredBackoff;

impl JitteredBackoff {
    /// 待機時間を決める
    pub fn pick(max: Duration) -> Duration {
        let max = max.as_secs_f64();
        if max <= 0.0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(rand::rng().random_range(0.0..max))
    }
}

#[async_trait]
impl Backoff for JitteredBackoff {
    async fn sleep_up_to(&self, max: Duration) {
        let delay = Self::pick(max);
        debug!("Sleeping {:.3}s before retrying", delay.as_secs_f64());
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_within_bounds() {
        for retry in 1..=10u32 {
            let max = Duration::from_secs(1 << retry);
            for _ in 0..100 {
                assert!(JitteredBackoff::pick(max) < max);
            }
        }
    }

    #[test]
    fn test_pick_zero() {
        assert_eq!(JitteredBackoff::pick(Duration::ZERO), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_sleep_up_to_completes() {
        let start = tokio::time::Instant::now();
        JitteredBackoff.sleep_up_to(Duration::from_millis(50)).await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
