//! Upload Retry Policy
//!
//! リトライ上限とバックオフ幅の計算

use std::time::Duration;

pub const MAX_RETRIES: u32 = 10;
pub const RETRIABLE_STATUS_CODES: [u16; 4] = [500, 502, 503, 504];

/// Check if an HTTP status indicates a transient server failure
pub fn is_retriable_status(status: u16) -> bool {
    RETRIABLE_STATUS_CODES.contains(&status)
}

/// Upper bound of the randomized sleep before retry number `retry` (2^retry seconds)
pub fn max_backoff(retry: u32) -> Duration {
    Duration::from_secs(1u64 << retry.min(32))
}
