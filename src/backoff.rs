//! Retry wait computation and the async sleep seam used by the dispatcher.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Wait before the first retry.
pub const BASE_DELAY: Duration = Duration::from_millis(100);
/// Upper bound on computed (non server-hinted) waits.
pub const MAX_DELAY: Duration = Duration::from_secs(10);

/// Where a backoff wait came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackoffSource {
    /// Taken verbatim from a `Retry-After` response header.
    ServerHint,
    /// Exponential schedule.
    Computed,
}

impl BackoffSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ServerHint => "server-hint",
            Self::Computed => "computed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackoffDecision {
    pub wait: Duration,
    pub source: BackoffSource,
}

/// Computes the wait before retry `attempt` (0-based).
///
/// A positive `retry_after` hint (seconds) wins; otherwise the wait is
/// `min(2^attempt * 100ms, 10s)` with no jitter.
pub fn compute_wait(attempt: u32, retry_after: Option<u64>) -> BackoffDecision {
    if let Some(secs) = retry_after.filter(|secs| *secs > 0) {
        return BackoffDecision {
            wait: Duration::from_secs(secs),
            source: BackoffSource::ServerHint,
        };
    }

    let exp = attempt.min(16);
    let multiplier = 1u32 << exp;
    let wait = BASE_DELAY.saturating_mul(multiplier).min(MAX_DELAY);
    BackoffDecision {
        wait,
        source: BackoffSource::Computed,
    }
}

/// Parses a `Retry-After` header value as whole seconds.
///
/// HTTP-date and fractional forms are ignored.
pub fn parse_retry_after(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Suspends the current task between retry attempts.
///
/// The dispatcher only ever waits through this trait, which lets tests record
/// waits instead of spending wall-clock time.
pub trait Sleeper: Send + Sync + fmt::Debug {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Production sleeper backed by `tokio::time::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(tokio::time::sleep(duration))
    }
}
