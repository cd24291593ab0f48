//! Per-call timeout signal.
//!
//! [`TimeoutController::arm`] starts a timer that cancels a
//! [`CancellationToken`] once the duration has elapsed. Dropping the
//! returned [`TimeoutHandle`] disposes of the timer, so a handle that
//! outlives its call never fires.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Default duration for JSON and form requests alike.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

#[derive(Debug, Clone, Copy)]
pub struct TimeoutController {
    duration: Duration,
}

impl Default for TimeoutController {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl TimeoutController {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Start a timer for one call. Must be called inside a Tokio runtime.
    pub fn arm(&self) -> TimeoutHandle {
        let token = CancellationToken::new();
        let signal = token.clone();
        let duration = self.duration;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            signal.cancel();
        });
        TimeoutHandle { token, timer }
    }
}

/// Owns the timer of one call. Dropping it disposes of the timer.
pub struct TimeoutHandle {
    token: CancellationToken,
    timer: JoinHandle<()>,
}

impl TimeoutHandle {
    /// Signal that is cancelled when the timeout fires.
    pub fn signal(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn has_fired(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for TimeoutHandle {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_duration() {
        let start = Instant::now();
        let handle = TimeoutController::new(Duration::from_millis(500)).arm();
        let signal = handle.signal();

        signal.cancelled().await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed < Duration::from_millis(510));
        assert!(handle.has_fired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_does_not_fire_early() {
        let handle = TimeoutController::new(Duration::from_millis(500)).arm();

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(!handle.has_fired());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(handle.has_fired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_prevents_firing() {
        let handle = TimeoutController::new(Duration::from_millis(100)).arm();
        let signal = handle.signal();
        drop(handle);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!signal.is_cancelled());
    }

    #[test]
    fn test_default_is_thirty_seconds() {
        assert_eq!(
            TimeoutController::default().duration(),
            Duration::from_millis(30_000)
        );
    }
}
