// ============================================
// TIMING UTILITY - Stage Measurement
// ============================================
// Usage:
//   1. Scoped: let _t = Timer::start("cycle");  (logs on drop)
//   2. Async wrapper: timed_async("page refresh", || fut).await;
//   3. Manual: let t = Timer::silent("x"); ... t.elapsed_ms();
// ============================================

use std::time::{Duration, Instant};
use tracing::info;

/// Timer that logs its elapsed time through `tracing`
pub struct Timer {
    name: String,
    start: Instant,
    silent: bool,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            silent: false,
        }
    }

    /// Timer that never logs; read it with `elapsed()`
    pub fn silent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            silent: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Stop the timer, log once and return the duration
    pub fn stop(mut self) -> Duration {
        let duration = self.start.elapsed();
        self.log_duration(duration);
        self.silent = true;
        duration
    }

    fn log_duration(&self, duration: Duration) {
        if self.silent {
            return;
        }
        let ms = duration.as_millis();
        info!(
            stage = %self.name,
            elapsed_ms = ms as u64,
            "{} {}",
            Self::speed_marker(ms),
            self.name
        );
    }

    /// Marker based on time taken
    fn speed_marker(ms: u128) -> &'static str {
        match ms {
            0..=100 => "⚡",
            101..=500 => "✅",
            501..=1000 => "⏱️",
            1001..=5000 => "🐌",
            _ => "🔥",
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.silent {
            self.log_duration(self.start.elapsed());
        }
    }
}

/// Time an async stage
pub async fn timed_async<F, Fut, R>(name: impl Into<String>, f: F) -> R
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = R>,
{
    let timer = Timer::start(name);
    let result = f().await;
    timer.stop();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_marker_buckets() {
        assert_eq!(Timer::speed_marker(5), "⚡");
        assert_eq!(Timer::speed_marker(300), "✅");
        assert_eq!(Timer::speed_marker(900), "⏱️");
        assert_eq!(Timer::speed_marker(4000), "🐌");
        assert_eq!(Timer::speed_marker(9000), "🔥");
    }

    #[test]
    fn test_silent_timer_tracks_elapsed() {
        let timer = Timer::silent("noop");
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.elapsed() >= Duration::from_millis(5));
        assert_eq!(timer.name(), "noop");
    }

    #[tokio::test]
    async fn test_timed_async_returns_value() {
        let value = timed_async("answer", || async { 42 }).await;
        assert_eq!(value, 42);
    }
}
