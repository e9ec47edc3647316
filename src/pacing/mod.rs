//! Step suspension primitive
//!
//! Every animated operation performs one synchronous state mutation and
//! then suspends at a single well-defined point by awaiting [`Pacer::doze`].
//! The pacer is an injected dependency: drivers share one `Arc<Pacer>`
//! across structures and adjust its interval for speed control, tests
//! substitute [`Pacer::instant`] to run animations at full speed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Awaitable delay scaled by the current animation speed.
///
/// The interval is stored atomically so a speed change made by the driver
/// takes effect at the next suspension, never retroactively.
#[derive(Debug)]
pub struct Pacer {
    interval_us: AtomicU64,
}

impl Pacer {
    /// Pacer sleeping `interval` per full tick.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_us: AtomicU64::new(interval.as_micros() as u64),
        }
    }

    /// No-op pacer for tests: dozes complete immediately but still yield
    /// once, preserving the cooperative suspension point.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Current full-tick interval.
    pub fn interval(&self) -> Duration {
        Duration::from_micros(self.interval_us.load(Ordering::Relaxed))
    }

    /// Change the full-tick interval; lands on the next suspension.
    pub fn set_interval(&self, interval: Duration) {
        self.interval_us
            .store(interval.as_micros() as u64, Ordering::Relaxed);
    }

    /// Suspend for one animation step.
    ///
    /// `scale` shortens the step relative to a full tick and must lie in
    /// (0, 1]; comparisons use 0.5, everything else 1.0.
    pub async fn doze(&self, scale: f64) {
        debug_assert!(scale > 0.0 && scale <= 1.0, "doze scale out of (0, 1]");

        let interval = self.interval_us.load(Ordering::Relaxed);
        if interval == 0 {
            tokio::task::yield_now().await;
            return;
        }

        let scaled = (interval as f64 * scale).max(1.0) as u64;
        tokio::time::sleep(Duration::from_micros(scaled)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_instant_pacer_completes() {
        let pacer = Pacer::instant();
        pacer.doze(1.0).await;
        pacer.doze(0.5).await;
    }

    #[tokio::test]
    async fn test_interval_change_is_visible() {
        let pacer = Pacer::new(Duration::from_millis(100));
        pacer.set_interval(Duration::ZERO);
        assert_eq!(pacer.interval(), Duration::ZERO);
        // With a zero interval the doze must return without sleeping.
        pacer.doze(1.0).await;
    }
}
