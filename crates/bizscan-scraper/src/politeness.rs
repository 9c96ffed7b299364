//! Randomized pause between consecutive page fetches.
//!
//! Keeps request timing irregular and well under the marketplace's informal
//! rate limits. Not a correctness concern: tests use [`DelayPolicy::disabled`].

use std::time::Duration;

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayPolicy {
    min_ms: u64,
    max_ms: u64,
}

impl DelayPolicy {
    /// Uniform delay in `[min_ms, max_ms]`. Bounds are swapped if reversed.
    #[must_use]
    pub fn uniform_ms(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    /// No pause at all.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            min_ms: 0,
            max_ms: 0,
        }
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.max_ms == 0
    }

    /// Draws one delay from the policy's range.
    #[must_use]
    pub fn sample(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }

    /// Sleeps for one sampled delay; returns immediately when disabled.
    pub async fn pause(&self) {
        if self.is_disabled() {
            return;
        }
        let delay = self.sample();
        tracing::debug!(delay_ms = delay.as_millis(), "pausing between page fetches");
        tokio::time::sleep(delay).await;
    }
}

impl Default for DelayPolicy {
    /// Two to four seconds.
    fn default() -> Self {
        Self::uniform_ms(2_000, 4_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_within_bounds() {
        let policy = DelayPolicy::uniform_ms(20, 40);
        for _ in 0..200 {
            let ms = policy.sample().as_millis();
            assert!((20..=40).contains(&ms), "sample {ms}ms out of range");
        }
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        assert_eq!(
            DelayPolicy::uniform_ms(40, 20),
            DelayPolicy::uniform_ms(20, 40)
        );
    }

    #[test]
    fn fixed_delay_when_bounds_equal() {
        assert_eq!(
            DelayPolicy::uniform_ms(15, 15).sample(),
            Duration::from_millis(15)
        );
    }

    #[test]
    fn disabled_policy_is_zero() {
        let policy = DelayPolicy::disabled();
        assert!(policy.is_disabled());
        assert_eq!(policy.sample(), Duration::ZERO);
    }

    #[test]
    fn default_is_two_to_four_seconds() {
        assert_eq!(DelayPolicy::default(), DelayPolicy::uniform_ms(2_000, 4_000));
        assert!(!DelayPolicy::default().is_disabled());
    }

    #[tokio::test]
    async fn disabled_pause_returns_immediately() {
        let started = std::time::Instant::now();
        DelayPolicy::disabled().pause().await;
        assert!(started.elapsed() < Duration::from_millis(50));
    }
}
