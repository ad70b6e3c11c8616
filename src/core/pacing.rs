//! Pacing delays for the storefront rate limit
//!
//! The storefront enforces a small fixed call rate. The synchronizer stays
//! under it open-loop: fixed delays with a little random jitter, no feedback
//! from throttling responses.

use crate::core::traits::Pacer;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Why the synchronizer is pausing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseReason {
    /// After a successful inventory update
    AfterUpdate,
    /// After every batch, including the last
    BetweenBatches,
    /// Before retrying a record after a connection reset
    BeforeRetry,
}

/// A base delay plus up to `max_jitter` of uniform random jitter
///
/// The jitter range is half-open: `max_jitter` itself is never added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delay {
    pub base: Duration,
    pub max_jitter: Duration,
}

impl Delay {
    /// A delay without jitter
    pub const fn fixed(base: Duration) -> Self {
        Delay {
            base,
            max_jitter: Duration::ZERO,
        }
    }

    pub const fn jittered(base: Duration, max_jitter: Duration) -> Self {
        Delay { base, max_jitter }
    }

    /// Draw a concrete duration using the thread-local RNG
    pub fn sample(&self) -> Duration {
        self.sample_with(&mut rand::thread_rng())
    }

    /// Draw a concrete duration using the given RNG
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let jitter_ms = self.max_jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.base;
        }
        self.base + Duration::from_millis(rng.gen_range(0..jitter_ms))
    }
}

/// Pacer backed by `tokio::time::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, reason: PauseReason, delay: Delay) {
        let duration = delay.sample();
        if reason == PauseReason::BetweenBatches {
            debug!(delay_ms = duration.as_millis() as u64, "Waiting for the next batch");
        } else {
            debug!(?reason, delay_ms = duration.as_millis() as u64, "Pausing");
        }
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[test]
    fn test_fixed_delay_has_no_jitter() {
        let delay = Delay::fixed(Duration::from_millis(3000));
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(delay.sample_with(&mut rng), Duration::from_millis(3000));
        }
    }

    #[rstest]
    #[case::default_pacing(1000, 200)]
    #[case::one_ms_jitter(500, 1)]
    #[case::no_base(0, 50)]
    fn test_jitter_within_range(#[case] base_ms: u64, #[case] jitter_ms: u64) {
        let delay = Delay::jittered(Duration::from_millis(base_ms), Duration::from_millis(jitter_ms));
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let sampled = delay.sample_with(&mut rng);
            assert!(sampled >= Duration::from_millis(base_ms));
            assert!(sampled < Duration::from_millis(base_ms + jitter_ms));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_pacer_sleeps_for_sampled_delay() {
        let delay = Delay::jittered(Duration::from_millis(1000), Duration::from_millis(200));
        let start = tokio::time::Instant::now();

        TokioPacer.pause(PauseReason::BetweenBatches, delay).await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed < Duration::from_millis(1200));
    }
}
