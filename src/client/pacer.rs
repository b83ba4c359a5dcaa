// file: src/client/pacer.rs
// description: injectable sleeping and a shared minimum-interval request pacer
// reference: https://docs.rs/tokio/latest/tokio/time

use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Spaces out requests issued through one client, however many are in
/// flight. A zero interval never waits.
pub struct RequestPacer {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Waits until the interval since the previous request has elapsed.
    /// The lock is held across the wait so callers go out one at a time.
    pub async fn acquire<S: Sleeper>(&self, sleeper: &S) {
        if self.min_interval.is_zero() {
            return;
        }

        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                sleeper.sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::RecordingSleeper;

    #[test]
    fn test_unlimited_pacer_never_sleeps() {
        let pacer = RequestPacer::unlimited();
        let sleeper = RecordingSleeper::new();

        tokio_test::block_on(async {
            pacer.acquire(&sleeper).await;
            pacer.acquire(&sleeper).await;
            pacer.acquire(&sleeper).await;
        });

        assert!(sleeper.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_pacer_waits_between_requests() {
        let pacer = RequestPacer::new(Duration::from_secs(60));
        let sleeper = RecordingSleeper::new();

        pacer.acquire(&sleeper).await;
        assert!(sleeper.sleeps().is_empty());

        pacer.acquire(&sleeper).await;
        let sleeps = sleeper.sleeps();
        assert_eq!(sleeps.len(), 1);
        assert!(sleeps[0] > Duration::from_secs(59));
        assert!(sleeps[0] <= Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_tokio_sleeper_completes() {
        TokioSleeper.sleep(Duration::from_millis(1)).await;
    }
}
