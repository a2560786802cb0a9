use std::time::Duration;

/// Pause inserted between consecutive downloads.
pub trait Throttle {
    fn pause(&self) -> impl Future<Output = ()> + Send;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }
}

impl Throttle for FixedDelay {
    async fn pause(&self) {
        if self.0.is_zero() {
            return;
        }
        tracing::trace!(delay_ms = self.0.as_millis() as u64, "Throttling");
        tokio::time::sleep(self.0).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps_for_configured_duration() {
        let start = tokio::time::Instant::now();
        FixedDelay::from_millis(1000).pause().await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_returns_immediately() {
        let start = tokio::time::Instant::now();
        FixedDelay::from_millis(0).pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
