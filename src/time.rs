//! Abstraction over system provided time, as part of the hexagonal architecture.

use async_trait::async_trait;

/// Interface for pausing between printed readings.
/// See [`Gateway`] for implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Port: Send + Sync {
    /// Wrapper over [`tokio::time::sleep()`].
    async fn async_sleep(&self, duration: std::time::Duration);
}

/// Implementation of [`Port`] backed by the tokio timer.
pub struct Gateway;

#[async_trait]
impl Port for Gateway {
    async fn async_sleep(&self, duration: std::time::Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::{Gateway, Port};

    fn gateway_is_send_sync<P: Port + Send + Sync>(_: P) {}

    #[test]
    fn test_gateway_is_send_sync() {
        gateway_is_send_sync(Gateway);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gateway_sleeps_for_duration() {
        let start = tokio::time::Instant::now();
        Gateway.async_sleep(Duration::from_millis(500)).await;
        assert!(start.elapsed() >= Duration::from_millis(500));
    }
}
