//! Wall clock and sleep capability.
//!
//! Cache timestamps and retry backoff both go through `Clock` so the acquisition
//! loop and the display cycle run deterministically under test.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait Clock: Send + Sync {
    /// Current time in whole seconds since the Unix epoch.
    fn now(&self) -> i64;

    async fn sleep(&self, duration: Duration);
}

/// Real time: `chrono` for the wall clock, `tokio` for sleeping.
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
