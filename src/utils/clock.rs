use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use tokio::time::Instant;

use super::time::truncate_to_minute;

/// Represents an entity responsible for providing dates across application. This allows commands
/// and the focus timer to be tested without depending on the wall clock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Clock: Sync + Send + 'static {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    fn instant(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}

pub struct DefaultClock;

#[async_trait]
impl Clock for DefaultClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Time stamped onto new log entries.
pub fn entry_timestamp(clock: &dyn Clock) -> NaiveDateTime {
    truncate_to_minute(clock.now())
}
