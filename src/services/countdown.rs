//! Once-per-period ticker driving the delete countdown.
//!
//! The ticker owns a [`tokio::time::Interval`] rather than a spawned task:
//! dropping it is all it takes to guarantee no further ticks. The interval
//! is only registered with the timer on the first `tick()`, so a ticker can
//! be started outside a runtime. Tests pause tokio's clock to advance
//! simulated time.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct CountdownTicker {
    period: Duration,
    first_tick: Instant,
    interval: Option<Interval>,
}

impl CountdownTicker {
    /// Start ticking; the first tick fires one full `period` from now.
    pub fn start(period: Duration) -> Self {
        Self {
            period,
            first_tick: Instant::now() + period,
            interval: None,
        }
    }

    pub async fn tick(&mut self) {
        let (first_tick, period) = (self.first_tick, self.period);
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;
    }
}
