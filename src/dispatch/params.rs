use std::time::Duration;

use bytes::Bytes;

/// Smallest period the interval timer is built with
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Parameters of one dispatch loop, fixed for its lifetime.
///
/// A new command always builds a new loop with new params; a running loop is
/// never reconfigured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchParams {
    /// Spacing between send initiations
    pub interval: Duration,
    /// Payload posted on every attempt
    pub body: Bytes,
    /// Suppress failure reporting (attempts still run)
    pub silent: bool,
}

impl DispatchParams {
    pub fn new(interval: Duration, body: impl Into<Bytes>, silent: bool) -> Self {
        Self {
            interval,
            body: body.into(),
            silent,
        }
    }

    /// Interval used for the timer; zero is raised to [`MIN_INTERVAL`].
    pub fn timer_period(&self) -> Duration {
        self.interval.max(MIN_INTERVAL)
    }
}
