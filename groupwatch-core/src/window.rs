//! Trailing poll window for availability checks.

use chrono::{DateTime, Duration, Utc};

/// The interval `[to - width, to]`, inclusive on both bounds.
///
/// The poller rebuilds this each tick with a width equal to the poll
/// interval, so an item's end instant lands in the window of exactly the
/// tick that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct PollWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl PollWindow {
    /// Window of `width` ending at `now`.
    pub fn ending_at(now: DateTime<Utc>, width: Duration) -> Self {
        PollWindow {
            from: now - width,
            to: now,
        }
    }

    /// Whether `instant` lies inside the window, bounds included.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.from && instant <= self.to
    }

    /// Lower bound as RFC 3339, for the wire.
    pub fn from_rfc3339(&self) -> String {
        self.from.to_rfc3339()
    }

    /// Upper bound as RFC 3339, for the wire.
    pub fn to_rfc3339(&self) -> String {
        self.to.to_rfc3339()
    }
}
