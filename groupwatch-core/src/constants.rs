//! Shared constants.

/// Default poll cadence in seconds. The classifier window width always
/// equals the poll interval, so nothing is skipped or double-counted.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

/// Display name for a group without one.
pub const UNNAMED_GROUP: &str = "Unnamed Group";

/// Display name for a user without a nickname.
pub const UNNAMED_MEMBER: &str = "A member";
