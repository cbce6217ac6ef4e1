use std::time::Duration;

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// How long the streak banner stays on screen
pub const CELEBRATION_SECS: u64 = 3;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

pub fn celebration_duration() -> Duration {
    Duration::from_secs(CELEBRATION_SECS)
}
