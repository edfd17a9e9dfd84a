//! Engine time units.
//!
//! All durations in event definitions are measured in ticks. The server
//! runs at a fixed 20 ticks per second.

/// Ticks in one second of game time.
pub const TICKS_PER_SECOND: i64 = 20;

/// Ticks in one minute of game time.
pub const TICKS_PER_MINUTE: i64 = 1200;

/// Convert whole seconds to ticks, `None` on overflow.
pub const fn seconds(amount: i64) -> Option<i64> {
    amount.checked_mul(TICKS_PER_SECOND)
}

/// Convert whole minutes to ticks, `None` on overflow.
pub const fn minutes(amount: i64) -> Option<i64> {
    amount.checked_mul(TICKS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(seconds(10), Some(200));
        assert_eq!(minutes(1), Some(TICKS_PER_MINUTE));
        assert_eq!(seconds(i64::MAX), None);
    }
}
