use crate::{EPOCH_2020_01_01, TimeSource, time::interface::{offset_nanos, whole_secs}};
use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

/// A wall-clock time source that reads [`SystemTime`] on every call.
///
/// Wall-clock adjustments (NTP steps, manual changes) show through directly,
/// including steps backward. Prefer [`MonotonicClock`] unless IDs must track
/// the system clock exactly.
///
/// [`MonotonicClock`]: crate::MonotonicClock
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemClock {
    epoch: Duration,
}

impl Default for SystemClock {
    /// Constructs a wall clock aligned to [`EPOCH_2020_01_01`].
    fn default() -> Self {
        Self::with_epoch(EPOCH_2020_01_01)
    }
}

impl SystemClock {
    /// Constructs a wall clock measuring from `epoch`, given as a
    /// [`Duration`] since 1970-01-01 UTC.
    #[must_use]
    pub const fn with_epoch(epoch: Duration) -> Self {
        Self { epoch }
    }

    /// The configured epoch.
    #[must_use]
    pub const fn epoch(&self) -> Duration {
        self.epoch
    }
}

impl TimeSource for SystemClock {
    fn current_secs(&self) -> i64 {
        // A clock before 1970 reads as the Unix epoch itself.
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        whole_secs(offset_nanos(now, self.epoch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unix_now() -> Duration {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap()
    }

    #[test]
    fn counts_seconds_since_epoch() {
        let clock = SystemClock::with_epoch(unix_now() - Duration::from_secs(100));
        let secs = clock.current_secs();
        assert!((100..=101).contains(&secs), "got {secs}");
    }

    #[test]
    fn future_epoch_reads_negative() {
        let clock = SystemClock::with_epoch(unix_now() + Duration::from_secs(100));
        assert!(clock.current_secs() < 0);
    }

    #[test]
    fn default_epoch_is_2020() {
        let clock = SystemClock::default();
        assert_eq!(clock.epoch(), EPOCH_2020_01_01);
        // Comfortably past six years of seconds.
        assert!(clock.current_secs() > 6 * 365 * 24 * 3600);
    }
}
