use crate::{EPOCH_2020_01_01, TimeSource, time::interface::{offset_nanos, whole_secs}};
use core::time::Duration;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// A monotonic time source that returns elapsed time since construction,
/// offset from a user-defined epoch.
///
/// The wall clock is read once, at construction, to align the origin to the
/// epoch. After that, time advances with [`Instant`], so it never runs
/// backward even if the system clock is adjusted externally.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    epoch_offset: i128, // nanoseconds from the epoch to `start`
}

impl Default for MonotonicClock {
    /// Constructs a monotonic clock aligned to [`EPOCH_2020_01_01`].
    fn default() -> Self {
        Self::with_epoch(EPOCH_2020_01_01)
    }
}

impl MonotonicClock {
    /// Constructs a monotonic clock using `epoch` as the origin (t = 0),
    /// given as a [`Duration`] since 1970-01-01 UTC.
    ///
    /// An epoch in the future is accepted and reads as negative seconds until
    /// it passes.
    #[must_use]
    pub fn with_epoch(epoch: Duration) -> Self {
        let start = Instant::now();
        let system_now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        Self {
            start,
            epoch_offset: offset_nanos(system_now, epoch),
        }
    }
}

impl TimeSource for MonotonicClock {
    fn current_secs(&self) -> i64 {
        whole_secs(self.epoch_offset + self.start.elapsed().as_nanos() as i128)
    }
}
