use core::time::Duration;

/// Recommended epoch: Wednesday, January 1, 2020 00:00:00 UTC.
///
/// With the default 29-bit timestamp this covers IDs minted until mid-2037.
pub const EPOCH_2020_01_01: Duration = Duration::from_secs(1_577_836_800);

/// A trait for time sources that return whole seconds since an epoch.
///
/// This abstraction allows you to plug in a wall clock, a monotonic clock, or
/// a mocked time source in tests.
///
/// The value is signed: a source whose epoch lies in the future reports
/// negative seconds. Generators do not validate this; an epoch in the past is
/// a caller precondition.
///
/// # Example
///
/// ```
/// use varflake::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_secs(&self) -> i64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedTime.current_secs(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the number of whole seconds elapsed since the epoch.
    fn current_secs(&self) -> i64;
}

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Truncates a signed nanosecond offset to whole seconds, toward zero.
pub(crate) fn whole_secs(nanos: i128) -> i64 {
    (nanos / NANOS_PER_SEC) as i64
}

/// Signed nanoseconds from `epoch` to `now`, both measured from 1970-01-01.
pub(crate) fn offset_nanos(now: Duration, epoch: Duration) -> i128 {
    now.as_nanos() as i128 - epoch.as_nanos() as i128
}
