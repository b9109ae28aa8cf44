/// A trait for random sources that fill an ID's random field.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests. Generators mask the returned value down to the
/// layout's random width, so implementors may return a full `u64`.
///
/// # Example
/// ```
/// use varflake::RandSource;
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn rand(&self) -> u64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedRand.rand(), 1234);
/// ```
pub trait RandSource {
    /// Returns a uniformly distributed random integer.
    fn rand(&self) -> u64;
}
