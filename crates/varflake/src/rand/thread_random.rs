use crate::RandSource;
use ::rand::{Rng, rng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// Each OS thread has its own RNG instance, so calls from multiple threads are
/// contention-free. This type does **not** store the RNG itself; it accesses
/// the thread-local generator on each call, so it is `Send + Sync` and may be
/// shared freely.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn rand(&self) -> u64 {
        rng().random()
    }
}
