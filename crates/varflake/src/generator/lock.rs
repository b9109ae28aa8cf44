use core::{cmp::Ordering, marker::PhantomData, time::Duration};
use parking_lot::Mutex;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, IdGenStatus, RandSource, Result, SystemClock, ThreadRandom, TimeSource, VarId,
    VarSnowflakeId,
};

/// The default generator: [`VarSnowflakeId`] layout, wall clock, thread-local
/// RNG.
pub type VarSnowflakeGenerator = LockVarGenerator<VarSnowflakeId, SystemClock, ThreadRandom>;

/// Mutable per-node counters, touched only under the generator's lock.
#[derive(Debug)]
struct State {
    last_second: i64,
    sequence: u64,
}

impl State {
    const fn new(last_second: i64, sequence: u64) -> Self {
        Self {
            last_second,
            sequence,
        }
    }
}

/// A lock-based ID generator for one node, safe to share across threads.
///
/// All callers of one instance are serialized by a single mutex covering the
/// whole generation step: clock read, sequence update, and packing. When a
/// second's sequence space is spent, [`Self::next_id`] spins *while holding
/// the lock* until the clock moves to the next second, so every other caller
/// of the same instance stalls too. Throughput is therefore capped at
/// `max_sequence + 1` IDs per second per node.
///
/// Instances with different node IDs share nothing. Global uniqueness relies
/// on node IDs being assigned without duplicates.
///
/// ## Features
/// - ✅ Thread-safe (`Send + Sync`, share with [`Arc`])
/// - ✅ Infallible generation (non-poisoning `parking_lot` mutex)
/// - ✅ Pluggable [`TimeSource`] and [`RandSource`]
///
/// [`Arc`]: std::sync::Arc
pub struct LockVarGenerator<ID, T = SystemClock, R = ThreadRandom>
where
    ID: VarId,
    T: TimeSource,
    R: RandSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<State>,
    node_id: u64,
    time: T,
    rng: R,
    _id: PhantomData<ID>,
}

impl<ID> LockVarGenerator<ID, SystemClock, ThreadRandom>
where
    ID: VarId,
{
    /// Creates a generator for `node_id`, timing IDs from `epoch` with the
    /// wall clock.
    ///
    /// `epoch` is a [`Duration`] since 1970-01-01 UTC and must lie in the
    /// past for every future call; this is not validated here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] if `node_id` is negative or exceeds the
    /// layout's maximum node ID.
    ///
    /// # Example
    /// ```
    /// use varflake::{Base64Ext, EPOCH_2020_01_01, VarId, VarSnowflakeGenerator};
    ///
    /// let generator = VarSnowflakeGenerator::new(EPOCH_2020_01_01, 1).unwrap();
    /// let id = generator.next_id();
    ///
    /// assert_eq!(id.deobfuscate().node_id(), 1);
    /// assert!(id.encode().len() <= 9);
    /// ```
    pub fn new(epoch: Duration, node_id: i64) -> Result<Self> {
        Self::with_sources(node_id, SystemClock::with_epoch(epoch), ThreadRandom)
    }
}

impl<ID, T, R> LockVarGenerator<ID, T, R>
where
    ID: VarId,
    T: TimeSource,
    R: RandSource,
{
    /// Creates a generator for `node_id` with explicit time and random
    /// sources.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] if `node_id` is negative or exceeds the
    /// layout's maximum node ID.
    pub fn with_sources(node_id: i64, time: T, rng: R) -> Result<Self> {
        let max = ID::max_node_id();
        let node = u64::try_from(node_id)
            .ok()
            .filter(|&n| n <= max)
            .ok_or(Error::InvalidNode { node_id, max })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(node_id = node, "created id generator");

        // No ID issued yet: the first reading of any real clock compares
        // greater and starts at sequence zero.
        Ok(Self::from_components(i64::MIN, node, 0, time, rng))
    }

    /// Creates a generator from explicit state.
    ///
    /// This constructor is primarily useful for restoring state or driving the
    /// generator into a specific position in tests. `node_id` is masked to the
    /// layout rather than validated.
    ///
    /// # ⚠️ Note
    /// In typical use cases, you should prefer [`Self::new`] or
    /// [`Self::with_sources`].
    pub fn from_components(last_second: i64, node_id: u64, sequence: u64, time: T, rng: R) -> Self {
        let state = Mutex::new(State::new(last_second, sequence & ID::max_sequence()));
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(state),
            #[cfg(not(feature = "cache-padded"))]
            state,
            node_id: node_id & ID::max_node_id(),
            time,
            rng,
            _id: PhantomData,
        }
    }

    /// The node ID stamped into every generated ID.
    pub fn node_id(&self) -> u64 {
        self.node_id
    }

    /// Generates the next ID, blocking if necessary.
    ///
    /// Never fails. If the current second's sequence space is spent, this
    /// spins (yielding the thread between clock reads) until the clock reaches
    /// the next second, then issues sequence zero in that second. The lock is
    /// held for the whole wait.
    ///
    /// If the clock reads earlier than the last issued second, the sequence
    /// restarts at zero in the earlier second. Duplicate IDs are possible in
    /// that case; a clock that never runs backward is a caller precondition.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), fields(node_id = self.node_id)))]
    pub fn next_id(&self) -> ID {
        let mut state = self.state.lock();
        let mut now = self.time.current_secs();

        let sequence = match Self::next_sequence(&state, now) {
            Some(sequence) => sequence,
            None => {
                now = self.cold_wait_past(state.last_second);
                0
            }
        };

        state.last_second = now;
        state.sequence = sequence;
        self.pack(now, sequence)
    }

    /// Attempts to generate the next ID without blocking.
    ///
    /// Returns [`IdGenStatus::Pending`] instead of spinning when the current
    /// second's sequence space is spent, leaving the state untouched so the
    /// caller can back off and retry.
    ///
    /// # Example
    /// ```
    /// use varflake::{EPOCH_2020_01_01, IdGenStatus, VarSnowflakeGenerator};
    ///
    /// let generator = VarSnowflakeGenerator::new(EPOCH_2020_01_01, 0).unwrap();
    /// let id = loop {
    ///     match generator.poll_id() {
    ///         IdGenStatus::Ready { id } => break id,
    ///         IdGenStatus::Pending { .. } => std::thread::yield_now(),
    ///     }
    /// };
    /// # let _ = id;
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), fields(node_id = self.node_id)))]
    pub fn poll_id(&self) -> IdGenStatus<ID> {
        let mut state = self.state.lock();
        let now = self.time.current_secs();

        match Self::next_sequence(&state, now) {
            Some(sequence) => {
                state.last_second = now;
                state.sequence = sequence;
                IdGenStatus::Ready {
                    id: self.pack(now, sequence),
                }
            }
            None => IdGenStatus::Pending {
                yield_until: state.last_second + 1,
            },
        }
    }

    /// Returns the sequence to issue at `now`, or `None` if the sequence for
    /// the current second has wrapped.
    fn next_sequence(state: &State, now: i64) -> Option<u64> {
        match now.cmp(&state.last_second) {
            Ordering::Equal => {
                let next = (state.sequence + 1) & ID::max_sequence();
                (next != 0).then_some(next)
            }
            Ordering::Greater => Some(0),
            Ordering::Less => {
                Self::cold_clock_behind(now, state.last_second);
                Some(0)
            }
        }
    }

    /// Packs the fields and applies the layout's obfuscation.
    fn pack(&self, now: i64, sequence: u64) -> ID {
        let random = self.rng.rand() & ID::max_random();
        // A negative offset (epoch in the future) wraps inside the mask.
        let timestamp = now as u64 & ID::max_timestamp();
        ID::from_components(random, timestamp, self.node_id, sequence).obfuscate()
    }

    #[cold]
    #[inline(never)]
    fn cold_wait_past(&self, last_second: i64) -> i64 {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            node_id = self.node_id,
            second = last_second,
            "sequence exhausted, waiting for the next second"
        );
        loop {
            let now = self.time.current_secs();
            if now > last_second {
                return now;
            }
            std::thread::yield_now();
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: i64, last_second: i64) {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            now,
            last_second,
            "clock moved backward, restarting sequence in an earlier second"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (now, last_second);
    }
}
