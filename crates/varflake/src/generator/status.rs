use crate::VarId;

/// Represents the result of a non-blocking attempt to generate an ID.
///
/// This type models the outcome of [`LockVarGenerator::poll_id`]:
///
/// - [`IdGenStatus::Ready`] indicates a new ID was successfully generated.
/// - [`IdGenStatus::Pending`] means the current second's sequence space is
///   spent and no ID can be produced until the clock reaches `yield_until`.
///
/// [`LockVarGenerator::poll_id`]: crate::LockVarGenerator::poll_id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus<T: VarId> {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: T,
    },
    /// No ID could be generated because the sequence has been exhausted for
    /// the current second.
    Pending {
        /// The second (inclusive, relative to the epoch) at which generation
        /// may resume.
        yield_until: i64,
    },
}
