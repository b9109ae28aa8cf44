use crate::base64::Base64Error;

/// A result type defaulting to the crate [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `varflake` can emit.
///
/// ID generation itself is infallible: the generator uses a non-poisoning
/// mutex and stalls rather than failing when a second's sequence space is
/// spent. Errors only surface when constructing a generator or when parsing
/// an ID back from its string form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The node number does not fit the layout's node field.
    #[error("invalid node id {node_id}: expected a value in [0, {max}]")]
    InvalidNode {
        /// The rejected node number.
        node_id: i64,
        /// The largest node number the layout can hold.
        max: u64,
    },

    /// The base-64 string could not be decoded.
    #[error("base64 decode failed: {0}")]
    Base64(#[from] Base64Error),

    /// The decoded integer sets bits outside the layout's occupied range.
    #[error("decoded value {raw:#x} sets bits outside the id layout")]
    DecodeOverflow {
        /// The decoded raw value.
        raw: u64,
    },
}
