use core::fmt;
use core::hash::Hash;

/// A trait for layout-compatible, second-resolution Snowflake-style IDs.
///
/// Each implementor packs five fields into a `u64`, from most to least
/// significant bit: reserved, random, timestamp, node, and sequence. The
/// reserved bits are always zero, so the value also fits an `i64` without
/// going negative.
///
/// Implementors are normally produced by [`define_var_id!`].
///
/// # Example
///
/// ```
/// use varflake::{VarId, VarSnowflakeId};
///
/// let id = VarSnowflakeId::from_components(0, 1000, 2, 1);
/// assert_eq!(id.timestamp(), 1000);
/// assert_eq!(id.node_id(), 2);
/// assert_eq!(id.sequence(), 1);
/// ```
///
/// [`define_var_id!`]: crate::define_var_id
pub trait VarId:
    Copy + Clone + fmt::Display + fmt::Debug + PartialOrd + Ord + PartialEq + Eq + Hash
{
    /// Returns the random portion of the ID.
    fn random(&self) -> u64;

    /// Returns the timestamp portion of the ID, in seconds since the epoch.
    fn timestamp(&self) -> u64;

    /// Returns the node portion of the ID.
    fn node_id(&self) -> u64;

    /// Returns the sequence portion of the ID.
    fn sequence(&self) -> u64;

    /// Returns the maximum possible value for the random field.
    fn max_random() -> u64;

    /// Returns the maximum possible value for the timestamp field.
    fn max_timestamp() -> u64;

    /// Returns the maximum possible value for the node field.
    fn max_node_id() -> u64;

    /// Returns the maximum possible value for the sequence field.
    fn max_sequence() -> u64;

    /// Number of low-order bits the layout actually uses.
    fn occupied_bits() -> u32;

    /// The longest base-64 string an ID of this layout encodes to.
    fn max_base64_len() -> usize {
        crate::base64_len(Self::occupied_bits())
    }

    /// Constructs a new ID from its components. Each component is masked to
    /// its field width.
    #[must_use]
    fn from_components(random: u64, timestamp: u64, node_id: u64, sequence: u64) -> Self;

    /// Converts this type into its raw representation.
    fn to_raw(&self) -> u64;

    /// Converts a raw value into this type.
    fn from_raw(raw: u64) -> Self;

    /// Applies the layout's fixed bit-toggle sequence.
    ///
    /// This is cosmetic obfuscation, not encryption. Toggling the same
    /// positions again restores the original value, so
    /// `id.obfuscate().deobfuscate() == id`.
    #[must_use]
    fn obfuscate(self) -> Self;

    /// Re-applies the bit-toggle sequence, undoing [`VarId::obfuscate`].
    #[must_use]
    fn deobfuscate(self) -> Self {
        self.obfuscate()
    }

    /// Returns `true` if no bit above the occupied range is set.
    fn is_valid(&self) -> bool {
        self.to_raw() >> Self::occupied_bits() == 0
    }

    /// Returns a copy with every bit above the occupied range cleared.
    #[must_use]
    fn into_valid(self) -> Self {
        Self::from_raw(self.to_raw() & ((1 << Self::occupied_bits()) - 1))
    }

    /// Returns the ID as a signed 64-bit integer.
    fn as_i64(&self) -> i64 {
        // The reserved top bit is never set for a valid ID.
        self.to_raw() as i64
    }

    /// Returns the base-2 text form of [`VarId::as_i64`], for diagnostics.
    fn to_base2(&self) -> String {
        format!("{:b}", self.as_i64())
    }
}
