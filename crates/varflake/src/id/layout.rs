/// A macro for defining a bit layout for a custom ID using five components:
/// `reserved`, `random`, `timestamp`, `node`, and `sequence`, followed by the
/// fixed `shuffle` toggle pairs.
///
/// Components are laid out from **most significant bit (MSB)** to **least
/// significant bit (LSB)** in that exact order.
///
/// - The widths must add up to exactly 64.
/// - At least one reserved bit is required, so the value never sets the sign
///   bit of an `i64`.
/// - Every shuffle position must lie inside the occupied (non-reserved) bits.
///   An empty list disables obfuscation.
///
/// Violations fail at compile time.
///
/// ```text
/// define_var_id!(
///     <TypeName>,
///     reserved: <bits>,
///     random: <bits>,
///     timestamp: <bits>,
///     node: <bits>,
///     sequence: <bits>,
///     shuffle: [(<bit>, <bit>), ...]
/// );
/// ```
///
/// Every generator in a fleet must share one layout. Changing any width is a
/// breaking schema change; define a new type rather than editing an old one.
///
/// ## Example
/// ```rust
/// use varflake::{define_var_id, VarId};
///
/// define_var_id!(
///     /// 40-bit IDs with no random field and no obfuscation.
///     CompactId,
///     reserved: 24,
///     random: 0,
///     timestamp: 30,
///     node: 2,
///     sequence: 8,
///     shuffle: []
/// );
///
/// assert_eq!(CompactId::occupied_bits(), 40);
/// assert_eq!(CompactId::max_base64_len(), 7);
/// ```
#[macro_export]
macro_rules! define_var_id {
    (
        $(#[$meta:meta])*
        $name:ident,
        reserved: $reserved_bits:expr,
        random: $random_bits:expr,
        timestamp: $timestamp_bits:expr,
        node: $node_bits:expr,
        sequence: $sequence_bits:expr,
        shuffle: [$(($p1:expr, $p2:expr)),* $(,)?]
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name {
            id: u64,
        }

        const _: () = {
            assert!(
                $reserved_bits + $random_bits + $timestamp_bits + $node_bits + $sequence_bits
                    == u64::BITS,
                "Layout must match underlying type width"
            );
            assert!(
                $reserved_bits >= 1,
                "At least one reserved bit keeps the value non-negative as an i64"
            );
            let mut i = 0;
            while i < $name::SHUFFLE.len() {
                let (p1, p2) = $name::SHUFFLE[i];
                assert!(
                    p1 < $name::OCCUPIED_BITS && p2 < $name::OCCUPIED_BITS,
                    "Shuffle positions must lie inside the occupied bits"
                );
                i += 1;
            }
        };

        impl $name {
            pub const RESERVED_BITS: u32 = $reserved_bits;
            pub const RANDOM_BITS: u32 = $random_bits;
            pub const TIMESTAMP_BITS: u32 = $timestamp_bits;
            pub const NODE_BITS: u32 = $node_bits;
            pub const SEQUENCE_BITS: u32 = $sequence_bits;

            pub const SEQUENCE_SHIFT: u32 = 0;
            pub const NODE_SHIFT: u32 = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;
            pub const TIMESTAMP_SHIFT: u32 = Self::NODE_SHIFT + Self::NODE_BITS;
            pub const RANDOM_SHIFT: u32 = Self::TIMESTAMP_SHIFT + Self::TIMESTAMP_BITS;
            pub const OCCUPIED_BITS: u32 = Self::RANDOM_SHIFT + Self::RANDOM_BITS;

            pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;
            pub const NODE_MASK: u64 = (1 << Self::NODE_BITS) - 1;
            pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;
            pub const RANDOM_MASK: u64 = (1 << Self::RANDOM_BITS) - 1;

            /// The longest base-64 string this layout encodes to.
            pub const MAX_BASE64_LEN: usize = $crate::base64_len(Self::OCCUPIED_BITS);

            /// Bit positions toggled by [`Self::obfuscate`], in order.
            pub const SHUFFLE: &'static [(u32, u32)] = &[$(($p1, $p2)),*];

            #[must_use]
            pub const fn from(random: u64, timestamp: u64, node_id: u64, sequence: u64) -> Self {
                let r = (random & Self::RANDOM_MASK) << Self::RANDOM_SHIFT;
                let t = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
                let n = (node_id & Self::NODE_MASK) << Self::NODE_SHIFT;
                let s = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
                Self { id: r | t | n | s }
            }

            /// Extracts the random field from the packed ID.
            #[must_use]
            pub const fn random(&self) -> u64 {
                (self.id >> Self::RANDOM_SHIFT) & Self::RANDOM_MASK
            }

            /// Extracts the timestamp from the packed ID.
            #[must_use]
            pub const fn timestamp(&self) -> u64 {
                (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
            }

            /// Extracts the node ID from the packed ID.
            #[must_use]
            pub const fn node_id(&self) -> u64 {
                (self.id >> Self::NODE_SHIFT) & Self::NODE_MASK
            }

            /// Extracts the sequence number from the packed ID.
            #[must_use]
            pub const fn sequence(&self) -> u64 {
                (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
            }

            /// Returns the ID with the layout's toggle sequence applied.
            #[must_use]
            pub const fn obfuscate(self) -> Self {
                Self {
                    id: $crate::shuffle_bits(self.id, Self::SHUFFLE),
                }
            }

            #[must_use]
            pub const fn to_raw(&self) -> u64 {
                self.id
            }

            #[must_use]
            pub const fn from_raw(raw: u64) -> Self {
                Self { id: raw }
            }
        }

        impl $crate::VarId for $name {
            fn random(&self) -> u64 {
                self.random()
            }

            fn timestamp(&self) -> u64 {
                self.timestamp()
            }

            fn node_id(&self) -> u64 {
                self.node_id()
            }

            fn sequence(&self) -> u64 {
                self.sequence()
            }

            fn max_random() -> u64 {
                Self::RANDOM_MASK
            }

            fn max_timestamp() -> u64 {
                Self::TIMESTAMP_MASK
            }

            fn max_node_id() -> u64 {
                Self::NODE_MASK
            }

            fn max_sequence() -> u64 {
                Self::SEQUENCE_MASK
            }

            fn occupied_bits() -> u32 {
                Self::OCCUPIED_BITS
            }

            fn max_base64_len() -> usize {
                Self::MAX_BASE64_LEN
            }

            fn from_components(random: u64, timestamp: u64, node_id: u64, sequence: u64) -> Self {
                debug_assert!(node_id <= Self::NODE_MASK, "node_id overflow");
                debug_assert!(sequence <= Self::SEQUENCE_MASK, "sequence overflow");
                Self::from(random, timestamp, node_id, sequence)
            }

            fn to_raw(&self) -> u64 {
                self.to_raw()
            }

            fn from_raw(raw: u64) -> Self {
                Self::from_raw(raw)
            }

            fn obfuscate(self) -> Self {
                self.obfuscate()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.id, f)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let full = core::any::type_name::<Self>();
                let name = full.rsplit("::").next().unwrap_or(full);
                let mut dbg = f.debug_struct(name);
                dbg.field("id", &format_args!("{} (0x{:x})", self.id, self.id));
                dbg.field("random", &self.random());
                dbg.field("timestamp", &self.timestamp());
                dbg.field("node_id", &self.node_id());
                dbg.field("sequence", &self.sequence());
                dbg.finish()
            }
        }

        impl From<$name> for i64 {
            fn from(val: $name) -> Self {
                $crate::VarId::as_i64(&val)
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
                <Self as $crate::Base64Ext>::decode(s)
            }
        }

        impl core::convert::TryFrom<&str> for $name {
            type Error = $crate::Error;

            fn try_from(s: &str) -> core::result::Result<Self, Self::Error> {
                <Self as $crate::Base64Ext>::decode(s)
            }
        }
    };
}

define_var_id!(
    /// The default 64-bit layout, with 54 occupied bits.
    ///
    /// - 10 bits reserved
    /// - 9 bits random
    /// - 29 bits timestamp (seconds since the epoch, about 17 years)
    /// - 6 bits node ID
    /// - 10 bits sequence (1024 IDs per second per node)
    ///
    /// ```text
    ///  Bit Index:  63            54 53         45 44            16 15          10 9             0
    ///              +---------------+-------------+----------------+-------------+---------------+
    ///  Field:      | reserved (10) | random (9)  | timestamp (29) | node ID (6) | sequence (10) |
    ///              +---------------+-------------+----------------+-------------+---------------+
    ///              |<----------------------- MSB ---------- 64 bits --------- LSB ------------->|
    /// ```
    ///
    /// Generated IDs are obfuscated: each random bit is toggled together with
    /// a bit in a lower field, so consecutive IDs do not count up visibly.
    /// Call [`VarId::deobfuscate`] before reading fields of a generated ID.
    ///
    /// [`VarId::deobfuscate`]: crate::VarId::deobfuscate
    VarSnowflakeId,
    reserved: 10,
    random: 9,
    timestamp: 29,
    node: 6,
    sequence: 10,
    shuffle: [
        (53, 4),
        (52, 13),
        (51, 22),
        (50, 31),
        (49, 40),
        (48, 7),
        (47, 18),
        (46, 27),
        (45, 36),
    ]
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, VarId};

    #[test]
    fn default_layout_constants() {
        assert_eq!(VarSnowflakeId::SEQUENCE_SHIFT, 0);
        assert_eq!(VarSnowflakeId::NODE_SHIFT, 10);
        assert_eq!(VarSnowflakeId::TIMESTAMP_SHIFT, 16);
        assert_eq!(VarSnowflakeId::RANDOM_SHIFT, 45);
        assert_eq!(VarSnowflakeId::OCCUPIED_BITS, 54);
        assert_eq!(VarSnowflakeId::max_node_id(), 63);
        assert_eq!(VarSnowflakeId::max_sequence(), 1023);
        assert_eq!(VarSnowflakeId::max_timestamp(), (1 << 29) - 1);
        assert_eq!(VarSnowflakeId::max_random(), 511);
        assert_eq!(VarSnowflakeId::max_base64_len(), 9);
    }

    #[test]
    fn field_masks_do_not_overlap() {
        let masks = [
            VarSnowflakeId::SEQUENCE_MASK << VarSnowflakeId::SEQUENCE_SHIFT,
            VarSnowflakeId::NODE_MASK << VarSnowflakeId::NODE_SHIFT,
            VarSnowflakeId::TIMESTAMP_MASK << VarSnowflakeId::TIMESTAMP_SHIFT,
            VarSnowflakeId::RANDOM_MASK << VarSnowflakeId::RANDOM_SHIFT,
        ];
        let mut seen = 0_u64;
        for mask in masks {
            assert_eq!(seen & mask, 0);
            seen |= mask;
        }
        assert_eq!(seen, (1 << 54) - 1);
    }

    #[test]
    fn components_round_trip() {
        let id = VarSnowflakeId::from_components(300, 123_456, 42, 999);
        assert_eq!(id.random(), 300);
        assert_eq!(id.timestamp(), 123_456);
        assert_eq!(id.node_id(), 42);
        assert_eq!(id.sequence(), 999);
        assert!(id.is_valid());
        assert!(id.as_i64() >= 0);
        assert_eq!(i64::from(id), id.as_i64());
    }

    #[test]
    fn max_components() {
        let id = VarSnowflakeId::from_components(
            VarSnowflakeId::max_random(),
            VarSnowflakeId::max_timestamp(),
            VarSnowflakeId::max_node_id(),
            VarSnowflakeId::max_sequence(),
        );
        assert_eq!(id.to_raw(), (1 << 54) - 1);
        assert_eq!(id.to_base2(), "1".repeat(54));
    }

    #[test]
    fn oversized_timestamp_is_masked() {
        let id = VarSnowflakeId::from(0, (1 << 29) + 5, 0, 0);
        assert_eq!(id.timestamp(), 5);
        assert!(id.is_valid());
    }

    #[test]
    fn obfuscation_toggles_listed_positions() {
        let id = VarSnowflakeId::from_components(0, 77, 1, 3);
        let shuffled = id.obfuscate();
        let expected_mask = VarSnowflakeId::SHUFFLE
            .iter()
            .fold(0_u64, |acc, (p1, p2)| acc ^ (1_u64 << p1) ^ (1_u64 << p2));
        assert_eq!(id.to_raw() ^ shuffled.to_raw(), expected_mask);
        assert!(shuffled.is_valid());
        assert_ne!(shuffled.sequence(), id.sequence());
        assert_eq!(shuffled.deobfuscate(), id);
    }

    #[test]
    fn reserved_bits_mark_invalid() {
        let id = VarSnowflakeId::from_raw(1 << 60 | 5);
        assert!(!id.is_valid());
        assert_eq!(id.into_valid().to_raw(), 5);
    }

    #[test]
    fn display_debug_and_parse() {
        let id = VarSnowflakeId::from_raw(123_456_789);
        assert_eq!(id.to_string(), "123456789");
        let dbg = format!("{id:?}");
        assert!(dbg.starts_with("VarSnowflakeId"));
        assert!(dbg.contains("node_id"));
        assert_eq!(id.to_base2(), format!("{:b}", 123_456_789));

        let parsed: VarSnowflakeId = "GEO0m".parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(VarSnowflakeId::try_from("GEO0m").unwrap(), id);
        assert!(matches!(
            "bad!".parse::<VarSnowflakeId>(),
            Err(Error::Base64(_))
        ));
    }

    define_var_id!(
        PlainId,
        reserved: 1,
        random: 0,
        timestamp: 41,
        node: 10,
        sequence: 12,
        shuffle: []
    );

    #[test]
    fn layout_without_random_or_shuffle() {
        assert_eq!(PlainId::OCCUPIED_BITS, 63);
        assert_eq!(PlainId::max_random(), 0);
        assert_eq!(PlainId::max_base64_len(), 11);
        let id = PlainId::from_components(u64::MAX, 5, 6, 7);
        assert_eq!(id.random(), 0);
        assert_eq!(id.obfuscate(), id);
        assert_eq!(id.timestamp(), 5);
    }
}
