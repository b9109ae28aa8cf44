/// Errors produced while decoding a base-64 ID string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Base64Error {
    /// The input string was empty.
    #[error("empty input")]
    Empty,

    /// The input is longer than any value of the target type can encode to.
    #[error("invalid length {len}: expected at most {max} characters")]
    InvalidLen { len: usize, max: usize },

    /// The input contains a byte outside the alphabet.
    #[error("invalid character {byte:#04x} at index {index}")]
    InvalidAscii { byte: u8, index: usize },

    /// The accumulated value does not fit in 64 bits.
    #[error("decoded value overflows 64 bits")]
    Overflow,
}
