use crate::base64::Base64Error;

/// The URL-safe alphabet (RFC 4648 `-` and `_` variant), permuted so encoded
/// IDs do not read as a plain counter. The permutation is cosmetic only.
pub const ALPHABET: &[u8; 64] = b"Pl1i3Z9GTXgSuVB-KpxUbmER6FeA2v7o8zHYhcdajnM54rDfJkqI0wtCyLQ_OsWN";

/// The longest string any `u64` encodes to (`ceil(64 / 6)`).
pub const MAX_BASE64_LEN: usize = base64_len(u64::BITS);

const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: u32 = 6;
const BASE: u64 = 1 << BITS_PER_CHAR;
const CHAR_MASK: u64 = BASE - 1;

/// Inverse of [`ALPHABET`], built at compile time.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        lut[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    lut
};

/// Number of base-64 characters needed for a value spanning `bits` bits.
#[must_use]
pub const fn base64_len(bits: u32) -> usize {
    bits.div_ceil(BITS_PER_CHAR) as usize
}

/// Encodes `value` most-significant digit first, without padding.
///
/// Values below 64 encode to a single character; there are no leading zero
/// digits otherwise.
#[must_use]
pub fn encode_base64(value: u64) -> String {
    let mut buf = [0_u8; MAX_BASE64_LEN];
    let mut start = buf.len();
    let mut rest = value;

    // Fill from the right, least significant digit first.
    while rest >= BASE {
        start -= 1;
        buf[start] = ALPHABET[(rest & CHAR_MASK) as usize];
        rest >>= BITS_PER_CHAR;
    }
    start -= 1;
    buf[start] = ALPHABET[rest as usize];

    buf[start..].iter().map(|&b| char::from(b)).collect()
}

/// Decodes a string produced by [`encode_base64`].
///
/// # Errors
///
/// Returns an error if the input is empty, longer than [`MAX_BASE64_LEN`],
/// contains a character outside [`ALPHABET`], or accumulates past `u64::MAX`.
pub fn decode_base64(s: &str) -> Result<u64, Base64Error> {
    if s.is_empty() {
        return Err(Base64Error::Empty);
    }
    if s.len() > MAX_BASE64_LEN {
        return Err(Base64Error::InvalidLen {
            len: s.len(),
            max: MAX_BASE64_LEN,
        });
    }

    s.bytes().enumerate().try_fold(0_u64, |acc, (index, byte)| {
        let digit = LOOKUP[byte as usize];
        if digit == NO_VALUE {
            return Err(Base64Error::InvalidAscii { byte, index });
        }
        acc.checked_mul(BASE)
            .and_then(|acc| acc.checked_add(u64::from(digit)))
            .ok_or(Base64Error::Overflow)
    })
}
