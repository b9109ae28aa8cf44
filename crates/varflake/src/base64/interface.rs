use crate::{
    Error, Result, VarId,
    base64::{Base64Error, decode_base64, encode_base64},
};

/// Extension trait rendering IDs to and from their compact base-64 form.
///
/// Encoded strings are variable-length, most-significant digit first, and
/// never longer than [`VarId::max_base64_len`] for the layout. They are
/// URL-safe but do **not** sort lexically in ID order, since the alphabet is
/// permuted.
pub trait Base64Ext: VarId {
    /// Encodes this ID into a base-64 [`String`].
    ///
    /// # Example
    ///
    /// ```
    /// use varflake::{Base64Ext, VarId, VarSnowflakeId};
    ///
    /// let id = VarSnowflakeId::from_raw(123_456_789);
    /// assert_eq!(id.encode(), "GEO0m");
    /// ```
    fn encode(&self) -> String {
        encode_base64(self.to_raw())
    }

    /// Decodes a base-64 string back into an ID.
    ///
    /// This restores the raw integer only; an obfuscated ID stays obfuscated
    /// and must be passed through [`VarId::deobfuscate`] before reading its
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty, longer than the layout
    /// allows, contains characters outside the alphabet, or decodes to a
    /// value with bits set above the layout's occupied range.
    fn decode(s: &str) -> Result<Self> {
        let max = Self::max_base64_len();
        if s.len() > max {
            return Err(Base64Error::InvalidLen { len: s.len(), max }.into());
        }
        let id = Self::from_raw(decode_base64(s)?);
        if !id.is_valid() {
            return Err(Error::DecodeOverflow { raw: id.to_raw() });
        }
        Ok(id)
    }
}

impl<ID: VarId> Base64Ext for ID {}
