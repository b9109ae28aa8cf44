use ::serde::{Deserializer, Serializer};

pub mod as_base64 {
    use super::{Deserializer, Serializer};
    use crate::Base64Ext;

    /// Serialize an ID as its base-64 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: Base64Ext,
        S: Serializer,
    {
        s.serialize_str(&id.encode())
    }

    /// Deserialize an ID from its base-64 string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is not valid base-64 for the layout (empty, too long, or
    ///   containing characters outside the alphabet)
    /// - The decoded value sets bits above the layout's occupied range
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: Base64Ext,
        D: Deserializer<'de>,
    {
        struct Base64Visitor<ID>(core::marker::PhantomData<ID>);

        impl<ID> ::serde::de::Visitor<'_> for Base64Visitor<ID>
        where
            ID: Base64Ext,
        {
            type Value = ID;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a base-64 encoded id string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: ::serde::de::Error,
            {
                ID::decode(v).map_err(E::custom)
            }
        }

        d.deserialize_str(Base64Visitor(core::marker::PhantomData))
    }
}
