use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::{Error, VarId};

    /// Serialize an ID as its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: VarId,
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize an ID from its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The value sets bits above the layout's occupied range
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: VarId,
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(d)?;
        let id = ID::from_raw(raw);
        if !id.is_valid() {
            return Err(::serde::de::Error::custom(Error::DecodeOverflow { raw }));
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{VarId, VarSnowflakeId};
    use serde_json::json;

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(with = "as_native")]
        id: VarSnowflakeId,
    }

    #[test]
    fn native_round_trip() {
        let row = Row {
            id: VarSnowflakeId::from_components(1, 2, 3, 4),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value, json!({ "id": row.id.to_raw() }));
        let back: Row = serde_json::from_value(value).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn native_rejects_reserved_bits() {
        let err = serde_json::from_value::<Row>(json!({ "id": 1_u64 << 60 })).unwrap_err();
        assert!(err.to_string().contains("outside the id layout"));
    }
}
