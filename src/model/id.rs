//! Serde helpers writing Discord snowflakes as strings.
//!
//! Use with `#[serde(with = "crate::model::id::option")]` for optional ids or
//! `crate::model::id::list` for id lists. Deserialization accepts both the string form
//! and a plain number.

use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl RawId {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            RawId::Number(id) => Ok(id),
            RawId::Text(text) => text.trim().parse::<u64>().map_err(E::custom),
        }
    }
}

pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::RawId;

    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(id) => serializer.serialize_some(&id.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<RawId>::deserialize(deserializer)?
            .map(RawId::into_u64)
            .transpose()
    }
}

pub mod list {
    use serde::{ser::SerializeSeq, Deserialize, Deserializer, Serializer};

    use super::RawId;

    pub fn serialize<S>(value: &[u64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(value.len()))?;
        for id in value {
            seq.serialize_element(&id.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<RawId>::deserialize(deserializer)?
            .into_iter()
            .map(RawId::into_u64)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Ids {
        #[serde(with = "super::option", default)]
        channel_id: Option<u64>,
        #[serde(with = "super::option", default)]
        message_id: Option<u64>,
        #[serde(with = "super::list", default)]
        users: Vec<u64>,
    }

    #[test]
    fn writes_ids_as_strings() {
        let ids = Ids {
            channel_id: Some(1_234_567_890_123_456_789),
            message_id: None,
            users: vec![7],
        };

        let value = serde_json::to_value(&ids).unwrap();

        assert_eq!(value["channel_id"], "1234567890123456789");
        assert!(value["message_id"].is_null());
        assert_eq!(value["users"][0], "7");
    }

    #[test]
    fn reads_ids_from_strings_or_numbers() {
        let ids: Ids = serde_json::from_str(
            r#"{"channel_id": 42, "message_id": "1234567890123456789", "users": ["1", 2]}"#,
        )
        .unwrap();

        assert_eq!(ids.channel_id, Some(42));
        assert_eq!(ids.message_id, Some(1_234_567_890_123_456_789));
        assert_eq!(ids.users, vec![1, 2]);
    }

    #[test]
    fn rejects_non_numeric_strings() {
        assert!(serde_json::from_str::<Ids>(r#"{"channel_id": "general"}"#).is_err());
    }
}
