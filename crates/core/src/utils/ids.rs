//! Serde adapters for record identifiers.
//!
//! Identifiers are integers in storage but are rendered as strings in JSON.
//! Incoming payloads may carry either form.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

use crate::RecordId;

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(i64),
    Text(String),
}

impl IdRepr {
    fn into_id<E: de::Error>(self) -> Result<Option<RecordId>, E> {
        match self {
            IdRepr::Number(n) => RecordId::try_from(n)
                .map(Some)
                .map_err(|_| E::custom(format!("id out of range: {n}"))),
            IdRepr::Text(s) if s.trim().is_empty() => Ok(None),
            IdRepr::Text(s) => s
                .trim()
                .parse::<RecordId>()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid id: {s}"))),
        }
    }
}

/// Parses an id taken from a URL path segment.
pub fn parse_id(raw: &str) -> Option<RecordId> {
    raw.trim().parse().ok()
}

/// Required id, rendered as a string.
pub mod as_string {
    use super::*;

    pub fn serialize<S: Serializer>(id: &RecordId, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RecordId, D::Error> {
        IdRepr::deserialize(deserializer)?
            .into_id()?
            .ok_or_else(|| de::Error::custom("id cannot be empty"))
    }
}

/// Optional id. `null`, a missing field and `""` all mean "no id".
pub mod opt_as_string {
    use super::*;

    pub fn serialize<S: Serializer>(id: &Option<RecordId>, serializer: S) -> Result<S::Ok, S::Error> {
        match id {
            Some(id) => serializer.collect_str(id),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<RecordId>, D::Error> {
        match Option::<IdRepr>::deserialize(deserializer)? {
            Some(repr) => repr.into_id(),
            None => Ok(None),
        }
    }
}

/// Optional list of ids, as sent for `contactIds`.
pub mod opt_list {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<RecordId>>, D::Error> {
        let Some(raw) = Option::<Vec<IdRepr>>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let mut ids = Vec::with_capacity(raw.len());
        for repr in raw {
            if let Some(id) = repr.into_id()? {
                ids.push(id);
            }
        }
        Ok(Some(ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    struct Linked {
        #[serde(with = "as_string")]
        id: RecordId,
        #[serde(default, with = "opt_as_string")]
        client_id: Option<RecordId>,
        #[serde(default, deserialize_with = "opt_list::deserialize", skip_serializing)]
        contact_ids: Option<Vec<RecordId>>,
    }

    #[test]
    fn ids_render_as_strings() {
        let json = serde_json::to_value(Linked {
            id: 7,
            client_id: Some(3),
            contact_ids: None,
        })
        .unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["clientId"], "3");
    }

    #[test]
    fn ids_accept_numbers_strings_and_blanks() {
        let linked: Linked =
            serde_json::from_str(r#"{"id":"12","clientId":"","contactIds":[1,"2"]}"#).unwrap();
        assert_eq!(linked.id, 12);
        assert_eq!(linked.client_id, None);
        assert_eq!(linked.contact_ids, Some(vec![1, 2]));

        let linked: Linked = serde_json::from_str(r#"{"id":4,"clientId":9}"#).unwrap();
        assert_eq!(linked.client_id, Some(9));
        assert_eq!(linked.contact_ids, None);
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert!(serde_json::from_str::<Linked>(r#"{"id":"abc"}"#).is_err());
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(" 42 "), Some(42));
    }
}
