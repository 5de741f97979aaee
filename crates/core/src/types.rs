/// CMS primary keys are integer ids.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Serde helpers for CMS timestamps.
///
/// The CMS emits RFC 3339 strings, but rows created through its SQLite
/// backend come back without an offset (`2024-05-01T10:00:00.123456`).
/// Offset-less values are read as UTC.
pub mod timestamp {
    use chrono::{NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Timestamp;

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    /// Parse a CMS timestamp string.
    pub fn parse(raw: &str) -> Option<Timestamp> {
        if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
    }

    /// Same as the parent module, for `Option<Timestamp>` fields.
    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        use crate::types::Timestamp;

        pub fn serialize<S: Serializer>(
            ts: &Option<Timestamp>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Timestamp>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw).map(Some).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid timestamp '{raw}'"))
                }),
                None => Ok(None),
            }
        }
    }
}
