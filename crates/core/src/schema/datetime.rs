//! Serde adapters for wall-clock booking times (`2025-01-01T10:00`).
//!
//! This is the `datetime-local` format: no offset, minutes precision.
//! Seconds are accepted on input and written back only when non-zero, so a
//! backend time is never truncated by an edit.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

const EMIT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const EMIT_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const ACCEPT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

pub fn parse(value: &str) -> Option<NaiveDateTime> {
    ACCEPT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

pub fn format(value: &NaiveDateTime) -> String {
    let fmt = if value.second() == 0 && value.nanosecond() == 0 {
        EMIT_FORMAT
    } else {
        EMIT_SECONDS_FORMAT
    };
    value.format(fmt).to_string()
}

pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format_args!("invalid date-time `{raw}`")))
}

pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_some(&super::format(v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => super::parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format_args!("invalid date-time `{raw}`"))),
        }
    }
}
