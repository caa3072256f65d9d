//! Serde helpers for the task wire format.
//!
//! Dates travel as `YYYY-MM-DD` and due times as `HH:MM`. Decoding also
//! accepts the shapes the task service emits for its `DATE` and `TIME`
//! columns: full RFC 3339 timestamps and `HH:MM:SS` times.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const TIME_WITH_SECONDS_FORMAT: &str = "%H:%M:%S";

pub(super) fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let date_part = raw.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
}

pub(super) fn parse_time(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, TIME_WITH_SECONDS_FORMAT))
}

/// Treats `null`, a missing value, and the empty string alike.
fn deserialize_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}

pub(super) mod calendar_date {
    use super::{DATE_FORMAT, parse_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(de::Error::custom)
    }
}

pub(super) mod optional_calendar_date {
    use super::{DATE_FORMAT, deserialize_non_empty, parse_date};
    use chrono::NaiveDate;
    use serde::{Deserializer, Serializer, de};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(value) => serializer.collect_str(&value.format(DATE_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_non_empty(deserializer)?
            .map(|raw| parse_date(&raw).map_err(de::Error::custom))
            .transpose()
    }
}

pub(super) mod optional_clock_time {
    use super::{TIME_FORMAT, deserialize_non_empty, parse_time};
    use chrono::NaiveTime;
    use serde::{Deserializer, Serializer, de};

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(value) => serializer.collect_str(&value.format(TIME_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_non_empty(deserializer)?
            .map(|raw| parse_time(&raw).map_err(de::Error::custom))
            .transpose()
    }
}

/// Decodes a subtask list where the service may send `null` for leaves.
pub(super) fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
