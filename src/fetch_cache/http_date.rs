//! RFC 1123 HTTP-date handling, e.g. `Sat, 25 Dec 2021 08:03:41 GMT`.
//!
//! Day and month names are matched in English regardless of the process
//! locale.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Parses an HTTP-date into a UTC timestamp.
///
/// Falls back to general RFC 2822 parsing for servers that send a numeric
/// offset instead of `GMT`.
pub fn parse_http_date(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, HTTP_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|e| {
            DateTime::parse_from_rfc2822(value)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| e)
        })
}

pub fn format_http_date(value: &DateTime<Utc>) -> String {
    value.format(HTTP_DATE_FORMAT).to_string()
}

pub(crate) fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_http_date(value))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_http_date(&raw).map_err(serde::de::Error::custom)
}
