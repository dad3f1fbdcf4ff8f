//! Date parsing and formatting.
//!
//! All dates are `DateTime<Utc>`. Parsing is lenient so front matter and
//! remote feeds can use whatever common notation they like.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, de};
use std::fmt;

/// Long form: `March 5, 2024`
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Short form: `Mar 5, 2024`
pub fn format_date_short(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// ISO calendar date: `2024-03-05`
pub fn format_date_iso(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// RFC 2822, as required by rss `<pubDate>`.
pub fn to_rfc2822(date: DateTime<Utc>) -> String {
    date.to_rfc2822()
}

/// Parse a date string in any of the supported notations.
///
/// | Input                           | Interpretation       |
/// |---------------------------------|----------------------|
/// | `2024-03-05`                    | midnight UTC         |
/// | `2024-03-05T10:00:00+02:00`     | RFC 3339             |
/// | `2024-03-05T10:00:00`           | UTC                  |
/// | `2024-03-05 10:00:00 +02:00`    | YAML timestamp       |
/// | `Tue, 05 Mar 2024 10:00:00 GMT` | RFC 2822             |
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f %:z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ============================================================================
// Serde Coercion
// ============================================================================

/// Deserialize a required date from a string or epoch milliseconds.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    CoercedDate::deserialize(deserializer).map(|date| date.0)
}

/// Deserialize an optional date; use with `#[serde(default)]`.
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<CoercedDate>::deserialize(deserializer).map(|date| date.map(|d| d.0))
}

struct CoercedDate(DateTime<Utc>);

impl<'de> Deserialize<'de> for CoercedDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CoercedDateVisitor)
    }
}

struct CoercedDateVisitor;

impl de::Visitor<'_> for CoercedDateVisitor {
    type Value = CoercedDate;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a date string or milliseconds since the unix epoch")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_date(v)
            .map(CoercedDate)
            .ok_or_else(|| E::custom(format!("invalid date `{v}`")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        DateTime::from_timestamp_millis(v)
            .map(CoercedDate)
            .ok_or_else(|| E::custom(format!("timestamp out of range: {v}")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let millis = i64::try_from(v).map_err(|_| E::custom(format!("timestamp out of range: {v}")))?;
        self.visit_i64(millis)
    }
}
