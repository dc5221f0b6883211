//! Parsing and formatting of transaction timestamps.
//!
//! Stored timestamps are naive local wall-clock times written as
//! `YYYY-MM-DDTHH:MM:SS`. Incoming timestamps may also carry a UTC offset,
//! in which case they are converted to the local timezone before the offset
//! is dropped.

use time::{
    OffsetDateTime, PrimitiveDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};
use time_tz::{OffsetDateTimeExt, timezones};

use crate::Error;

const T_SEPARATED: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

const SPACE_SEPARATED: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Parse a timestamp as a wall-clock time in `canonical_timezone`.
///
/// Naive timestamps such as `2024-09-07T13:06:41` or `2024-09-07 13:06:41.250`
/// are already local and are kept as they are. Timestamps with an offset such
/// as `2024-09-07T05:06:41Z` or `2024-09-07T13:06:41+08:00` are converted to
/// the local time in `canonical_timezone`. Fractional seconds are dropped.
///
/// # Errors
/// Returns a:
/// - [Error::InvalidTimestamp] if `text` is not a date and time in any of these layouts,
/// - [Error::InvalidTimezoneError] if `text` has an offset and `canonical_timezone`
///   is not a known timezone.
pub fn parse_timestamp(text: &str, canonical_timezone: &str) -> Result<PrimitiveDateTime, Error> {
    let text = text.trim();

    let Some(instant) = parse_with_offset(text) else {
        return try_parse(text).map_err(|error| {
            tracing::debug!("Could not parse timestamp {text:?}: {error}");
            Error::InvalidTimestamp(text.to_owned())
        });
    };

    let timezone = timezones::get_by_name(canonical_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", canonical_timezone);
        Error::InvalidTimezoneError(canonical_timezone.to_owned())
    })?;
    let local = instant.to_timezone(timezone);
    let local = local.replace_nanosecond(0).unwrap_or(local);

    Ok(PrimitiveDateTime::new(local.date(), local.time()))
}

/// Parse an RFC 3339 timestamp, also accepting a space between date and time.
fn parse_with_offset(text: &str) -> Option<OffsetDateTime> {
    match text.get(10..11) {
        Some(" ") => OffsetDateTime::parse(&format!("{}T{}", &text[..10], &text[11..]), &Rfc3339),
        _ => OffsetDateTime::parse(text, &Rfc3339),
    }
    .ok()
}

/// Parse a naive timestamp, ignoring any fractional seconds.
pub(crate) fn try_parse(text: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    let text = text.trim();
    let text = match text.split_once('.') {
        Some((whole_seconds, _fraction)) => whole_seconds,
        None => text,
    };

    PrimitiveDateTime::parse(text, T_SEPARATED)
        .or_else(|_| PrimitiveDateTime::parse(text, SPACE_SEPARATED))
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_timestamp(timestamp: PrimitiveDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        timestamp.year(),
        u8::from(timestamp.month()),
        timestamp.day(),
        timestamp.hour(),
        timestamp.minute(),
        timestamp.second()
    )
}

/// Serde adapter for `#[serde(with = "...")]` on timestamp fields.
pub(crate) mod serde_timestamp {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use time::PrimitiveDateTime;

    use super::{format_timestamp, try_parse};

    pub fn serialize<S>(timestamp: &PrimitiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(*timestamp))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;

        try_parse(&text).map_err(|error| {
            de::Error::custom(format!("invalid timestamp {text:?}: {error}"))
        })
    }
}
