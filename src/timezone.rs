//! Resolves "now" in the server's configured timezone.

use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current wall-clock time in `canonical_timezone`, e.g. "America/New_York".
///
/// Transaction dates are naive local times, so they are compared against this.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `canonical_timezone` is not a known timezone.
pub fn local_now(canonical_timezone: &str) -> Result<PrimitiveDateTime, Error> {
    let offset = get_local_offset(canonical_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", canonical_timezone);
        Error::InvalidTimezoneError(canonical_timezone.to_owned())
    })?;

    let now = OffsetDateTime::now_utc().to_offset(offset);

    Ok(PrimitiveDateTime::new(now.date(), now.time()))
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::local_now;

    #[test]
    fn rejects_unknown_timezone() {
        let result = local_now("Middle/Earth");

        assert_eq!(result, Err(Error::InvalidTimezoneError("Middle/Earth".to_owned())));
    }

    #[test]
    fn resolves_utc() {
        assert!(local_now("Etc/UTC").is_ok());
    }
}
