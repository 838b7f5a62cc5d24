use crate::parsers::error::ParseError;
use chrono::{Local, NaiveDateTime, TimeZone, Utc};

const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Converts an API timestamp such as `2021-12-25T08:00:00Z` to local wall
/// clock time without zone information.
pub fn utc_to_local(value: &str) -> Result<NaiveDateTime, ParseError> {
    let utc = NaiveDateTime::parse_from_str(value, UTC_FORMAT).map_err(|e| {
        ParseError::InvalidTimestamp {
            value: value.to_string(),
            source: e,
        }
    })?;
    Ok(Utc.from_utc_datetime(&utc).with_timezone(&Local).naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn test_offset_matches_local_zone() -> Result<(), ParseError> {
        let local = utc_to_local("2021-12-25T08:00:00Z")?;
        let utc = NaiveDate::from_ymd_opt(2021, 12, 25)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap();
        let offset = Local.offset_from_utc_datetime(&utc).local_minus_utc();

        assert_eq!(local - utc, Duration::seconds(offset as i64));
        Ok(())
    }

    #[test]
    fn test_rejects_timestamps_with_offset() {
        assert!(matches!(
            utc_to_local("2021-12-25T08:00:00+01:00"),
            Err(ParseError::InvalidTimestamp { .. })
        ));
    }
}
