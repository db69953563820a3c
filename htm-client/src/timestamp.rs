//! Conversion of Unix timestamps into the `MM/DD/YY HH:mm` form the engine parses.

use chrono::{Local, TimeZone};

use crate::error::ClientError;

/// Format string for the engine's ingestion endpoints: zero-padded month, day,
/// two-digit year, 24-hour clock.
pub const WIRE_FORMAT: &str = "%m/%d/%y %H:%M";

/// Render `secs` (seconds since the Unix epoch) as a wire timestamp in the local
/// time zone of the running process.
///
/// Callers that want UTC semantics have to shift `secs` themselves, or use
/// [to_wire_timestamp_in] with [chrono::Utc].
pub fn to_wire_timestamp(secs: i64) -> Result<String, ClientError> {
    to_wire_timestamp_in(secs, &Local)
}

/// Render `secs` as a wire timestamp in the given time zone.
pub fn to_wire_timestamp_in<Tz>(secs: i64, tz: &Tz) -> Result<String, ClientError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    // A UTC instant maps to exactly one local time, so `None` only means out of range.
    let datetime = tz
        .timestamp_opt(secs, 0)
        .single()
        .ok_or(ClientError::InvalidTimestamp(secs))?;

    Ok(datetime.format(WIRE_FORMAT).to_string())
}

#[cfg(test)]
mod test {
    use chrono::{Local, TimeZone, Utc};

    use super::{to_wire_timestamp, to_wire_timestamp_in};
    use crate::error::ClientError;

    fn local_secs(year: i32, month: u32, day: u32, hour: u32, min: u32) -> i64 {
        Local
            .with_ymd_and_hms(year, month, day, hour, min, 0)
            .earliest()
            .unwrap()
            .timestamp()
    }

    #[test]
    pub fn formats_in_local_time() {
        assert_eq!(
            to_wire_timestamp(local_secs(2014, 3, 5, 9, 7)).unwrap(),
            "03/05/14 09:07"
        );
        assert_eq!(
            to_wire_timestamp(local_secs(1999, 12, 31, 23, 59)).unwrap(),
            "12/31/99 23:59"
        );
        assert_eq!(
            to_wire_timestamp(local_secs(2000, 1, 1, 0, 0)).unwrap(),
            "01/01/00 00:00"
        );
    }

    #[test]
    pub fn seconds_are_truncated() {
        let secs = local_secs(2014, 3, 5, 9, 7) + 59;
        assert_eq!(to_wire_timestamp(secs).unwrap(), "03/05/14 09:07");
    }

    #[test]
    pub fn formats_in_explicit_zone() {
        assert_eq!(to_wire_timestamp_in(0, &Utc).unwrap(), "01/01/70 00:00");
        // 2014-01-01T00:05:00Z
        assert_eq!(
            to_wire_timestamp_in(1_388_534_700, &Utc).unwrap(),
            "01/01/14 00:05"
        );
        // Pre-epoch input still follows the calendar.
        assert_eq!(to_wire_timestamp_in(-60, &Utc).unwrap(), "12/31/69 23:59");
    }

    #[test]
    pub fn local_matches_local_zone() {
        let secs = Utc
            .with_ymd_and_hms(2021, 7, 4, 16, 30, 0)
            .unwrap()
            .timestamp();
        assert_eq!(
            to_wire_timestamp(secs).unwrap(),
            to_wire_timestamp_in(secs, &Local).unwrap()
        );
    }

    #[test]
    pub fn out_of_range_is_an_error() {
        match to_wire_timestamp_in(i64::MAX, &Utc) {
            Err(ClientError::InvalidTimestamp(secs)) => assert_eq!(secs, i64::MAX),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
