//! Thin wrappers around `chrono` parsing, formatting and calendar-day
//! arithmetic.
//!
//! Nothing here knows about the 30-hour clock: layouts passed to these
//! functions only contain regular `chrono` specifiers.

use alloc::string::String;
use core::fmt::{self, Write};

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, Days, TimeZone};

use crate::ParseError;

/// Parses a date-time in time zone `tz` and moves it `days` calendar days
/// forward.
///
/// A value carrying its own UTC offset designates an instant which is then
/// expressed in `tz`. Otherwise the value is a wall-clock time in `tz`; the
/// days are added to the wall-clock date before the time zone is applied, and
/// an ambiguous wall-clock time resolves to the earliest instant.
pub(crate) fn parse_in<Tz: TimeZone>(
    layout: &str,
    value: &str,
    tz: &Tz,
    days: u64,
) -> Result<DateTime<Tz>, ParseError> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, value, StrftimeItems::new(layout))?;

    if let Ok(date_time) = parsed.to_datetime() {
        let date_time = date_time
            .checked_add_days(Days::new(days))
            .ok_or(ParseError::OutOfRange)?;

        return Ok(date_time.with_timezone(tz));
    }

    let local = parsed
        .to_naive_datetime_with_offset(0)?
        .checked_add_days(Days::new(days))
        .ok_or(ParseError::OutOfRange)?;

    tz.from_local_datetime(&local)
        .earliest()
        .ok_or(ParseError::OutOfRange)
}

/// Consumes the part of `value` matched by `layout` and returns the rest.
pub(crate) fn consume<'a>(layout: &str, value: &'a str) -> Result<&'a str, ParseError> {
    let rest = format::parse_and_remainder(&mut Parsed::new(), value, StrftimeItems::new(layout))?;

    Ok(rest)
}

/// Returns the same wall-clock time on the previous day, if it exists in the
/// time zone of the date-time.
pub(crate) fn previous_day<Tz: TimeZone>(date_time: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let local = date_time.naive_local().checked_sub_days(Days::new(1))?;

    date_time.timezone().from_local_datetime(&local).earliest()
}

/// Formats a date-time.
///
/// An error is returned if the layout contains an invalid specifier.
pub(crate) fn render<Tz: TimeZone>(date_time: &DateTime<Tz>, layout: &str) -> Result<String, fmt::Error>
where
    Tz::Offset: fmt::Display,
{
    let mut out = String::new();
    write!(out, "{}", date_time.format(layout))?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{FixedOffset, Utc};
    use chrono_tz::America::New_York;

    const LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

    #[test]
    fn parse_utc() {
        assert_eq!(
            parse_in(LAYOUT, "2020-07-12 13:04:05", &Utc, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 7, 12, 13, 4, 5).unwrap()
        );
    }

    #[test]
    fn parse_add_days() {
        assert_eq!(
            parse_in(LAYOUT, "2020-12-31 01:00:00", &Utc, 1).unwrap(),
            Utc.with_ymd_and_hms(2021, 1, 1, 1, 0, 0).unwrap()
        );
        assert_eq!(
            parse_in(LAYOUT, "2020-02-28 00:30:00", &Utc, 1).unwrap(),
            Utc.with_ymd_and_hms(2020, 2, 29, 0, 30, 0).unwrap()
        );
    }

    #[test]
    fn parse_unpadded_hour() {
        assert_eq!(
            parse_in(LAYOUT, "2020-07-12 1:30:00", &Utc, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 7, 12, 1, 30, 0).unwrap()
        );
    }

    #[test]
    fn parse_with_offset() {
        // The offset of the value wins over the target time zone.
        let date_time =
            parse_in("%Y-%m-%d %H:%M %z", "2020-07-12 01:30 +0900", &Utc, 1).unwrap();

        assert_eq!(date_time, Utc.with_ymd_and_hms(2020, 7, 12, 16, 30, 0).unwrap());

        let tz = FixedOffset::east_opt(-3600).unwrap();
        let date_time = parse_in("%Y-%m-%d %H:%M %z", "2020-07-12 01:30 +0900", &tz, 0).unwrap();
        assert_eq!(date_time.offset(), &tz);
        assert_eq!(date_time, Utc.with_ymd_and_hms(2020, 7, 11, 16, 30, 0).unwrap());
    }

    #[test]
    fn parse_in_named_zone() {
        let date_time = parse_in(LAYOUT, "2020-07-12 01:30:00", &New_York, 1).unwrap();

        assert_eq!(date_time, Utc.with_ymd_and_hms(2020, 7, 13, 5, 30, 0).unwrap());
    }

    #[test]
    fn parse_dst_gap() {
        assert_eq!(
            parse_in(LAYOUT, "2020-03-07 02:30:00", &New_York, 1),
            Err(ParseError::OutOfRange)
        );
    }

    #[test]
    fn parse_dst_fold() {
        // 01:30 happens twice on that day; the EDT instant comes first.
        assert_eq!(
            parse_in(LAYOUT, "2020-10-31 01:30:00", &New_York, 1).unwrap(),
            Utc.with_ymd_and_hms(2020, 11, 1, 5, 30, 0).unwrap()
        );
    }

    #[test]
    fn parse_invalid() {
        assert!(matches!(
            parse_in(LAYOUT, "2020-02-30 01:00:00", &Utc, 0),
            Err(ParseError::CalendarParse(_))
        ));
        assert!(matches!(
            parse_in("%Y-%m-%d %K:%M:%S", "2020-07-12 25:00:00", &Utc, 0),
            Err(ParseError::CalendarParse(_))
        ));
    }

    #[test]
    fn consume_prefix() {
        assert_eq!(consume("%Y.%m.%d ", "2020.07.12 25:30:00"), Ok("25:30:00"));
        assert_eq!(consume(":%M:%S", ":30:00.00"), Ok(".00"));
        assert_eq!(consume("", "25:30"), Ok("25:30"));
        assert!(matches!(
            consume("%Y.%m.%d ", "2020/07/12 25:30:00"),
            Err(ParseError::CalendarParse(_))
        ));
    }

    #[test]
    fn previous_day_smoke() {
        let t = Utc.with_ymd_and_hms(2020, 3, 1, 1, 30, 0).unwrap();

        assert_eq!(
            previous_day(&t),
            Some(Utc.with_ymd_and_hms(2020, 2, 29, 1, 30, 0).unwrap())
        );
    }

    #[test]
    fn previous_day_dst_gap() {
        let t = New_York.with_ymd_and_hms(2020, 3, 9, 2, 30, 0).unwrap();

        assert_eq!(previous_day(&t), None);
    }

    #[test]
    fn render_smoke() {
        let t = Utc.with_ymd_and_hms(2020, 7, 12, 1, 30, 0).unwrap();

        assert_eq!(render(&t, LAYOUT).unwrap(), "2020-07-12 01:30:00");
        assert_eq!(render(&t, "%Y-%m-%d ").unwrap(), "2020-07-12 ");
        assert!(render(&t, "%Q").is_err());
    }
}
