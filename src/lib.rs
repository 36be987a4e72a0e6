//! Parsing and formatting of 30-hour clock date-times.
//!
//! # Overview
//!
//! Broadcast and transit schedules commonly extend a day past midnight: a
//! late-night show airing at 01:30 on July 12th is listed as starting at
//! *25:30* on July 11th. This crate parses and formats such values on top of
//! [chrono], using ordinary [strftime] layouts in which the hour of the 30-hour
//! clock is written `%K`.
//!
//! A `%K` hour covers the range 06-29. Hours 24-29 designate hours 00-05 of the
//! following calendar day; hours 00-05 are never written as such, and hours
//! from 30 upwards are invalid.
//!
//! Parsing always tries the regular `chrono` parser first and only falls back
//! to the 30-hour interpretation when this fails, so any value that `chrono`
//! understands is returned unchanged. Formatting with [`ExtTime::format`]
//! writes times between 00:00 and 05:59 as hours 24-29 of the previous day,
//! and otherwise renders like `chrono`.
//!
//! [chrono]: https://crates.io/crates/chrono
//! [strftime]: https://docs.rs/chrono/latest/chrono/format/strftime/index.html
//!
//!
//! # Design choices and limitations
//!
//! The `%K` hour is located positionally and must be exactly two characters
//! wide in the value, just like a rendered `%H`. Only the first hour specifier
//! (`%H` or `%K`) of a layout is considered.
//!
//! Formatting never reports an error caused by the 30-hour clock: whenever the
//! extended rendering does not apply, the regular rendering is produced.
//!
//!
//! # Features flags
//!
//! ### Support for `no-std`
//!
//! By default, this crate enables the `std` feature to implement
//! `std::error::Error`, but specifying `default-features = false` makes it
//! `no-std`-compatible. An allocator is always required.
//!
//! ### Serialization
//!
//! [`ExtTime`] can be (de)serialized with `serde` by activating the `serde`
//! feature. It is serialized exactly as the wrapped `chrono::DateTime`.
//!
//! ### Logging
//!
//! The `logging` feature emits [log](https://crates.io/crates/log) records
//! describing how values are interpreted.
//!
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//!
//! const LAYOUT: &str = "%Y.%m.%d %K:%M:%S";
//!
//! // 25:30 on July 11th is 01:30 on July 12th.
//! let t = thirty_hour::parse(LAYOUT, "2020.07.11 25:30:00").unwrap();
//! assert_eq!(t, Utc.with_ymd_and_hms(2020, 7, 12, 1, 30, 0).unwrap());
//!
//! // ...and the other way round.
//! assert_eq!(t.format(LAYOUT).to_string(), "2020.07.11 25:30:00");
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

#[macro_use]
mod logging;

mod calendar;
mod errors;
pub mod layout;

use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::Range;

use chrono::{DateTime, TimeZone, Utc};

pub use errors::ParseError;
use layout::{HourToken, Scan, HOUR_WIDTH};

/// The first valid hour of the 30-hour clock.
const FIRST_HOUR: u32 = 6;

/// The first hour past the end of the 30-hour clock.
const END_HOUR: u32 = 30;

const HOURS_PER_DAY: u32 = 24;

/// Parses a date-time in UTC.
///
/// The value is first parsed as a regular `chrono` date-time. If this fails
/// and the layout contains a `%K` hour, the value is parsed as a 30-hour clock
/// date-time.
///
/// A value with a UTC offset (for instance parsed with `%z`) designates the
/// corresponding instant.
///
/// # Errors
///
/// The error of the 30-hour clock parser is returned when both parsers fail.
/// It is [`ParseError::UnsupportedLayout`] if the layout has no `%K` hour.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use thirty_hour::ParseError;
///
/// const LAYOUT: &str = "%Y.%m.%d %K:%M:%S";
///
/// assert_eq!(
///     thirty_hour::parse(LAYOUT, "2020.07.12 29:59:59").unwrap(),
///     Utc.with_ymd_and_hms(2020, 7, 13, 5, 59, 59).unwrap()
/// );
/// assert_eq!(
///     thirty_hour::parse(LAYOUT, "2020.07.12 30:00:00"),
///     Err(ParseError::InvalidValue)
/// );
/// ```
pub fn parse(layout: &str, value: &str) -> Result<ExtTime<Utc>, ParseError> {
    parse_in_location(layout, value, &Utc)
}

/// Parses a date-time in the specified time zone.
///
/// This is the same as [`parse`], except that values without a UTC offset are
/// interpreted as wall-clock times in `tz`. The extra day of hours 24-29 is
/// added to the wall-clock date, so `25:30` always reads as `01:30` on the
/// next day in `tz`. If this wall-clock time is ambiguous, the earliest instant
/// is returned.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use chrono_tz::Asia::Tokyo;
///
/// let t = thirty_hour::parse_in_location("%Y.%m.%d %K:%M", "2020.07.11 25:30", &Tokyo).unwrap();
/// assert_eq!(t, Utc.with_ymd_and_hms(2020, 7, 11, 16, 30, 0).unwrap());
/// ```
pub fn parse_in_location<Tz: TimeZone>(
    layout: &str,
    value: &str,
    tz: &Tz,
) -> Result<ExtTime<Tz>, ParseError> {
    match calendar::parse_in(layout, value, tz, 0) {
        Ok(date_time) => Ok(ExtTime(date_time)),
        Err(_err) => {
            trace!("regular parsing of {value:?} with layout {layout:?} failed: {_err}");

            parse_extended(layout, value, tz).map(ExtTime)
        }
    }
}

/// Returns whether a value needs the 30-hour clock interpretation.
///
/// This returns `false` if the value is a regular `chrono` date-time, and
/// `true` if it can only be parsed as a 30-hour clock date-time. Since `%K` is
/// not a regular specifier, this is `true` for any value parsed with a layout
/// containing `%K`, even if its hour is below 24.
///
/// This performs a full parse in UTC.
///
/// # Examples
///
/// ```
/// use thirty_hour::{is_extended, ParseError};
///
/// assert_eq!(is_extended("%Y.%m.%d %H:%M", "2020.07.12 13:00"), Ok(false));
/// assert_eq!(is_extended("%Y.%m.%d %K:%M", "2020.07.12 25:00"), Ok(true));
/// assert_eq!(
///     is_extended("%Y.%m.%d %H:%M", "2020.07.12 25:00"),
///     Err(ParseError::UnsupportedLayout)
/// );
/// ```
pub fn is_extended(layout: &str, value: &str) -> Result<bool, ParseError> {
    if calendar::parse_in(layout, value, &Utc, 0).is_ok() {
        return Ok(false);
    }

    parse_extended(layout, value, &Utc).map(|_| true)
}

/// Parses a value as a 30-hour clock date-time.
fn parse_extended<Tz: TimeZone>(
    layout: &str,
    value: &str,
    tz: &Tz,
) -> Result<DateTime<Tz>, ParseError> {
    let scan = layout::scan(layout);
    if scan.token != Some(HourToken::Extended) {
        return Err(ParseError::UnsupportedLayout);
    }

    let field = locate_hour(&scan, value)?;
    let hour = parse_hour(&value[field.clone()]).ok_or(ParseError::InvalidValue)?;
    if !(FIRST_HOUR..END_HOUR).contains(&hour) {
        debug!("hour {hour} of {value:?} is outside the 30-hour clock range");

        return Err(ParseError::InvalidValue);
    }

    // Hours 24-29 are read as hours 00-05 of the next day.
    let (hour, days) = if hour >= HOURS_PER_DAY {
        (hour - HOURS_PER_DAY, 1)
    } else {
        (hour, 0)
    };
    let value = splice(value, field, hour);
    let layout = scan.with_standard_hour();
    debug!("parsing {value:?} with layout {layout:?} and {days} day(s) offset");

    calendar::parse_in(&layout, &value, tz, days)
}

/// Returns the byte range of the hour field of a value.
///
/// The layout prefix and suffix must match the text around the field exactly.
fn locate_hour(scan: &Scan<'_>, value: &str) -> Result<Range<usize>, ParseError> {
    let start = value.len() - calendar::consume(scan.prefix, value)?.len();
    let end = start + HOUR_WIDTH;
    if end > value.len() {
        return Err(ParseError::LengthMismatch);
    }
    // A multi-byte character overlapping the field cannot be a digit.
    if !value.is_char_boundary(end) {
        return Err(ParseError::InvalidValue);
    }
    if !calendar::consume(scan.suffix, &value[end..])?.is_empty() {
        return Err(ParseError::LengthMismatch);
    }

    Ok(start..end)
}

/// Parses a hour field made of decimal digits only.
fn parse_hour(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    field.parse().ok()
}

/// Replaces a range of text with a zero-padded, two-digit hour.
///
/// The padding keeps the hour from swallowing a digit of an adjacent field.
fn splice(text: &str, field: Range<usize>, hour: u32) -> String {
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..field.start]);
    out.push_str(&alloc::format!("{hour:02}"));
    out.push_str(&text[field.end..]);

    out
}

/// A `chrono` date-time which can be formatted with a 30-hour clock.
///
/// This is a transparent wrapper: comparisons, hashing and the [`Display`]
/// implementation are those of the wrapped `DateTime`.
///
/// [`Display`]: fmt::Display
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use thirty_hour::ExtTime;
///
/// let t = ExtTime::new(Utc.with_ymd_and_hms(2020, 8, 1, 2, 0, 0).unwrap());
///
/// assert_eq!(t.format("%Y.%m.%d %K:%M").to_string(), "2020.07.31 26:00");
/// assert_eq!(t.format("%Y.%m.%d %H:%M").to_string(), "2020.08.01 02:00");
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        transparent,
        bound(
            serialize = "DateTime<Tz>: serde::Serialize",
            deserialize = "DateTime<Tz>: serde::Deserialize<'de>"
        )
    )
)]
pub struct ExtTime<Tz: TimeZone>(DateTime<Tz>);

impl<Tz: TimeZone> ExtTime<Tz> {
    /// Wraps a date-time.
    pub fn new(date_time: DateTime<Tz>) -> Self {
        Self(date_time)
    }

    /// Returns a reference to the wrapped date-time.
    pub fn as_date_time(&self) -> &DateTime<Tz> {
        &self.0
    }

    /// Returns the wrapped date-time.
    pub fn into_date_time(self) -> DateTime<Tz> {
        self.0
    }

    /// Returns the same instant expressed in another time zone.
    pub fn with_timezone<Tz2: TimeZone>(&self, tz: &Tz2) -> ExtTime<Tz2> {
        ExtTime(self.0.with_timezone(tz))
    }

    /// Formats the date-time with the specified layout.
    ///
    /// If the layout contains a `%K` hour and the wall-clock time is between
    /// 00:00 and 05:59, the date-time is written as hours 24-29 of the previous
    /// day. In all other cases this renders exactly like
    /// `chrono::DateTime::format`, with `%K` standing for `%H`.
    ///
    /// As with `chrono`, the returned value reports a formatting error if the
    /// layout contains an invalid specifier, which makes `to_string` panic.
    pub fn format<'a>(&'a self, layout: &'a str) -> ExtFormat<'a, Tz>
    where
        Tz::Offset: fmt::Display,
    {
        ExtFormat {
            date_time: &self.0,
            layout,
        }
    }
}

impl<Tz: TimeZone> Copy for ExtTime<Tz> where Tz::Offset: Copy {}

impl<Tz: TimeZone> From<DateTime<Tz>> for ExtTime<Tz> {
    fn from(date_time: DateTime<Tz>) -> Self {
        Self(date_time)
    }
}

impl<Tz: TimeZone> From<ExtTime<Tz>> for DateTime<Tz> {
    fn from(time: ExtTime<Tz>) -> Self {
        time.0
    }
}

impl<Tz: TimeZone, Tz2: TimeZone> PartialEq<ExtTime<Tz2>> for ExtTime<Tz> {
    fn eq(&self, other: &ExtTime<Tz2>) -> bool {
        self.0 == other.0
    }
}

impl<Tz: TimeZone, Tz2: TimeZone> PartialEq<DateTime<Tz2>> for ExtTime<Tz> {
    fn eq(&self, other: &DateTime<Tz2>) -> bool {
        self.0 == *other
    }
}

impl<Tz: TimeZone> Eq for ExtTime<Tz> {}

impl<Tz: TimeZone> PartialOrd for ExtTime<Tz> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Tz: TimeZone> Ord for ExtTime<Tz> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<Tz: TimeZone> Hash for ExtTime<Tz> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<Tz: TimeZone> fmt::Debug for ExtTime<Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExtTime").field(&self.0).finish()
    }
}

impl<Tz: TimeZone> fmt::Display for ExtTime<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A date-time formatted with a layout, returned by [`ExtTime::format`].
#[derive(Clone, Debug)]
pub struct ExtFormat<'a, Tz: TimeZone> {
    date_time: &'a DateTime<Tz>,
    layout: &'a str,
}

impl<Tz: TimeZone> fmt::Display for ExtFormat<'_, Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scan = layout::scan(self.layout);
        let text = match scan.token {
            Some(HourToken::Extended) => format_extended(self.date_time, &scan)?,
            _ => calendar::render(self.date_time, self.layout)?,
        };

        f.pad(&text)
    }
}

/// Formats a date-time with a layout containing a `%K` hour.
fn format_extended<Tz: TimeZone>(
    date_time: &DateTime<Tz>,
    scan: &Scan<'_>,
) -> Result<String, fmt::Error>
where
    Tz::Offset: fmt::Display,
{
    let layout = scan.with_standard_hour();
    let origin = calendar::render(date_time, &layout)?;

    let previous = match calendar::previous_day(date_time) {
        Some(previous) => previous,
        None => return Ok(origin),
    };
    let shifted = calendar::render(&previous, &layout)?;

    // The hour field of the previous day sits right after the rendered prefix.
    let start = calendar::render(&previous, scan.prefix)?.len();
    let end = start + HOUR_WIDTH;
    if end + calendar::render(&previous, scan.suffix)?.len() != shifted.len() {
        return Ok(origin);
    }
    let hour = match shifted.get(start..end).and_then(parse_hour) {
        Some(hour) => hour,
        None => return Ok(origin),
    };
    if hour >= FIRST_HOUR {
        return Ok(origin);
    }

    Ok(splice(&shifted, start..end, hour + HOURS_PER_DAY))
}
