//! Error types.

use core::fmt;

/// The error type returned when a value cannot be parsed with a layout, either
/// as a regular 24-hour date-time or as a 30-hour date-time.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParseError {
    /// The calendar parser rejected the value.
    ///
    /// This is the error reported by `chrono` when a field other than the
    /// 30-hour hour is malformed, when the date is invalid or, for values
    /// using the regular `%H` hour, whenever the value does not match the
    /// layout.
    CalendarParse(chrono::ParseError),
    /// The value is not a regular date-time and the layout has no `%K`
    /// extended hour from which it could be interpreted as a 30-hour
    /// date-time.
    UnsupportedLayout,
    /// The value is wider or narrower than the layout, so the hour field
    /// cannot be located.
    LengthMismatch,
    /// The hour field is not a number, or is not between 6 and 29.
    InvalidValue,
    /// The parsed wall-clock time does not exist in the target time zone, or
    /// shifting it to the next day leaves the representable range.
    OutOfRange,
}

impl fmt::Display for ParseError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CalendarParse(err) => err.fmt(fmt),
            Self::UnsupportedLayout => "layout has no 30-hour clock field".fmt(fmt),
            Self::LengthMismatch => "value width does not match the layout".fmt(fmt),
            Self::InvalidValue => "bad value for 30-hour clock field".fmt(fmt),
            Self::OutOfRange => "date-time does not exist or is out of range".fmt(fmt),
        }
    }
}

impl From<chrono::ParseError> for ParseError {
    fn from(err: chrono::ParseError) -> Self {
        Self::CalendarParse(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CalendarParse(err) => Some(err),
            _ => None,
        }
    }
}
