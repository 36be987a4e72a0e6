//! Layout scanning.
//!
//! A layout is a `chrono` [strftime] format string. The hour of a 24-hour
//! clock is written `%H` as usual, while the hour of a 30-hour clock is
//! written `%K`. Both render to two characters.
//!
//! [strftime]: https://docs.rs/chrono/latest/chrono/format/strftime/index.html

use alloc::string::String;

/// The specifier of a regular, 24-hour clock hour (00-23).
pub const STANDARD_HOUR: &str = "%H";

/// The specifier of a 30-hour clock hour (06-29).
pub const EXTENDED_HOUR: &str = "%K";

/// The width of the rendered hour field for both specifiers.
pub(crate) const HOUR_WIDTH: usize = 2;

/// The kind of hour specifier found in a layout.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum HourToken {
    /// The regular `%H` hour.
    Standard,
    /// The 30-hour clock `%K` hour.
    Extended,
}

/// A layout split around its first hour specifier.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Scan<'a> {
    /// The part of the layout before the hour specifier.
    pub prefix: &'a str,
    /// The hour specifier, if any.
    pub token: Option<HourToken>,
    /// The part of the layout after the hour specifier.
    pub suffix: &'a str,
}

impl Scan<'_> {
    /// Returns the layout with its hour specifier replaced by
    /// [`STANDARD_HOUR`].
    ///
    /// If the layout has no hour specifier, this is the layout itself.
    pub fn with_standard_hour(&self) -> String {
        let mut layout = String::with_capacity(self.prefix.len() + 2 + self.suffix.len());
        layout.push_str(self.prefix);
        if self.token.is_some() {
            layout.push_str(STANDARD_HOUR);
        }
        layout.push_str(self.suffix);

        layout
    }
}

/// Finds the first `%H` or `%K` specifier of a layout.
///
/// Escaped percent signs (`%%`) are skipped, so `%%K` is literal text. Padding
/// modifiers are not recognized: `%-H` or `%_H` are left alone.
///
/// # Examples
///
/// ```
/// use thirty_hour::layout::{scan, HourToken};
///
/// let scan = scan("%Y.%m.%d %K:%M:%S");
/// assert_eq!(scan.prefix, "%Y.%m.%d ");
/// assert_eq!(scan.token, Some(HourToken::Extended));
/// assert_eq!(scan.suffix, ":%M:%S");
/// ```
pub fn scan(layout: &str) -> Scan<'_> {
    let bytes = layout.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let token = match bytes.get(i + 1) {
            Some(b'H') => HourToken::Standard,
            Some(b'K') => HourToken::Extended,
            // Any other specifier, including `%%`, is opaque.
            Some(_) => {
                i += 2;
                continue;
            }
            None => break,
        };

        // Both bytes are ASCII so the split is on char boundaries.
        return Scan {
            prefix: &layout[..i],
            token: Some(token),
            suffix: &layout[i + 2..],
        };
    }

    Scan {
        prefix: layout,
        token: None,
        suffix: "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_extended() {
        let s = scan("%Y.%m.%d %K:%M:%S");

        assert_eq!(s.prefix, "%Y.%m.%d ");
        assert_eq!(s.token, Some(HourToken::Extended));
        assert_eq!(s.suffix, ":%M:%S");
        assert_eq!(s.with_standard_hour(), "%Y.%m.%d %H:%M:%S");
    }

    #[test]
    fn scan_standard() {
        let s = scan("%H:%M");

        assert_eq!(s.prefix, "");
        assert_eq!(s.token, Some(HourToken::Standard));
        assert_eq!(s.suffix, ":%M");
        assert_eq!(s.with_standard_hour(), "%H:%M");
    }

    #[test]
    fn scan_none() {
        let s = scan("%Y.%m.%d AA:%M:%S");

        assert_eq!(s.prefix, "%Y.%m.%d AA:%M:%S");
        assert_eq!(s.token, None);
        assert_eq!(s.suffix, "");
        assert_eq!(s.with_standard_hour(), "%Y.%m.%d AA:%M:%S");
    }

    #[test]
    fn specifier_constants() {
        assert_eq!(scan(STANDARD_HOUR).token, Some(HourToken::Standard));
        assert_eq!(scan(EXTENDED_HOUR).token, Some(HourToken::Extended));
    }

    #[test]
    fn first_token_wins() {
        let s = scan("%K %H");
        assert_eq!(s.token, Some(HourToken::Extended));
        assert_eq!(s.suffix, " %H");

        let s = scan("%H %K");
        assert_eq!(s.token, Some(HourToken::Standard));
        assert_eq!(s.suffix, " %K");
    }

    #[test]
    fn escaped_percent() {
        let s = scan("100%%K");
        assert_eq!(s.token, None);

        let s = scan("%%%K");
        assert_eq!(s.prefix, "%%");
        assert_eq!(s.token, Some(HourToken::Extended));
        assert_eq!(s.suffix, "");
    }

    #[test]
    fn opaque_specifiers() {
        assert_eq!(scan("%-H:%M").token, None);
        assert_eq!(scan("%k:%M").token, None);
        assert_eq!(scan("%I:%M %p").token, None);
        assert_eq!(scan("trailing %").token, None);
        assert_eq!(scan("H K").token, None);
    }

    #[test]
    fn non_ascii_literals() {
        let s = scan("%Y年%m月%d日 %K時");

        assert_eq!(s.prefix, "%Y年%m月%d日 ");
        assert_eq!(s.token, Some(HourToken::Extended));
        assert_eq!(s.suffix, "時");
    }
}
