//! Terminal column widths of codepoints and strings.
//!
//! Per-character widths come from [`unicode_width`]; characters that cannot
//! be placed on a terminal (controls, unassigned codepoints) are reported as
//! non-printable instead of being given a width.

use thiserror::Error;
use unicode_general_category::{GeneralCategory, get_general_category};
use unicode_width::UnicodeWidthChar;

use crate::config::WidthConfig;
use crate::utf8::{self, Utf8Error};

/// Width of a single codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodepointWidth {
    /// Occupies 0, 1 or 2 columns.
    Columns(u8),
    /// Control, unassigned or otherwise not renderable.
    NonPrintable,
}

impl CodepointWidth {
    /// Sentinel used when printing a non-printable width.
    pub const NON_PRINTABLE: i32 = -1;

    /// Returns the column count, or [`Self::NON_PRINTABLE`].
    pub fn as_i32(self) -> i32 {
        match self {
            CodepointWidth::Columns(n) => i32::from(n),
            CodepointWidth::NonPrintable => Self::NON_PRINTABLE,
        }
    }
}

/// Why a string has no width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum WidthError {
    /// The bytes are not well-formed UTF-8.
    #[error(transparent)]
    InvalidUtf8(#[from] Utf8Error),

    /// The string contains a codepoint that cannot be rendered.
    #[error("non-printable codepoint {codepoint:?} at byte {offset}")]
    NonPrintable {
        /// Byte offset of the codepoint.
        offset: usize,
        /// The offending codepoint.
        codepoint: char,
    },

    /// The summed width exceeds the configured maximum.
    #[error("width too large (max {max})")]
    TooWide {
        /// The configured maximum.
        max: usize,
    },
}

/// Returns true for the 66 Unicode noncharacters.
fn is_noncharacter(cp: u32) -> bool {
    (0xFDD0..=0xFDEF).contains(&cp) || cp & 0xFFFE == 0xFFFE
}

/// Width of a single `char`.
///
/// # Example
///
/// ```
/// use c8::width::{char_width, CodepointWidth};
///
/// assert_eq!(char_width('A'), CodepointWidth::Columns(1));
/// assert_eq!(char_width('中'), CodepointWidth::Columns(2));
/// assert_eq!(char_width('\u{1}'), CodepointWidth::NonPrintable);
/// ```
pub fn char_width(c: char) -> CodepointWidth {
    if c.is_control() || is_noncharacter(u32::from(c)) {
        return CodepointWidth::NonPrintable;
    }
    if get_general_category(c) == GeneralCategory::Unassigned {
        return CodepointWidth::NonPrintable;
    }
    match c.width() {
        Some(n @ 0..=2) => CodepointWidth::Columns(n as u8),
        _ => CodepointWidth::NonPrintable,
    }
}

/// Width of a codepoint given as an integer.
///
/// Surrogates and values above U+10FFFF are non-printable.
pub fn codepoint_width(cp: u32) -> CodepointWidth {
    char::from_u32(cp).map_or(CodepointWidth::NonPrintable, char_width)
}

/// Total terminal width of a UTF-8 byte string.
///
/// Codepoints are processed in order and the first problem ends the
/// computation: a non-printable codepoint is reported as soon as it is
/// reached, and the sum is checked against `config` after every codepoint.
///
/// # Errors
///
/// - [`WidthError::InvalidUtf8`] on ill-formed input
/// - [`WidthError::NonPrintable`] on an unrenderable codepoint
/// - [`WidthError::TooWide`] when the sum would exceed the maximum
///
/// # Example
///
/// ```
/// use c8::WidthConfig;
/// use c8::width::{str_width, WidthError};
///
/// let config = WidthConfig::default();
/// assert_eq!(str_width("ab中".as_bytes(), &config), Ok(4));
/// assert_eq!(
///     str_width(b"abc", &WidthConfig::new(2)),
///     Err(WidthError::TooWide { max: 2 })
/// );
/// ```
pub fn str_width(bytes: &[u8], config: &WidthConfig) -> Result<usize, WidthError> {
    let max = config.max_width();
    let mut total: usize = 0;

    for item in utf8::codepoints(bytes) {
        let (offset, c) = item?;
        let columns = match char_width(c) {
            CodepointWidth::Columns(n) => usize::from(n),
            CodepointWidth::NonPrintable => {
                return Err(WidthError::NonPrintable {
                    offset,
                    codepoint: c,
                });
            }
        };

        total = match total.checked_add(columns) {
            Some(sum) if sum <= max => sum,
            _ => return Err(WidthError::TooWide { max }),
        };
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codepoint_widths() {
        assert_eq!(codepoint_width(0x41), CodepointWidth::Columns(1));
        assert_eq!(codepoint_width(0x4E2D), CodepointWidth::Columns(2));
        assert_eq!(codepoint_width(0xFF21), CodepointWidth::Columns(2));
        assert_eq!(codepoint_width(0x0301), CodepointWidth::Columns(0));
    }

    #[test]
    fn test_non_printable() {
        assert_eq!(codepoint_width(0x01), CodepointWidth::NonPrintable);
        assert_eq!(codepoint_width(0x00), CodepointWidth::NonPrintable);
        assert_eq!(codepoint_width(0x7F), CodepointWidth::NonPrintable);
        assert_eq!(codepoint_width(0x9B), CodepointWidth::NonPrintable);
        assert_eq!(codepoint_width(0xFFFE), CodepointWidth::NonPrintable);
        assert_eq!(codepoint_width(0x10FFFF), CodepointWidth::NonPrintable);
        assert_eq!(codepoint_width(0xFDD0), CodepointWidth::NonPrintable);
        assert_eq!(codepoint_width(0xD800), CodepointWidth::NonPrintable);
        assert_eq!(codepoint_width(0x110000), CodepointWidth::NonPrintable);
    }

    #[test]
    fn test_unassigned_is_non_printable() {
        // Gaps in the Greek and Tags blocks, and a plane with nothing assigned.
        assert_eq!(codepoint_width(0x0378), CodepointWidth::NonPrintable);
        assert_eq!(codepoint_width(0xE0080), CodepointWidth::NonPrintable);
        assert_eq!(codepoint_width(0x40000), CodepointWidth::NonPrintable);

        // Private use is assigned.
        assert_eq!(codepoint_width(0xE000), CodepointWidth::Columns(1));
    }

    #[test]
    fn test_str_width_rejects_unassigned() {
        let err = str_width("a\u{378}".as_bytes(), &WidthConfig::default()).unwrap_err();
        assert_eq!(
            err,
            WidthError::NonPrintable {
                offset: 1,
                codepoint: '\u{378}'
            }
        );
    }

    #[test]
    fn test_as_i32() {
        assert_eq!(CodepointWidth::Columns(2).as_i32(), 2);
        assert_eq!(CodepointWidth::NonPrintable.as_i32(), -1);
    }

    #[test]
    fn test_str_width() {
        let config = WidthConfig::default();
        assert_eq!(str_width(b"", &config), Ok(0));
        assert_eq!(str_width(b"hello", &config), Ok(5));
        assert_eq!(str_width("e\u{301}".as_bytes(), &config), Ok(1));
        assert_eq!(str_width("中文".as_bytes(), &config), Ok(4));
    }

    #[test]
    fn test_str_width_non_printable() {
        let err = str_width(b"ab\x01cd", &WidthConfig::default()).unwrap_err();
        assert_eq!(
            err,
            WidthError::NonPrintable {
                offset: 2,
                codepoint: '\u{1}'
            }
        );
    }

    #[test]
    fn test_str_width_overflow() {
        let config = WidthConfig::new(3);
        assert_eq!(str_width(b"abc", &config), Ok(3));
        assert_eq!(
            str_width("ab中".as_bytes(), &config),
            Err(WidthError::TooWide { max: 3 })
        );
    }

    #[test]
    fn test_non_printable_short_circuits_before_overflow() {
        let config = WidthConfig::new(3);
        let err = str_width(b"a\x07bcdef", &config).unwrap_err();
        assert!(matches!(err, WidthError::NonPrintable { offset: 1, .. }));

        let err = str_width(b"abcd\x07", &config).unwrap_err();
        assert_eq!(err, WidthError::TooWide { max: 3 });
    }

    #[test]
    fn test_str_width_invalid_utf8() {
        let err = str_width(b"ab\xC0\x80", &WidthConfig::default()).unwrap_err();
        assert_eq!(err, WidthError::InvalidUtf8(Utf8Error { offset: 2 }));
    }

    #[test]
    fn test_error_display() {
        let err = WidthError::NonPrintable {
            offset: 0,
            codepoint: '\u{7}',
        };
        assert_eq!(err.to_string(), r"non-printable codepoint '\u{7}' at byte 0");
    }
}
