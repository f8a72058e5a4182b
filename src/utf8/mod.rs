//! UTF-8 validation, decoding and encoding.
//!
//! Well-formedness follows the Unicode table of valid byte sequences:
//! overlong forms, encoded surrogates and values above U+10FFFF are all
//! rejected. Error offsets point at the first byte of the ill-formed
//! sequence.

use std::fmt;

use thiserror::Error;

/// Largest valid Unicode scalar value.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// A byte sequence that is not well-formed UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("invalid UTF-8 at byte {offset}")]
pub struct Utf8Error {
    /// Offset of the first byte of the ill-formed sequence.
    pub offset: usize,
}

/// Checks that `bytes` is well-formed UTF-8.
///
/// # Example
///
/// ```
/// use c8::utf8;
///
/// assert!(utf8::validate("añ中🦀".as_bytes()).is_ok());
/// assert_eq!(utf8::validate(b"ab\xc0\x80").unwrap_err().offset, 2);
/// ```
pub fn validate(bytes: &[u8]) -> Result<(), Utf8Error> {
    codepoints(bytes).try_for_each(|item| item.map(|_| ()))
}

/// Iterates the codepoints of `bytes` with their byte offsets.
///
/// Yields one `Err` at the first ill-formed sequence and then stops.
pub fn codepoints(bytes: &[u8]) -> Codepoints<'_> {
    Codepoints { bytes, pos: 0 }
}

/// Iterator returned by [`codepoints`].
#[derive(Clone)]
pub struct Codepoints<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl fmt::Debug for Codepoints<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codepoints")
            .field("len", &self.bytes.len())
            .field("pos", &self.pos)
            .finish()
    }
}

impl Iterator for Codepoints<'_> {
    type Item = Result<(usize, char), Utf8Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let lead = *self.bytes.get(start)?;

        match decode_at(self.bytes, start, lead) {
            Some((c, len)) => {
                self.pos += len;
                Some(Ok((start, c)))
            }
            None => {
                self.pos = self.bytes.len();
                Some(Err(Utf8Error { offset: start }))
            }
        }
    }
}

/// Decodes the sequence starting at `start`, returning the char and its length.
fn decode_at(bytes: &[u8], start: usize, lead: u8) -> Option<(char, usize)> {
    if lead < 0x80 {
        return Some((char::from(lead), 1));
    }

    // Allowed range for the second byte narrows for the leads that could
    // otherwise encode overlongs, surrogates or values past U+10FFFF.
    let (len, second, init) = match lead {
        0xC2..=0xDF => (2, 0x80..=0xBF, u32::from(lead & 0x1F)),
        0xE0 => (3, 0xA0..=0xBF, 0),
        0xE1..=0xEC | 0xEE..=0xEF => (3, 0x80..=0xBF, u32::from(lead & 0x0F)),
        0xED => (3, 0x80..=0x9F, 0x0D),
        0xF0 => (4, 0x90..=0xBF, 0),
        0xF1..=0xF3 => (4, 0x80..=0xBF, u32::from(lead & 0x07)),
        0xF4 => (4, 0x80..=0x8F, 0x04),
        _ => return None,
    };

    let tail = bytes.get(start + 1..start + len)?;
    if !second.contains(&tail[0]) {
        return None;
    }

    let mut value = init;
    for &b in tail {
        if b & 0xC0 != 0x80 {
            return None;
        }
        value = (value << 6) | u32::from(b & 0x3F);
    }

    char::from_u32(value).map(|c| (c, len))
}

/// Returns true for Unicode scalar values: at most U+10FFFF and not a surrogate.
pub const fn is_valid_codepoint(cp: u32) -> bool {
    cp <= MAX_CODEPOINT && !(cp >= 0xD800 && cp <= 0xDFFF)
}

/// Encodes `cp` into `buf`, returning the written prefix.
///
/// Returns `None` if `cp` is not a valid codepoint.
///
/// # Example
///
/// ```
/// use c8::utf8;
///
/// let mut buf = [0u8; 4];
/// assert_eq!(utf8::encode_codepoint(0x4E2D, &mut buf), Some(&[0xE4, 0xB8, 0xAD][..]));
/// assert_eq!(utf8::encode_codepoint(0xD800, &mut buf), None);
/// ```
pub fn encode_codepoint(cp: u32, buf: &mut [u8; 4]) -> Option<&[u8]> {
    let c = char::from_u32(cp)?;
    Some(c.encode_utf8(buf).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sequences() {
        assert!(validate(b"").is_ok());
        assert!(validate(b"plain ascii").is_ok());
        assert!(validate("\u{80}\u{7FF}\u{800}\u{FFFF}\u{10000}\u{10FFFF}".as_bytes()).is_ok());
    }

    #[test]
    fn test_overlong_rejected() {
        assert_eq!(validate(b"\xC0\xAF"), Err(Utf8Error { offset: 0 }));
        assert_eq!(validate(b"\xC1\xBF"), Err(Utf8Error { offset: 0 }));
        assert_eq!(validate(b"a\xE0\x80\xAF"), Err(Utf8Error { offset: 1 }));
        assert_eq!(validate(b"ab\xF0\x80\x80\xAF"), Err(Utf8Error { offset: 2 }));
    }

    #[test]
    fn test_surrogates_rejected() {
        assert_eq!(validate(b"\xED\xA0\x80"), Err(Utf8Error { offset: 0 }));
        assert_eq!(validate(b"\xED\xBF\xBF"), Err(Utf8Error { offset: 0 }));
        assert!(validate(b"\xED\x9F\xBF").is_ok());
    }

    #[test]
    fn test_above_max_rejected() {
        assert_eq!(validate(b"\xF4\x90\x80\x80"), Err(Utf8Error { offset: 0 }));
        assert_eq!(validate(b"\xF5\x80\x80\x80"), Err(Utf8Error { offset: 0 }));
        assert!(validate(b"\xF4\x8F\xBF\xBF").is_ok());
    }

    #[test]
    fn test_bad_continuation_counts() {
        // Stray continuation byte.
        assert_eq!(validate(b"a\x80"), Err(Utf8Error { offset: 1 }));
        // Truncated sequence at end of input.
        assert_eq!(validate(b"ab\xE4\xB8"), Err(Utf8Error { offset: 2 }));
        // Lead byte followed by ASCII.
        assert_eq!(validate(b"\xE4\xB8A"), Err(Utf8Error { offset: 0 }));
        assert_eq!(validate(b"\xFF"), Err(Utf8Error { offset: 0 }));
    }

    #[test]
    fn test_agrees_with_std() {
        let samples: [&[u8]; 8] = [
            b"hello",
            "中文".as_bytes(),
            b"\xC3\x28",
            b"\xE2\x82",
            b"ok\xF0\x9F\x92\x96ok",
            b"\xF0\x9F\x92",
            b"x\xED\xB2\x80",
            b"\xEF\xBF\xBD\xC2",
        ];
        for sample in samples {
            let ours = validate(sample).map_err(|e| e.offset);
            let std = std::str::from_utf8(sample).map(|_| ()).map_err(|e| e.valid_up_to());
            assert_eq!(ours, std, "sample {sample:?}");
        }
    }

    #[test]
    fn test_codepoints_with_offsets() {
        let items: Vec<_> = codepoints("aé中".as_bytes()).collect();
        assert_eq!(items, vec![Ok((0, 'a')), Ok((1, 'é')), Ok((3, '中'))]);
    }

    #[test]
    fn test_codepoints_stop_after_error() {
        let mut iter = codepoints(b"a\xFFb");
        assert_eq!(iter.next(), Some(Ok((0, 'a'))));
        assert_eq!(iter.next(), Some(Err(Utf8Error { offset: 1 })));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_is_valid_codepoint() {
        assert!(is_valid_codepoint(0));
        assert!(is_valid_codepoint(0xD7FF));
        assert!(!is_valid_codepoint(0xD800));
        assert!(!is_valid_codepoint(0xDFFF));
        assert!(is_valid_codepoint(0xE000));
        assert!(is_valid_codepoint(MAX_CODEPOINT));
        assert!(!is_valid_codepoint(MAX_CODEPOINT + 1));
    }

    #[test]
    fn test_encode_codepoint() {
        let mut buf = [0u8; 4];
        assert_eq!(encode_codepoint(0x41, &mut buf), Some(&b"A"[..]));
        assert_eq!(
            encode_codepoint(0x1F980, &mut buf),
            Some(&[0xF0, 0x9F, 0xA6, 0x80][..])
        );
        assert_eq!(encode_codepoint(0x110000, &mut buf), None);
    }
}
