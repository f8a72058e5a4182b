//! Hex codec converters.

use super::{ByteSet, ConversionResult, Converter};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Converts a single ASCII hex digit to its 4-bit value.
#[inline]
fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Decodes pairs of ASCII hex digits (either case) into bytes.
///
/// Bytes in the ignore set are consumed without output, but only between
/// pairs: the two digits of a pair must be adjacent. A lone digit at the
/// end of the input is left unconsumed with an `Incomplete` status so the
/// driver can carry it into the next read.
///
/// # Example
///
/// ```
/// use c8::{ByteSet, ConversionResult, Converter, HexDecoder};
///
/// let decoder = HexDecoder::new(ByteSet::whitespace());
/// let mut out = [0u8; 8];
///
/// let result = decoder.convert(b"41 42\n4", &mut out);
/// assert_eq!(result, ConversionResult::incomplete(6, 2));
/// assert_eq!(&out[..2], b"AB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HexDecoder {
    ignore: ByteSet,
}

impl HexDecoder {
    /// Creates a decoder skipping the bytes in `ignore`.
    pub const fn new(ignore: ByteSet) -> Self {
        Self { ignore }
    }

    /// Returns the set of skipped bytes.
    pub const fn ignore(&self) -> &ByteSet {
        &self.ignore
    }
}

impl Converter for HexDecoder {
    fn name(&self) -> &'static str {
        "unhex"
    }

    fn convert(&self, input: &[u8], output: &mut [u8]) -> ConversionResult {
        let mut consumed = 0;
        let mut produced = 0;

        while consumed < input.len() {
            let c = input[consumed];
            if self.ignore.contains(c) {
                consumed += 1;
                continue;
            }

            let Some(high) = hex_value(c) else {
                return ConversionResult::malformed(consumed + 1, produced);
            };

            if produced == output.len() {
                return ConversionResult::ok(consumed, produced);
            }

            let Some(&next) = input.get(consumed + 1) else {
                return ConversionResult::incomplete(consumed, produced);
            };

            let Some(low) = hex_value(next) else {
                return ConversionResult::malformed(consumed + 2, produced);
            };

            output[produced] = (high << 4) | low;
            produced += 1;
            consumed += 2;
        }

        ConversionResult::ok(consumed, produced)
    }
}

/// Encodes bytes as lowercase hex, two output bytes per input byte.
///
/// Never fails and never needs more input; only the output capacity
/// limits how much is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HexEncoder;

impl Converter for HexEncoder {
    fn name(&self) -> &'static str {
        "hex"
    }

    fn convert(&self, input: &[u8], output: &mut [u8]) -> ConversionResult {
        let n = input.len().min(output.len() / 2);

        for (pair, &byte) in output.chunks_exact_mut(2).zip(&input[..n]) {
            pair[0] = HEX_DIGITS[(byte >> 4) as usize];
            pair[1] = HEX_DIGITS[(byte & 0x0f) as usize];
        }

        ConversionResult::ok(n, n * 2)
    }
}
