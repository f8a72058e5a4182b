//! Byte converters driven by [`crate::Pipeline`].
//!
//! A [`Converter`] consumes a prefix of its input span and writes into a
//! bounded output buffer, reporting how far it got. It keeps no position
//! state between calls: bytes it could not use yet stay with the caller.
//!
//! - [`HexDecoder`] - ASCII hex pairs to bytes, skipping a [`ByteSet`]
//! - [`HexEncoder`] - bytes to lowercase hex pairs
//! - [`ConverterKind`] - the converters selectable by name
//! - [`LineWrap`] - newline-inserting sink for dump output

mod byteset;
mod hex;
mod wrap;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use byteset::ByteSet;
pub use hex::{HexDecoder, HexEncoder};
pub use wrap::LineWrap;

/// Outcome of a single [`Converter::convert`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionStatus {
    /// Progress was made and nothing is pending.
    Ok,
    /// More input is needed before further progress is possible.
    Incomplete,
    /// The input violates the converter's grammar.
    Malformed,
}

/// What a converter did with one input span.
///
/// Always `consumed <= input.len()` and `produced <= output.len()`.
/// For [`ConversionStatus::Malformed`], `consumed` includes the offending
/// byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversionResult {
    /// Status of the call.
    pub status: ConversionStatus,
    /// Input bytes processed.
    pub consumed: usize,
    /// Output bytes written.
    pub produced: usize,
}

impl ConversionResult {
    /// A successful result.
    pub const fn ok(consumed: usize, produced: usize) -> Self {
        Self {
            status: ConversionStatus::Ok,
            consumed,
            produced,
        }
    }

    /// A result that needs more input.
    pub const fn incomplete(consumed: usize, produced: usize) -> Self {
        Self {
            status: ConversionStatus::Incomplete,
            consumed,
            produced,
        }
    }

    /// A result rejecting the input.
    pub const fn malformed(consumed: usize, produced: usize) -> Self {
        Self {
            status: ConversionStatus::Malformed,
            consumed,
            produced,
        }
    }
}

/// A transformation from a prefix of input bytes to output bytes.
///
/// Implementations must be pure with respect to caller-visible state,
/// apart from writing into `output`.
pub trait Converter: fmt::Debug {
    /// Short name used in logs and for selection.
    fn name(&self) -> &'static str;

    /// Converts as much of `input` as fits into `output`.
    fn convert(&self, input: &[u8], output: &mut [u8]) -> ConversionResult;
}

impl<C: Converter + ?Sized> Converter for &C {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn convert(&self, input: &[u8], output: &mut [u8]) -> ConversionResult {
        (**self).convert(input, output)
    }
}

impl<C: Converter + ?Sized> Converter for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn convert(&self, input: &[u8], output: &mut [u8]) -> ConversionResult {
        (**self).convert(input, output)
    }
}

/// A converter name that does not match any [`ConverterKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised converter name {0:?}")]
pub struct UnknownConverter(pub String);

/// The converters selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConverterKind {
    /// `hex`: bytes to lowercase hex, no line wrapping.
    Hex,
    /// `unhex`: hex to bytes, ignoring space, tab, CR and LF.
    Unhex,
}

impl ConverterKind {
    /// Returns the selection name.
    pub const fn name(self) -> &'static str {
        match self {
            ConverterKind::Hex => "hex",
            ConverterKind::Unhex => "unhex",
        }
    }

    /// Builds the configured converter.
    pub fn build(self) -> Box<dyn Converter> {
        match self {
            ConverterKind::Hex => Box::new(HexEncoder),
            ConverterKind::Unhex => Box::new(HexDecoder::new(ByteSet::whitespace())),
        }
    }
}

impl FromStr for ConverterKind {
    type Err = UnknownConverter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hex" => Ok(ConverterKind::Hex),
            "unhex" => Ok(ConverterKind::Unhex),
            other => Err(UnknownConverter(other.to_owned())),
        }
    }
}

impl fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
