//! c8
//!
//! Small byte-level tools around one streaming conversion engine.
//!
//! The engine feeds an arbitrarily large, arbitrarily split byte stream
//! through a [`Converter`] using two fixed-size buffers. Bytes the converter
//! cannot use yet (half of a hex pair, say) are carried into the next read,
//! so the output never depends on where the reads happened to stop.
//!
//! Alongside it sit UTF-8 validation and terminal width computation used by
//! the `c8` command line tool.
//!
//! The crate intentionally:
//! - does NOT spawn threads
//! - does NOT keep buffers between runs
//! - does NOT persist anything
//!
//! # Streaming
//!
//! ```
//! use c8::{ByteSet, HexDecoder, HexEncoder, Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::new(16, 16)?;
//! let encode = Pipeline::new(HexEncoder, config);
//! let decode = Pipeline::new(HexDecoder::new(ByteSet::whitespace()), config);
//!
//! let hex = encode.convert_bytes(&b"any bytes at all"[..])?;
//! let back = decode.convert_bytes(hex)?;
//! assert_eq!(&back[..], b"any bytes at all");
//! # Ok::<(), c8::ConvError>(())
//! ```
//!
//! # Widths
//!
//! ```
//! use c8::WidthConfig;
//! use c8::width::{codepoint_width, str_width, CodepointWidth};
//!
//! assert_eq!(codepoint_width(0x4E2D), CodepointWidth::Columns(2));
//! assert_eq!(str_width("c8 中".as_bytes(), &WidthConfig::default()), Ok(5));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod convert;
mod error;
mod pipeline;

mod buffer; // internal (per-run buffers)

pub mod cli;
pub mod utf8;
pub mod width;

//
// Public surface (intentionally tiny)
//

pub use config::{PipelineConfig, WidthConfig};
pub use convert::{
    ByteSet, ConversionResult, ConversionStatus, Converter, ConverterKind, HexDecoder,
    HexEncoder, LineWrap, UnknownConverter,
};
pub use error::ConvError;
pub use pipeline::{Pipeline, PipelineStats};
