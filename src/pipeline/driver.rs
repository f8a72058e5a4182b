//! The read / convert / write loop.
//!
//! Every cycle reads fresh bytes behind the carry left by the previous
//! cycle, runs the converter over the whole span until it stops making
//! progress, writes each call's output immediately and shifts whatever was
//! not consumed to the front of the buffer.
//!
//! # Example
//!
//! ```
//! use c8::{ByteSet, HexDecoder, Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(
//!     HexDecoder::new(ByteSet::whitespace()),
//!     PipelineConfig::new(7, 2)?,
//! );
//!
//! let mut out = Vec::new();
//! let stats = pipeline.run(&b"68 65\n6c6c6f"[..], &mut out)?;
//!
//! assert_eq!(out, b"hello");
//! assert_eq!(stats.bytes_written, 5);
//! # Ok::<(), c8::ConvError>(())
//! ```

use std::io::{ErrorKind, Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

use crate::buffer::StreamState;
use crate::config::PipelineConfig;
use crate::convert::{ConversionStatus, Converter};
use crate::error::ConvError;

/// Byte counts of a completed [`Pipeline::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PipelineStats {
    /// Bytes read from the input source.
    pub bytes_read: u64,
    /// Bytes written to the output sink.
    pub bytes_written: u64,
    /// Non-empty reads performed.
    pub reads: u64,
}

/// Drives a [`Converter`] over a stream with fixed-size buffers.
///
/// Memory use is bounded by the configured capacities regardless of the
/// stream length, and the output does not depend on how the source splits
/// its reads. The pipeline holds no buffers itself; each `run` allocates
/// and drops its own, so one pipeline can serve many streams.
#[derive(Debug, Clone)]
pub struct Pipeline<C> {
    converter: C,
    config: PipelineConfig,
}

impl<C: Converter> Pipeline<C> {
    /// Creates a pipeline for `converter` with the given buffer capacities.
    ///
    /// The configuration is validated when a run starts.
    pub fn new(converter: C, config: PipelineConfig) -> Self {
        Self { converter, config }
    }

    /// Creates a pipeline with [`PipelineConfig::default`].
    pub fn with_default_config(converter: C) -> Self {
        Self::new(converter, PipelineConfig::default())
    }

    /// Streams `reader` through the converter into `writer`.
    ///
    /// Reads interrupted by [`ErrorKind::Interrupted`] are retried without
    /// touching any state. Output produced before an error has already been
    /// written when the error is returned.
    ///
    /// # Errors
    ///
    /// - [`ConvError::InvalidConfig`] if the configuration is invalid
    /// - [`ConvError::Read`] / [`ConvError::Write`] on transport failures
    /// - [`ConvError::Malformed`] when the converter rejects the input
    /// - [`ConvError::Unterminated`] when bytes remain at end of stream
    /// - [`ConvError::CarryOverflow`] when the converter stalls on a full buffer
    pub fn run<R: Read, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<PipelineStats, ConvError> {
        self.config.validate()?;

        let mut state = StreamState::new(&self.config);
        let mut stats = PipelineStats::default();
        // Stream offset of the first byte in the input buffer.
        let mut base: u64 = 0;

        loop {
            let read = read_retrying(&mut reader, state.read_slot())?;
            if read == 0 {
                return self.finish(&state, &mut writer, stats);
            }

            stats.reads += 1;
            stats.bytes_read += read as u64;

            let total = state.carry_len() + read;
            let mut offset = 0;

            while offset < total {
                let (input, output) = state.window(offset..total);
                let result = self.converter.convert(input, output);
                trace!(
                    converter = self.converter.name(),
                    offset,
                    consumed = result.consumed,
                    produced = result.produced,
                    status = ?result.status,
                    "convert"
                );

                if result.produced > 0 {
                    writer
                        .write_all(&output[..result.produced])
                        .map_err(ConvError::Write)?;
                    stats.bytes_written += result.produced as u64;
                }

                if result.status == ConversionStatus::Malformed {
                    let position = offset + result.consumed.saturating_sub(1);
                    return Err(ConvError::Malformed {
                        offset: base + position as u64,
                    });
                }

                offset += result.consumed;

                if result.status == ConversionStatus::Incomplete && result.produced == 0 {
                    break;
                }
                if result.consumed == 0 && result.produced == 0 {
                    break;
                }
            }

            base += offset as u64;
            state.retain(offset, total);
            debug!(read, consumed = offset, carry = state.carry_len(), "cycle");

            if state.is_carry_full() {
                return Err(ConvError::CarryOverflow {
                    capacity: self.config.input_capacity(),
                });
            }
        }
    }

    /// Converts an in-memory buffer in one call.
    ///
    /// The driver still runs with the configured capacities, so this behaves
    /// exactly like [`Pipeline::run`] over a reader of the same bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use c8::{HexEncoder, Pipeline};
    ///
    /// let pipeline = Pipeline::with_default_config(HexEncoder);
    /// let hex = pipeline.convert_bytes(&b"hi"[..])?;
    /// assert_eq!(&hex[..], b"6869");
    /// # Ok::<(), c8::ConvError>(())
    /// ```
    pub fn convert_bytes(&self, data: impl Into<Bytes>) -> Result<Bytes, ConvError> {
        let data = data.into();
        let mut sink = BytesMut::with_capacity(data.len()).writer();
        self.run(data.reader(), &mut sink)?;
        Ok(sink.into_inner().freeze())
    }

    /// Returns the converter.
    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn finish<W: Write>(
        &self,
        state: &StreamState,
        writer: &mut W,
        stats: PipelineStats,
    ) -> Result<PipelineStats, ConvError> {
        let pending = state.carry_len();
        debug!(
            bytes_read = stats.bytes_read,
            bytes_written = stats.bytes_written,
            pending,
            "end of stream"
        );

        if pending > 0 {
            return Err(ConvError::Unterminated { pending });
        }

        writer.flush().map_err(ConvError::Write)?;
        Ok(stats)
    }
}

/// Reads into `buf`, retrying transparently on [`ErrorKind::Interrupted`].
fn read_retrying<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, ConvError> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == ErrorKind::Interrupted => trace!("read interrupted, retrying"),
            Err(e) => return Err(ConvError::Read(e)),
        }
    }
}
