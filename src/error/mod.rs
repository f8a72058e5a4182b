//! Error types for c8.

use std::io;

use thiserror::Error;

/// Errors that can occur while streaming bytes through a converter.
///
/// Reads and writes are kept apart so callers can tell an input failure
/// from an output failure.
#[derive(Debug, Error)]
pub enum ConvError {
    /// Reading from the input source failed.
    #[error("input error: {0}")]
    Read(#[source] io::Error),

    /// Writing to the output sink failed.
    #[error("output error: {0}")]
    Write(#[source] io::Error),

    /// The converter rejected the byte content.
    #[error("malformed input at byte {offset}")]
    Malformed {
        /// Absolute stream offset of the offending byte.
        offset: u64,
    },

    /// The stream ended while the converter still held unconsumed bytes.
    #[error("unterminated input ({pending} trailing bytes)")]
    Unterminated {
        /// Number of bytes left in the carry at end of stream.
        pending: usize,
    },

    /// The converter could not make progress on a completely full input buffer.
    #[error("carry exceeds input buffer capacity of {capacity} bytes")]
    CarryOverflow {
        /// The input buffer capacity that was exhausted.
        capacity: usize,
    },

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl ConvError {
    /// Returns true for errors caused by the byte content rather than transport.
    pub fn is_processing(&self) -> bool {
        matches!(
            self,
            ConvError::Malformed { .. }
                | ConvError::Unterminated { .. }
                | ConvError::CarryOverflow { .. }
        )
    }
}
