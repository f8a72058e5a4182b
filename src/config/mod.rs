//! Configuration for streaming and width computation.
//!
//! - [`PipelineConfig`] - Input and output buffer capacities for the driver
//! - [`WidthConfig`] - Column bound for string width computation
//!
//! # Example
//!
//! ```
//! use c8::{PipelineConfig, WidthConfig};
//!
//! let config = PipelineConfig::new(512, 1024)?;
//! assert_eq!(config.input_capacity(), 512);
//!
//! let width = WidthConfig::default().with_max_width(80);
//! assert_eq!(width.max_width(), 80);
//! # Ok::<(), c8::ConvError>(())
//! ```

use crate::error::ConvError;

/// Default input buffer capacity (2 KiB).
pub const DEFAULT_INPUT_CAPACITY: usize = 0x800;

/// Default output buffer capacity (2 KiB).
pub const DEFAULT_OUTPUT_CAPACITY: usize = 0x800;

/// Smallest usable buffer capacity.
///
/// The input buffer must hold a one byte carry plus at least one fresh
/// byte, and the output buffer must fit one encoded hex pair.
pub const MIN_CAPACITY: usize = 2;

/// Buffer capacities for one [`crate::Pipeline`] invocation.
///
/// Memory held by a running pipeline is bounded by
/// `input_capacity + output_capacity`, whatever the size of the stream.
///
/// # Example
///
/// ```
/// use c8::PipelineConfig;
///
/// let config = PipelineConfig::default()
///     .with_input_capacity(64)
///     .with_output_capacity(16);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineConfig {
    input_capacity: usize,
    output_capacity: usize,
}

impl PipelineConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConvError::InvalidConfig`] if either capacity is below
    /// [`MIN_CAPACITY`].
    pub fn new(input_capacity: usize, output_capacity: usize) -> Result<Self, ConvError> {
        if input_capacity == 0 || output_capacity == 0 {
            return Err(ConvError::InvalidConfig {
                message: "buffer capacities must be non-zero",
            });
        }

        if input_capacity < MIN_CAPACITY {
            return Err(ConvError::InvalidConfig {
                message: "input_capacity must leave room for a carried byte",
            });
        }

        if output_capacity < MIN_CAPACITY {
            return Err(ConvError::InvalidConfig {
                message: "output_capacity must fit at least one hex pair",
            });
        }

        Ok(Self {
            input_capacity,
            output_capacity,
        })
    }

    /// Sets the input buffer capacity.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PipelineConfig::validate`] to check it.
    pub fn with_input_capacity(mut self, capacity: usize) -> Self {
        self.input_capacity = capacity;
        self
    }

    /// Sets the output buffer capacity.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PipelineConfig::validate`] to check it.
    pub fn with_output_capacity(mut self, capacity: usize) -> Self {
        self.output_capacity = capacity;
        self
    }

    /// Returns the input buffer capacity.
    pub fn input_capacity(&self) -> usize {
        self.input_capacity
    }

    /// Returns the output buffer capacity.
    pub fn output_capacity(&self) -> usize {
        self.output_capacity
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), ConvError> {
        Self::new(self.input_capacity, self.output_capacity).map(|_| ())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_capacity: DEFAULT_INPUT_CAPACITY,
            output_capacity: DEFAULT_OUTPUT_CAPACITY,
        }
    }
}

/// Column bound used by [`crate::width::str_width`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidthConfig {
    max_width: usize,
}

impl WidthConfig {
    /// Creates a width configuration with the given maximum column count.
    pub const fn new(max_width: usize) -> Self {
        Self { max_width }
    }

    /// Sets the maximum column count.
    pub const fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Returns the maximum column count.
    pub const fn max_width(&self) -> usize {
        self.max_width
    }
}

impl Default for WidthConfig {
    fn default() -> Self {
        Self {
            max_width: i32::MAX as usize,
        }
    }
}
