//! Input buffer with a carried prefix, plus an output buffer.

use std::ops::Range;

use crate::config::PipelineConfig;

/// Buffers owned by a single pipeline run.
///
/// The input buffer holds `carry_len` unconsumed bytes at its front,
/// followed by whatever the last read delivered.
#[derive(Debug)]
pub(crate) struct StreamState {
    input: Vec<u8>,
    output: Vec<u8>,
    carry_len: usize,
}

impl StreamState {
    /// Allocates buffers with the configured capacities.
    pub(crate) fn new(config: &PipelineConfig) -> Self {
        Self {
            input: vec![0; config.input_capacity()],
            output: vec![0; config.output_capacity()],
            carry_len: 0,
        }
    }

    /// Length of the carried prefix.
    pub(crate) fn carry_len(&self) -> usize {
        self.carry_len
    }

    /// Returns true if the carry fills the whole input buffer.
    pub(crate) fn is_carry_full(&self) -> bool {
        self.carry_len == self.input.len()
    }

    /// The free region right after the carry, where the next read lands.
    pub(crate) fn read_slot(&mut self) -> &mut [u8] {
        &mut self.input[self.carry_len..]
    }

    /// Borrows `range` of the input alongside the whole output buffer.
    pub(crate) fn window(&mut self, range: Range<usize>) -> (&[u8], &mut [u8]) {
        (&self.input[range], &mut self.output)
    }

    /// Moves `input[offset..total]` to the front and makes it the new carry.
    pub(crate) fn retain(&mut self, offset: usize, total: usize) {
        debug_assert!(offset <= total && total <= self.input.len());
        self.input.copy_within(offset..total, 0);
        self.carry_len = total - offset;
    }
}
