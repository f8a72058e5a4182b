//! Streaming driver feeding a byte stream through a converter.
//!
//! - [`Pipeline`] - Bounded-memory read / convert / write loop
//! - [`PipelineStats`] - Byte counts of a completed run

mod driver;

pub use driver::{Pipeline, PipelineStats};
