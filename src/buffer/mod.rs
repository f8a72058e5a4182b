//! Per-invocation buffer ownership for the pipeline driver.
//!
//! Each [`crate::Pipeline::run`] call allocates its own [`StreamState`] and
//! drops it on return; nothing is pooled or shared between runs. It is an
//! implementation detail and not part of the public API.

mod state;

pub(crate) use state::StreamState;
