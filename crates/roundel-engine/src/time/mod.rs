//! Time subsystem.
//!
//! Provides fixed-cadence frame pacing without coupling to the runtime.
//! Intended usage:
//! - one `FramePacer` per window
//! - ask `is_due(now)` before requesting a redraw, then `advance()` once
//! - sleep until `deadline()` otherwise

mod pacer;

pub use pacer::{FramePacer, DEFAULT_FRAME_RATE};
