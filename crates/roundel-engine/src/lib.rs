//! Roundel engine crate.
//!
//! Platform and GPU runtime for the SDF rounded-rectangle demo: window loop,
//! device setup, the quad and panel renderers, and the CPU-side SDF mirror.

pub mod coords;
pub mod core;
pub mod device;
pub mod diagnostics;
pub mod input;
pub mod logging;
pub mod render;
pub mod scene;
pub mod sdf;
pub mod time;
pub mod window;
