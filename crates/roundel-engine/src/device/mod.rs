//! GPU device + surface management.
//!
//! Creates the wgpu instance/adapter/device/queue, configures the window
//! surface, and hands out per-frame encoders.

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
