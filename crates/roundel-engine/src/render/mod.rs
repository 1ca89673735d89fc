//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers) and records one
//! render pass into the frame's encoder.
//!
//! Convention:
//! - CPU geometry is in logical canvas pixels (top-left origin, +Y down).
//! - The SDF quad goes through an orthographic `mvp`; the panel converts to
//!   NDC with a viewport uniform.

mod ctx;
pub mod panel;
pub mod projection;
pub mod sdf_quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use panel::{PanelQuad, PanelRenderer};
pub use sdf_quad::{GpuHandles, SdfQuadRenderer, SdfUniforms};
