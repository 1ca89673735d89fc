//! GPU-side diagnostics.
//!
//! Kept out of the render path proper: renderers call into here at setup
//! time and never branch on diagnostics per frame.

mod checked;
mod shader;

pub use checked::checked;
pub use shader::{validate_wgsl, DiagnosticStage, ShaderDiagnostic};
