//! Scene state for the single SDF quad.
//!
//! `state` holds the UI-editable values; `geometry` turns them into vertices.

mod geometry;
mod state;

pub use geometry::{build_quad, Vertex, QUAD_INDICES, QUAD_VERTEX_BYTES, QUAD_VERTEX_COUNT};
pub use state::{
    Corner, CornerColors, QuadBounds, RenderState, StyleParams, BORDER_EPSILON,
};
