//! Orthographic projection for the logical canvas.

use crate::coords::Viewport;

/// Logical canvas the projection maps onto clip space.
///
/// Fixed regardless of the physical window size: a resized window stretches
/// the canvas instead of revealing more of it.
pub const LOGICAL_CANVAS: Viewport = Viewport::new(640.0, 480.0);

/// Column-major 4×4 matrix, laid out as WGSL `mat4x4<f32>`.
pub type Mat4 = [[f32; 4]; 4];

/// Classic GL orthographic projection (`glOrtho` argument order).
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let rl = right - left;
    let tb = top - bottom;
    let fne = far - near;
    [
        [2.0 / rl, 0.0, 0.0, 0.0],
        [0.0, 2.0 / tb, 0.0, 0.0],
        [0.0, 0.0, -2.0 / fne, 0.0],
        [-(right + left) / rl, -(top + bottom) / tb, -(far + near) / fne, 1.0],
    ]
}

/// Top-left-origin projection for a logical canvas: `(0, 0)` is the upper
/// left corner, `+y` points down.
pub fn canvas_projection(canvas: Viewport) -> Mat4 {
    ortho(0.0, canvas.width, canvas.height, 0.0, -1.0, 1.0)
}

/// Applies `m` to a point, returning clip-space xyz after the w divide.
pub fn transform_point(m: &Mat4, p: [f32; 3]) -> [f32; 3] {
    let v = [p[0], p[1], p[2], 1.0];
    let mut out = [0.0f32; 4];
    for (col, &s) in m.iter().zip(v.iter()) {
        for (o, c) in out.iter_mut().zip(col.iter()) {
            *o += c * s;
        }
    }
    [out[0] / out[3], out[1] / out[3], out[2] / out[3]]
}
