use bytemuck::{Pod, Zeroable};

use super::state::{Corner, CornerColors, QuadBounds};

/// Quad vertex as consumed by the SDF shader.
///
/// Layout (36 bytes):
///
///  offset  0  position   [f32; 3]   loc 0
///  offset 12  color      [f32; 4]   loc 1
///  offset 28  tex_coord  [f32; 2]   loc 2
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4, // color
        2 => Float32x2  // tex_coord
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Two triangles sharing the 0–2 diagonal.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

pub const QUAD_VERTEX_COUNT: usize = 4;

/// Byte size of the dynamic vertex buffer; fixed for the program lifetime.
pub const QUAD_VERTEX_BYTES: u64 = (QUAD_VERTEX_COUNT * std::mem::size_of::<Vertex>()) as u64;

/// Texture coordinates per corner. V is flipped: the upper edge is `v = 1`.
const TEX_COORDS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

/// Builds the four quad vertices from the current bounds and corner colors.
///
/// Pure: the same inputs always produce the same array.
pub fn build_quad(bounds: QuadBounds, colors: &CornerColors) -> [Vertex; QUAD_VERTEX_COUNT] {
    let QuadBounds { left, top, right, bottom } = bounds;
    let positions = [
        [left, top, 0.0],
        [right, top, 0.0],
        [right, bottom, 0.0],
        [left, bottom, 0.0],
    ];

    Corner::ALL.map(|corner| {
        let i = corner.index();
        Vertex {
            position: positions[i],
            color: colors.get(corner).to_array(),
            tex_coord: TEX_COORDS[i],
        }
    })
}
