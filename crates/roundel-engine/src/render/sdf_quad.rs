use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::diagnostics::{checked, validate_wgsl};
use crate::render::projection::{canvas_projection, Mat4};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{build_quad, RenderState, Vertex, QUAD_INDICES, QUAD_VERTEX_BYTES};

const SHADER_SRC: &str = include_str!("shaders/sdf_quad.wgsl");

/// Uniform block layout (96 bytes):
///
///  offset  0  mvp               mat4x4<f32>
///  offset 64  rect_size         vec2<f32>
///  offset 72  radius            f32
///  offset 76  border_thickness  f32
///  offset 80  border_color      vec4<f32>
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SdfUniforms {
    pub mvp: Mat4,
    pub rect_size: [f32; 2],
    pub radius: f32,
    pub border_thickness: f32,
    pub border_color: [f32; 4],
}

impl SdfUniforms {
    /// Uniform values for this frame. The projection is rebuilt every call.
    pub fn from_state(state: &RenderState, canvas: Viewport) -> Self {
        let size = state.bounds.size();
        let style = state.style.sanitized();
        Self {
            mvp: canvas_projection(canvas),
            rect_size: [size.x, size.y],
            radius: style.radius,
            border_thickness: style.border_thickness,
            border_color: style.border_color.to_array(),
        }
    }
}

/// GPU objects owned by the SDF quad for the lifetime of the window.
///
/// Index buffer and pipeline are immutable once created; the vertex and
/// uniform buffers keep their size and are rewritten every frame.
pub struct GpuHandles {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
}

/// Renders the single SDF rounded rectangle.
///
/// Two-phase lifecycle: [`initialize`](Self::initialize) once, then
/// [`draw`](Self::draw) every frame. If the shader fails validation the
/// renderer stays alive but draws nothing. `Default` is that same empty
/// renderer, used as a placeholder until a device exists.
#[derive(Default)]
pub struct SdfQuadRenderer {
    handles: Option<GpuHandles>,
}

impl SdfQuadRenderer {
    pub fn initialize(ctx: &RenderCtx<'_>) -> Self {
        let handles = checked("sdf quad shader", validate_wgsl("sdf_quad", SHADER_SRC))
            .map(|()| create_handles(ctx));

        match &handles {
            Some(_) => log::debug!("sdf quad renderer initialized ({:?})", ctx.surface_format),
            None => log::error!("sdf quad renderer has no pipeline; the quad will not be drawn"),
        }

        Self { handles }
    }

    /// True when the pipeline was created.
    pub fn is_ready(&self) -> bool {
        self.handles.is_some()
    }

    pub fn draw(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, state: &RenderState) {
        let Some(h) = self.handles.as_ref() else { return };
        let vp = ctx.pixel_viewport;
        if vp.is_empty() || !state.bounds.is_drawable() {
            return;
        }

        let uniforms = SdfUniforms::from_state(state, ctx.canvas);
        ctx.queue.write_buffer(&h.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let vertices = build_quad(state.bounds, &state.colors);
        ctx.queue.write_buffer(&h.vertex_buffer, 0, bytemuck::cast_slice(&vertices));

        let mut rpass = target.load_pass("roundel sdf quad pass");
        rpass.set_viewport(
            vp.x as f32,
            vp.y as f32,
            vp.width as f32,
            vp.height as f32,
            0.0,
            1.0,
        );
        rpass.set_pipeline(&h.pipeline);
        rpass.set_bind_group(0, &h.bind_group, &[]);
        rpass.set_vertex_buffer(0, h.vertex_buffer.slice(..));
        rpass.set_index_buffer(h.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }
}

fn create_handles(ctx: &RenderCtx<'_>) -> GpuHandles {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("roundel sdf quad shader"),
        source: wgpu::ShaderSource::Wgsl(SHADER_SRC.into()),
    });

    let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("roundel sdf quad bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(
                    std::mem::size_of::<SdfUniforms>() as u64,
                ),
            },
            count: None,
        }],
    });

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("roundel sdf quad pipeline layout"),
        bind_group_layouts: &[&bind_group_layout],
        immediate_size: 0,
    });

    let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("roundel sdf quad pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("roundel sdf quad ubo"),
        size: std::mem::size_of::<SdfUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("roundel sdf quad bind group"),
        layout: &bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    let vertex_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("roundel sdf quad vbo"),
        size: QUAD_VERTEX_BYTES,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let index_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("roundel sdf quad ibo"),
        contents: bytemuck::cast_slice(&QUAD_INDICES),
        usage: wgpu::BufferUsages::INDEX,
    });

    GpuHandles {
        pipeline,
        bind_group,
        uniform_buffer,
        vertex_buffer,
        index_buffer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::ColorRgba;
    use crate::render::projection::LOGICAL_CANVAS;
    use crate::scene::{CornerColors, QuadBounds, StyleParams};

    #[test]
    fn uniform_block_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<SdfUniforms>(), 96);
        assert_eq!(std::mem::offset_of!(SdfUniforms, rect_size), 64);
        assert_eq!(std::mem::offset_of!(SdfUniforms, radius), 72);
        assert_eq!(std::mem::offset_of!(SdfUniforms, border_thickness), 76);
        assert_eq!(std::mem::offset_of!(SdfUniforms, border_color), 80);
    }

    #[test]
    fn uniforms_track_state() {
        let state = RenderState {
            bounds: QuadBounds::new(20.0, 40.0, 220.0, 140.0),
            colors: CornerColors::uniform(ColorRgba::white()),
            style: StyleParams { radius: 12.0, border_thickness: 4.0, border_color: ColorRgba::yellow() },
        };
        let u = SdfUniforms::from_state(&state, LOGICAL_CANVAS);
        assert_eq!(u.rect_size, [200.0, 100.0]);
        assert_eq!(u.radius, 12.0);
        assert_eq!(u.border_thickness, 4.0);
        assert_eq!(u.border_color, [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(u.mvp, canvas_projection(LOGICAL_CANVAS));
    }

    #[test]
    fn negative_style_values_are_clamped_before_upload() {
        let mut state = RenderState::default();
        state.style.radius = -5.0;
        state.style.border_thickness = -2.0;
        let u = SdfUniforms::from_state(&state, LOGICAL_CANVAS);
        assert_eq!(u.radius, 0.0);
        assert_eq!(u.border_thickness, 0.0);
    }
}
