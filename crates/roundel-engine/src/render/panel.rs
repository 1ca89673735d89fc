use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::{ColorRgba, Rect};
use crate::diagnostics::{checked, validate_wgsl};
use crate::render::{RenderCtx, RenderTarget};

const SHADER_SRC: &str = include_str!("shaders/panel.wgsl");

/// One flat rounded rect of the debug overlay.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PanelQuad {
    pub rect: Rect,
    pub radius: f32,
    pub color: ColorRgba,
    /// `(width, color)`; width 0 disables the ring.
    pub border: Option<(f32, ColorRgba)>,
}

impl PanelQuad {
    pub fn new(rect: Rect, radius: f32, color: ColorRgba) -> Self {
        Self { rect, radius, color, border: None }
    }

    pub fn with_border(mut self, width: f32, color: ColorRgba) -> Self {
        self.border = Some((width, color));
        self
    }

    fn to_instance(self) -> PanelInstance {
        let r = self.rect.normalized();
        let (bw, bc) = self.border.unwrap_or((0.0, ColorRgba::transparent()));
        PanelInstance {
            origin: [r.origin.x, r.origin.y],
            size: [r.size.x, r.size.y],
            color: self.color.to_array(),
            border_color: bc.to_array(),
            radius_border: [self.radius.max(0.0), bw.max(0.0)],
        }
    }
}

/// Instanced renderer for debug-panel rects.
///
/// Geometry is in logical canvas pixels; the vertex shader converts to NDC
/// using the canvas size uniform.
#[derive(Default)]
pub struct PanelRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    shader_failed: bool,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl PanelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, quads: &[PanelQuad]) {
        let instances: Vec<PanelInstance> = quads
            .iter()
            .filter(|q| !q.rect.normalized().is_empty())
            .map(|q| q.to_instance())
            .collect();

        if instances.is_empty() || ctx.pixel_viewport.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);

        self.write_viewport_uniform(ctx);
        self.ensure_instance_capacity(ctx, instances.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&instances));

        let Some(pipeline)   = self.pipeline.as_ref()   else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo)   = self.quad_vbo.as_ref()   else { return };
        let Some(quad_ibo)   = self.quad_ibo.as_ref()   else { return };

        let vp = ctx.pixel_viewport;
        let mut rpass = target.load_pass("roundel panel pass");
        rpass.set_viewport(vp.x as f32, vp.y as f32, vp.width as f32, vp.height as f32, 0.0, 1.0);
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..instances.len() as u32);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.shader_failed {
            return;
        }
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        if checked("panel shader", validate_wgsl("panel", SHADER_SRC)).is_none() {
            self.shader_failed = true;
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("roundel panel shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SRC.into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("roundel panel bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ViewportUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("roundel panel pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("roundel panel pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadCorner::layout(), PanelInstance::layout()],
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

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("roundel panel viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("roundel panel bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("roundel panel quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("roundel panel quad ibo"),
            contents: bytemuck::cast_slice(&crate::scene::QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_viewport_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        let u = ViewportUniform {
            size: [ctx.canvas.width.max(1.0), ctx.canvas.height.max(1.0)],
            _pad: [0.0; 2],
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);
        let new_size = (new_cap * std::mem::size_of::<PanelInstance>()) as u64;
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("roundel panel instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadCorner {
    pos: [f32; 2], // 0..1
}

impl QuadCorner {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadCorner>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_CORNERS: [QuadCorner; 4] = [
    QuadCorner { pos: [0.0, 0.0] },
    QuadCorner { pos: [1.0, 0.0] },
    QuadCorner { pos: [1.0, 1.0] },
    QuadCorner { pos: [0.0, 1.0] },
];

/// Instance data layout (56 bytes):
///
///  offset  0  origin         [f32; 2]   loc 1
///  offset  8  size           [f32; 2]   loc 2
///  offset 16  color          [f32; 4]   loc 3
///  offset 32  border_color   [f32; 4]   loc 4
///  offset 48  radius_border  [f32; 2]   loc 5  (.x = radius, .y = border width)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct PanelInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
    border_color: [f32; 4],
    radius_border: [f32; 2],
}

impl PanelInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4, // color
        4 => Float32x4, // border_color
        5 => Float32x2  // radius_border
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PanelInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_layout_size() {
        assert_eq!(std::mem::size_of::<PanelInstance>(), 56);
    }

    #[test]
    fn instance_normalizes_rect_and_clamps_style() {
        let q = PanelQuad::new(Rect::new(10.0, 10.0, -4.0, 6.0), -2.0, ColorRgba::white())
            .with_border(1.5, ColorRgba::black());
        let i = q.to_instance();
        assert_eq!(i.origin, [6.0, 10.0]);
        assert_eq!(i.size, [4.0, 6.0]);
        assert_eq!(i.radius_border, [0.0, 1.5]);
        assert_eq!(i.border_color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn borderless_quad_has_zero_ring() {
        let i = PanelQuad::new(Rect::new(0.0, 0.0, 5.0, 5.0), 2.0, ColorRgba::red()).to_instance();
        assert_eq!(i.radius_border, [2.0, 0.0]);
        assert_eq!(i.border_color, [0.0; 4]);
    }
}
