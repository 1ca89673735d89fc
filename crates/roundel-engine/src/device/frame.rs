/// A single acquired surface frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next
/// one. `Gpu::submit` consumes and presents it.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
