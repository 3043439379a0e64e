//! Frame acquisition and the single translucent render pass.

use super::{Context, RenderConfig};

/// Render statistics for the current frame.
#[derive(Debug, Clone, Default)]
pub struct RenderInfo {
    /// Number of draw calls.
    pub draw_calls: u32,
    /// Frame number.
    pub frame: u64,
}

impl RenderInfo {
    /// Reset the per-frame counters.
    pub fn reset(&mut self) {
        self.draw_calls = 0;
    }
}

/// A frame in flight: the acquired surface texture plus the encoder
/// recording into it. Obtained from [`Renderer::begin_frame`] and consumed
/// by [`Renderer::end_frame`].
pub struct Frame {
    /// The acquired surface texture.
    pub output: wgpu::SurfaceTexture,
    /// View onto the surface texture.
    pub view: wgpu::TextureView,
    /// Command encoder for this frame.
    pub encoder: wgpu::CommandEncoder,
}

/// The renderer. The scene draws everything back-to-front into one pass
/// with blending, so there is no depth attachment.
pub struct Renderer {
    clear_color: wgpu::Color,
    info: RenderInfo,
}

impl Renderer {
    /// Create a new renderer.
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            clear_color: config.clear_color,
            info: RenderInfo::default(),
        }
    }

    /// Get render info.
    #[inline]
    pub fn info(&self) -> &RenderInfo {
        &self.info
    }

    /// Get mutable render info.
    #[inline]
    pub fn info_mut(&mut self) -> &mut RenderInfo {
        &mut self.info
    }

    /// Set the clear color.
    #[inline]
    pub fn set_clear_color(&mut self, color: wgpu::Color) {
        self.clear_color = color;
    }

    /// Acquire the next surface texture and start an encoder.
    pub fn begin_frame(&mut self, ctx: &Context) -> Result<Frame, wgpu::SurfaceError> {
        self.info.reset();
        self.info.frame += 1;

        let output = ctx.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = ctx.create_command_encoder();

        Ok(Frame { output, view, encoder })
    }

    /// Begin the scene render pass, clearing to the configured color.
    pub fn begin_pass<'a>(&self, frame: &'a mut Frame) -> wgpu::RenderPass<'a> {
        frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }

    /// Submit the frame's commands and present.
    pub fn end_frame(&self, ctx: &Context, frame: Frame) {
        ctx.submit(std::iter::once(frame.encoder.finish()));
        frame.output.present();
    }
}
