//! Textured billboards for logos, glows and the heading banner.

use super::{texture_bind_group, texture_bind_group_layout, BlendMode, SceneBinding};
use crate::core::Context;
use crate::texture::{Sampler, Texture2D};
use bytemuck::{Pod, Zeroable};

/// One billboard: world position, world-unit width/height, tint, opacity.
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct SpriteInstance {
    /// World position of the sprite center.
    pub position: [f32; 3],
    /// Width and height in world units.
    pub size: [f32; 2],
    /// Tint color.
    pub color: [f32; 3],
    /// Opacity.
    pub opacity: f32,
}

/// A fixed-capacity batch of billboards sharing one texture.
pub struct SpriteBatch {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    texture_layout: wgpu::BindGroupLayout,
    texture_bind_group: wgpu::BindGroup,
    sampler: Sampler,
    capacity: u32,
    count: u32,
}

impl SpriteBatch {
    /// Create a batch with room for `capacity` sprites.
    pub fn new(
        ctx: &Context,
        scene: &SceneBinding,
        texture: &Texture2D,
        capacity: u32,
        blend: BlendMode,
        label: &str,
    ) -> Self {
        let device = &ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprites Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/sprites.wgsl").into()),
        });

        let texture_layout =
            texture_bind_group_layout(device, "Sprite Texture Bind Group Layout");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprites Pipeline Layout"),
            bind_group_layouts: &[scene.layout(), &texture_layout],
            push_constant_ranges: &[],
        });

        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[instance_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(blend.state()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
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
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let instance_buffer = ctx.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Instance Buffer"),
            size: (capacity as u64) * std::mem::size_of::<SpriteInstance>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let sampler = Sampler::linear_clamp(device);
        let texture_bind_group = texture_bind_group(
            device,
            &texture_layout,
            texture.view(),
            sampler.wgpu_sampler(),
            "Sprite Texture Bind Group",
        );

        Self {
            pipeline,
            instance_buffer,
            texture_layout,
            texture_bind_group,
            sampler,
            capacity,
            count: 0,
        }
    }

    /// Replace the batch texture. Used when an asset finishes loading and
    /// the placeholder is swapped out.
    pub fn set_texture(&mut self, ctx: &Context, texture: &Texture2D) {
        self.texture_bind_group = texture_bind_group(
            &ctx.device,
            &self.texture_layout,
            texture.view(),
            self.sampler.wgpu_sampler(),
            "Sprite Texture Bind Group",
        );
    }

    /// Upload instances for this frame.
    pub fn write_instances(&mut self, ctx: &Context, instances: &[SpriteInstance]) {
        let n = instances.len().min(self.capacity as usize);
        ctx.queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&instances[..n]),
        );
        self.count = n as u32;
    }

    /// Number of instances currently uploaded.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Record the draw.
    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>, scene: &'a SceneBinding) {
        if self.count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, scene.bind_group(), &[]);
        rpass.set_bind_group(1, &self.texture_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        rpass.draw(0..6, 0..self.count);
    }
}
