//! Instanced point sprites.
//!
//! WebGPU has no point-sprite primitive, so each point is a camera-facing
//! quad expanded in the vertex shader from the shared billboard basis.

use super::{texture_bind_group, texture_bind_group_layout, BlendMode, SceneBinding};
use crate::core::Context;
use crate::math::Matrix4;
use crate::texture::{Sampler, Texture2D};
use bytemuck::{Pod, Zeroable};

/// One point: world position, world-unit size, tint and opacity.
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct PointInstance {
    /// World position.
    pub position: [f32; 3],
    /// Quad edge length in world units.
    pub size: f32,
    /// Per-point tint.
    pub color: [f32; 3],
    /// Per-point opacity.
    pub opacity: f32,
}

/// Batch-level uniform: a model matrix (field rotation) and a tint/opacity
/// multiplier applied on top of the per-instance values.
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct PointBatchUniform {
    model: [[f32; 4]; 4],
    tint: [f32; 3],
    opacity: f32,
}

impl Default for PointBatchUniform {
    fn default() -> Self {
        Self {
            model: Matrix4::IDENTITY.to_array(),
            tint: [1.0, 1.0, 1.0],
            opacity: 1.0,
        }
    }
}

/// A fixed-capacity batch of textured point sprites.
pub struct PointBatch {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    batch_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    texture_bind_group: wgpu::BindGroup,
    sampler: Sampler,
    capacity: u32,
    count: u32,
    uniform: PointBatchUniform,
}

impl PointBatch {
    /// Create a batch with room for `capacity` points.
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
            label: Some("Points Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/points.wgsl").into()),
        });

        let batch_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Point Batch Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = texture_bind_group_layout(device, "Point Texture Bind Group Layout");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Points Pipeline Layout"),
            bind_group_layouts: &[scene.layout(), &batch_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as wgpu::BufferAddress,
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
                    format: wgpu::VertexFormat::Float32,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 7]>() as wgpu::BufferAddress,
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
            label: Some("Point Instance Buffer"),
            size: (capacity as u64) * std::mem::size_of::<PointInstance>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform = PointBatchUniform::default();
        let uniform_buffer = ctx.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Point Batch Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let batch_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Point Batch Bind Group"),
            layout: &batch_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let sampler = Sampler::linear_clamp(device);
        let texture_bind_group = texture_bind_group(
            device,
            &texture_layout,
            texture.view(),
            sampler.wgpu_sampler(),
            "Point Texture Bind Group",
        );

        Self {
            pipeline,
            instance_buffer,
            uniform_buffer,
            batch_bind_group,
            texture_layout,
            texture_bind_group,
            sampler,
            capacity,
            count: 0,
            uniform,
        }
    }

    /// Replace the batch texture.
    pub fn set_texture(&mut self, ctx: &Context, texture: &Texture2D) {
        self.texture_bind_group = texture_bind_group(
            &ctx.device,
            &self.texture_layout,
            texture.view(),
            self.sampler.wgpu_sampler(),
            "Point Texture Bind Group",
        );
    }

    /// Upload instances for this frame. Extra instances beyond capacity are
    /// dropped.
    pub fn write_instances(&mut self, ctx: &Context, instances: &[PointInstance]) {
        let n = instances.len().min(self.capacity as usize);
        ctx.queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&instances[..n]),
        );
        self.count = n as u32;
    }

    /// Set the batch model matrix (field rotation).
    pub fn set_model(&mut self, ctx: &Context, model: &Matrix4) {
        self.uniform.model = model.to_array();
        ctx.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniform));
    }

    /// Set the batch-wide opacity multiplier.
    pub fn set_opacity(&mut self, ctx: &Context, opacity: f32) {
        self.uniform.opacity = opacity;
        ctx.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniform));
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
        rpass.set_bind_group(1, &self.batch_bind_group, &[]);
        rpass.set_bind_group(2, &self.texture_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        rpass.draw(0..6, 0..self.count);
    }
}
