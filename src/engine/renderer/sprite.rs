// Sprite batching: queued draw commands become textured quads

use super::{Camera, CameraUniform, DrawCommand, Texture, TextureManager, Vertex};
use crate::core::Rect;
use glam::{Vec2, Vec4};
use wgpu::util::DeviceExt;

const INITIAL_SPRITE_CAPACITY: usize = 64;

/// Run of consecutive quads sharing one texture
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    texture: crate::engine::assets::TextureHandle,
    indices: std::ops::Range<u32>,
}

/// Builds the four corners of a quad copying `source` (texels) onto `dest` (canvas pixels)
fn quad_vertices(source: Rect, dest: Rect, texture_size: Vec2) -> [Vertex; 4] {
    let uv_min = source.min() / texture_size;
    let uv_max = source.max() / texture_size;
    let min = dest.min();
    let max = dest.max();

    [
        Vertex::new(min, uv_min, Vec4::ONE),
        Vertex::new(
            Vec2::new(max.x, min.y),
            Vec2::new(uv_max.x, uv_min.y),
            Vec4::ONE,
        ),
        Vertex::new(max, uv_max, Vec4::ONE),
        Vertex::new(
            Vec2::new(min.x, max.y),
            Vec2::new(uv_min.x, uv_max.y),
            Vec4::ONE,
        ),
    ]
}

/// Sprite renderer drawing queued commands in submission order
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    commands: Vec<DrawCommand>,
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    batches: Vec<Batch>,
}

impl SpriteRenderer {
    /// Create a new sprite renderer
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, camera: &Camera) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The canvas projection flips y, so winding is not reliable
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
        });

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::new(camera)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        // Pixel art: never blur texels
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Sprite Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Vertex Buffer"),
            size: (INITIAL_SPRITE_CAPACITY * 4 * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Index Buffer"),
            size: (INITIAL_SPRITE_CAPACITY * 6 * std::mem::size_of::<u16>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            texture_bind_group_layout,
            sampler,
            commands: Vec::with_capacity(INITIAL_SPRITE_CAPACITY),
            vertices: Vec::new(),
            indices: Vec::new(),
            batches: Vec::new(),
        }
    }

    /// Upload a decoded image into a texture this pipeline can sample
    pub fn create_texture(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &image::RgbaImage,
        label: &str,
    ) -> Texture {
        Texture::from_rgba(
            device,
            queue,
            image,
            &self.texture_bind_group_layout,
            &self.sampler,
            Some(label),
        )
    }

    /// Queue a draw; later commands are drawn on top of earlier ones
    pub fn queue(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Forget every queued command
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Build geometry for the queued commands and upload it
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, textures: &TextureManager) {
        self.vertices.clear();
        self.indices.clear();
        self.batches.clear();

        for command in &self.commands {
            let Some(texture) = textures.get(command.texture) else {
                continue;
            };
            if self.vertices.len() + 4 > u16::MAX as usize {
                log::warn!("Sprite batch full, dropping remaining draws this frame");
                break;
            }

            let base = self.vertices.len() as u16;
            self.vertices.extend(quad_vertices(
                command.source,
                command.dest,
                texture.size().as_vec2(),
            ));

            let start = self.indices.len() as u32;
            self.indices
                .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
            let end = self.indices.len() as u32;

            match self.batches.last_mut() {
                Some(batch) if batch.texture == command.texture => batch.indices.end = end,
                _ => self.batches.push(Batch {
                    texture: command.texture,
                    indices: start..end,
                }),
            }
        }

        if self.vertices.is_empty() {
            return;
        }

        let vertex_size = (self.vertices.len() * std::mem::size_of::<Vertex>()) as u64;
        let index_size = (self.indices.len() * std::mem::size_of::<u16>()) as u64;

        if vertex_size > self.vertex_buffer.size() {
            self.vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sprite Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        } else {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.vertices));
        }

        if index_size > self.index_buffer.size() {
            self.index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sprite Index Buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            });
        } else {
            queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&self.indices));
        }
    }

    /// Render the geometry built by the last [`SpriteRenderer::prepare`]
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>, textures: &'a TextureManager) {
        if self.batches.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

        for batch in &self.batches {
            if let Some(texture) = textures.get(batch.texture) {
                render_pass.set_bind_group(1, &texture.bind_group, &[]);
                render_pass.draw_indexed(batch.indices.clone(), 0, 0..1);
            }
        }
    }

    /// Get the camera buffer
    pub fn camera_buffer(&self) -> &wgpu::Buffer {
        &self.camera_buffer
    }
}
