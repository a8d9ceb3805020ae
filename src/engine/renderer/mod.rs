// Rendering system using wgpu

mod camera;
mod sprite;
mod surface;
mod texture;
mod vertex;

pub use camera::{Camera, CameraUniform};
pub use sprite::SpriteRenderer;
pub use surface::{DrawCommand, RenderSurface};
pub use texture::{Texture, TextureManager};
pub use vertex::Vertex;

#[cfg(test)]
pub use surface::RecordingSurface;

use crate::core::Rect;
use crate::engine::assets::{LoadedTexture, TextureHandle};
use anyhow::Result;
use glam::{UVec2, Vec2};
use log::info;
use std::sync::Arc;
use winit::window::Window;

/// Main renderer responsible for initializing wgpu and coordinating rendering
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    sprite_renderer: SpriteRenderer,
    texture_manager: TextureManager,
    camera: Camera,
}

impl Renderer {
    /// Create a new renderer for the given window, drawing a fixed-size logical canvas
    pub async fn new(window: Arc<Window>, canvas_size: Vec2) -> Result<Self> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface
        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        // Request device and queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let camera = Camera::new(canvas_size.x, canvas_size.y);
        let sprite_renderer = SpriteRenderer::new(&device, surface_format, &camera);

        info!(
            "Renderer initialized with {}x{} resolution, {}x{} canvas",
            size.width, size.height, canvas_size.x, canvas_size.y
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            sprite_renderer,
            texture_manager: TextureManager::new(),
            camera,
        })
    }

    /// Resize the renderer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Reconfigure the surface at its current size, after it was lost or went stale
    pub fn reconfigure(&mut self) {
        self.resize(self.size);
    }

    /// Upload an image the asset loader finished decoding
    pub fn upload_texture(&mut self, loaded: &LoadedTexture) {
        let texture =
            self.sprite_renderer
                .create_texture(&self.device, &self.queue, &loaded.image, &loaded.name);
        self.texture_manager.insert(loaded.handle, texture);
        log::debug!(
            "Uploaded {} ({} textures resident)",
            loaded.name,
            self.texture_manager.texture_count()
        );
    }

    /// Drop the draw commands queued so far
    pub fn begin_frame(&mut self) {
        self.sprite_renderer.clear();
    }

    /// Render a frame
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // Update camera uniform
        let camera_uniform = CameraUniform::new(&self.camera);
        self.queue.write_buffer(
            self.sprite_renderer.camera_buffer(),
            0,
            bytemuck::cast_slice(&[camera_uniform]),
        );

        self.sprite_renderer
            .prepare(&self.device, &self.queue, &self.texture_manager);

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.sprite_renderer
                .render(&mut render_pass, &self.texture_manager);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get a reference to the camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}

impl RenderSurface for Renderer {
    fn texture_size(&self, texture: TextureHandle) -> Option<UVec2> {
        self.texture_manager.get(texture).map(Texture::size)
    }

    fn draw(&mut self, texture: TextureHandle, source: Rect, dest: Rect) {
        self.sprite_renderer.queue(DrawCommand {
            texture,
            source,
            dest,
        });
    }
}
