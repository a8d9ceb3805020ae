// GPU textures keyed by asset id

use crate::engine::assets::{AssetId, TextureHandle};
use glam::UVec2;
use image::RgbaImage;
use std::collections::HashMap;

/// A texture uploaded to the GPU, with the bind group the sprite pipeline samples it through
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Upload a decoded RGBA image
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        label: Option<&str>,
    ) -> Self {
        let (width, height) = image.dimensions();

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label,
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            texture,
            view,
            bind_group,
            width,
            height,
        }
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }
}

/// Textures that finished uploading, looked up by the handle the asset manager issued
#[derive(Default)]
pub struct TextureManager {
    textures: HashMap<AssetId, Texture>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an uploaded texture, replacing any previous upload for the same handle
    pub fn insert(&mut self, handle: TextureHandle, texture: Texture) {
        self.textures.insert(handle.id(), texture);
    }

    /// Get a texture by handle
    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(&handle.id())
    }

    /// Get the number of uploaded textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}
