// Drawing seam between game logic and the GPU

use crate::core::Rect;
use crate::engine::assets::TextureHandle;
use glam::UVec2;

/// Something sprites can be drawn onto
///
/// Sprites never talk to the GPU directly. They ask for the pixel size of
/// their image (to slice frames out of a horizontal strip) and queue a copy
/// of a source rectangle to a destination rectangle.
pub trait RenderSurface {
    /// Pixel size of a texture, `None` while it is still loading or failed to load
    fn texture_size(&self, texture: TextureHandle) -> Option<UVec2>;

    /// Draw the `source` region of `texture` stretched over `dest` (canvas pixels)
    fn draw(&mut self, texture: TextureHandle, source: Rect, dest: Rect);
}

/// One queued draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub texture: TextureHandle,
    pub source: Rect,
    pub dest: Rect,
}

/// Surface that records draw calls instead of rendering them
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    sizes: std::collections::HashMap<crate::engine::assets::AssetId, UVec2>,
    pub commands: Vec<DrawCommand>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `texture` finished loading with the given pixel size
    pub fn with_texture(mut self, texture: TextureHandle, width: u32, height: u32) -> Self {
        self.sizes.insert(texture.id(), UVec2::new(width, height));
        self
    }
}

#[cfg(test)]
impl RenderSurface for RecordingSurface {
    fn texture_size(&self, texture: TextureHandle) -> Option<UVec2> {
        self.sizes.get(&texture.id()).copied()
    }

    fn draw(&mut self, texture: TextureHandle, source: Rect, dest: Rect) {
        self.commands.push(DrawCommand {
            texture,
            source,
            dest,
        });
    }
}
