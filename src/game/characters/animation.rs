// Frame-strip sprite animation

use super::state::FighterAnimation;
use crate::core::Rect;
use crate::engine::assets::TextureHandle;
use crate::engine::renderer::RenderSurface;
use glam::Vec2;
use std::ops::Index;

/// Default body size of a sprite in canvas pixels
pub const DEFAULT_SPRITE_SIZE: Vec2 = Vec2::new(50.0, 150.0);

/// One animation: a horizontal strip of equally wide frames in a single image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClip {
    pub texture: TextureHandle,
    pub frame_count: u32,
}

impl AnimationClip {
    pub const fn new(texture: TextureHandle, frame_count: u32) -> Self {
        Self {
            texture,
            frame_count,
        }
    }
}

/// A clip for every [`FighterAnimation`]
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSet {
    clips: [AnimationClip; FighterAnimation::COUNT],
}

impl AnimationSet {
    /// Build the table by asking `clip_for` about each animation in turn
    pub fn from_fn(mut clip_for: impl FnMut(FighterAnimation) -> AnimationClip) -> Self {
        Self {
            clips: FighterAnimation::ALL.map(&mut clip_for),
        }
    }

    pub fn get(&self, animation: FighterAnimation) -> AnimationClip {
        self.clips[animation.index()]
    }
}

impl Index<FighterAnimation> for AnimationSet {
    type Output = AnimationClip;

    fn index(&self, animation: FighterAnimation) -> &AnimationClip {
        &self.clips[animation.index()]
    }
}

/// Anything that draws itself and steps its animation once per tick
pub trait Animatable {
    /// Draw the current frame without changing any state
    fn render(&self, surface: &mut dyn RenderSurface);

    /// Draw the current frame, then step the animation by one tick
    fn advance(&mut self, surface: &mut dyn RenderSurface);
}

/// A positioned image that cycles through the frames of its clip
///
/// Each frame is held for `frame_hold` ticks. The tick counter keeps running
/// across clip switches, so a new clip may show its first frame for fewer
/// than `frame_hold` ticks.
#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    /// Top-left corner of the body box
    pub position: Vec2,
    /// Body box size, independent of the drawn image size
    pub size: Vec2,
    clip: AnimationClip,
    frame_index: u32,
    frame_ticks: u32,
    frame_hold: u32,
    render_scale: f32,
    render_offset: Vec2,
}

impl AnimatedSprite {
    pub fn new(position: Vec2, clip: AnimationClip, frame_hold: u32) -> Self {
        Self {
            position,
            size: DEFAULT_SPRITE_SIZE,
            clip,
            frame_index: 0,
            frame_ticks: 0,
            frame_hold: frame_hold.max(1),
            render_scale: 1.0,
            render_offset: Vec2::ZERO,
        }
    }

    /// Draw the image scaled up by `scale`
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.render_scale = scale;
        self
    }

    /// Draw the image shifted up and left of the body position by `offset`
    pub fn with_render_offset(mut self, offset: Vec2) -> Self {
        self.render_offset = offset;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn clip(&self) -> AnimationClip {
        self.clip
    }

    /// Replace the clip and restart it from its first frame
    pub fn set_clip(&mut self, clip: AnimationClip) {
        self.clip = clip;
        self.frame_index = 0;
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn frame_count(&self) -> u32 {
        self.clip.frame_count
    }

    pub fn frame_hold(&self) -> u32 {
        self.frame_hold
    }

    /// Whether the last frame of the clip is showing
    pub fn on_last_frame(&self) -> bool {
        self.frame_index + 1 >= self.clip.frame_count
    }

    /// Step the tick counter, moving to the next frame every `frame_hold` ticks
    pub fn tick(&mut self) {
        self.frame_ticks = self.frame_ticks.wrapping_add(1);
        if self.frame_ticks % self.frame_hold != 0 {
            return;
        }

        if self.frame_index + 1 < self.clip.frame_count {
            self.frame_index += 1;
        } else {
            self.frame_index = 0;
        }
    }

    /// Region of an image of `texture_size` pixels holding the current frame
    pub fn source_rect(&self, texture_size: Vec2) -> Rect {
        let frame_width = texture_size.x / self.clip.frame_count.max(1) as f32;
        Rect::new(
            self.frame_index as f32 * frame_width,
            0.0,
            frame_width,
            texture_size.y,
        )
    }

    /// Canvas area the current frame of an image of `texture_size` pixels covers
    pub fn dest_rect(&self, texture_size: Vec2) -> Rect {
        let frame_width = texture_size.x / self.clip.frame_count.max(1) as f32;
        Rect::from_position_size(
            self.position - self.render_offset,
            Vec2::new(frame_width, texture_size.y) * self.render_scale,
        )
    }
}

impl Animatable for AnimatedSprite {
    fn render(&self, surface: &mut dyn RenderSurface) {
        // Images still loading draw nothing
        let Some(size) = surface.texture_size(self.clip.texture) else {
            return;
        };
        let size = size.as_vec2();
        surface.draw(
            self.clip.texture,
            self.source_rect(size),
            self.dest_rect(size),
        );
    }

    fn advance(&mut self, surface: &mut dyn RenderSurface) {
        self.render(surface);
        self.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::RecordingSurface;

    fn strip() -> TextureHandle {
        TextureHandle::from_path("strip.png")
    }

    fn sprite(frame_count: u32, frame_hold: u32) -> AnimatedSprite {
        AnimatedSprite::new(Vec2::ZERO, AnimationClip::new(strip(), frame_count), frame_hold)
    }

    #[test]
    fn test_frame_advances_every_hold_ticks() {
        let mut sprite = sprite(8, 7);
        for _ in 0..6 {
            sprite.tick();
        }
        assert_eq!(sprite.frame_index(), 0);
        sprite.tick();
        assert_eq!(sprite.frame_index(), 1);
    }

    #[test]
    fn test_n_holds_give_n_frames_with_wraparound() {
        let mut sprite = sprite(4, 7);
        for _ in 0..(7 * 6) {
            sprite.tick();
            assert!(sprite.frame_index() < sprite.frame_count());
        }
        // 6 frames forward on a 4 frame strip
        assert_eq!(sprite.frame_index(), 2);
    }

    #[test]
    fn test_single_frame_clip_stays_on_frame_zero() {
        let mut sprite = sprite(1, 1);
        for _ in 0..5 {
            sprite.tick();
            assert_eq!(sprite.frame_index(), 0);
        }
    }

    #[test]
    fn test_set_clip_resets_frame_but_not_ticks() {
        let mut sprite = sprite(8, 7);
        for _ in 0..12 {
            sprite.tick();
        }
        assert_eq!(sprite.frame_index(), 1);

        sprite.set_clip(AnimationClip::new(TextureHandle::from_path("other.png"), 4));
        assert_eq!(sprite.frame_index(), 0);

        // Two more ticks reach tick 14, a multiple of the hold
        sprite.tick();
        sprite.tick();
        assert_eq!(sprite.frame_index(), 1);
    }

    #[test]
    fn test_render_draws_current_frame() {
        let mut surface = RecordingSurface::new().with_texture(strip(), 400, 100);
        let mut sprite = AnimatedSprite::new(Vec2::new(300.0, 200.0), AnimationClip::new(strip(), 4), 1)
            .with_scale(2.0)
            .with_render_offset(Vec2::new(20.0, 10.0));
        sprite.tick();
        sprite.render(&mut surface);

        assert_eq!(surface.commands.len(), 1);
        let command = surface.commands[0];
        assert_eq!(command.texture, strip());
        assert_eq!(command.source, Rect::new(100.0, 0.0, 100.0, 100.0));
        assert_eq!(command.dest, Rect::new(280.0, 190.0, 200.0, 200.0));
    }

    #[test]
    fn test_unloaded_image_draws_nothing() {
        let mut surface = RecordingSurface::new();
        let mut sprite = sprite(4, 1);
        sprite.advance(&mut surface);

        assert!(surface.commands.is_empty());
        // The animation still moves on
        assert_eq!(sprite.frame_index(), 1);
    }

    #[test]
    fn test_advance_renders_before_stepping() {
        let mut surface = RecordingSurface::new().with_texture(strip(), 400, 100);
        let mut sprite = sprite(4, 1);
        sprite.advance(&mut surface);

        assert_eq!(surface.commands[0].source.x, 0.0);
        assert_eq!(sprite.frame_index(), 1);
    }

    #[test]
    fn test_animation_set_lookup() {
        let set = AnimationSet::from_fn(|animation| {
            AnimationClip::new(
                TextureHandle::from_path(animation.name()),
                animation.index() as u32 + 1,
            )
        });
        assert_eq!(set.get(FighterAnimation::Death).frame_count, 7);
        assert_eq!(set[FighterAnimation::Run].texture, TextureHandle::from_path("run"));
    }
}
