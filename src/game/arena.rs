// Arena layout and scenery

use super::characters::{Animatable, AnimatedSprite, AnimationClip, ConfigError};
use super::clock::ROUND_SECONDS;
use crate::engine::assets::TextureHandle;
use crate::engine::renderer::RenderSurface;
use glam::Vec2;

/// A piece of scenery drawn behind the fighters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorConfig {
    pub path: &'static str,
    pub position: Vec2,
    pub scale: f32,
    pub frame_count: u32,
    pub frame_hold: u32,
}

/// Canvas size, scenery and round length
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    /// Drawn back to front
    pub decor: Vec<DecorConfig>,
    pub round_seconds: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 576.0,
            decor: vec![
                DecorConfig {
                    path: "img/background.png",
                    position: Vec2::ZERO,
                    scale: 1.0,
                    frame_count: 1,
                    frame_hold: 7,
                },
                DecorConfig {
                    path: "img/shop.png",
                    position: Vec2::new(600.0, 128.0),
                    scale: 2.75,
                    frame_count: 6,
                    frame_hold: 7,
                },
            ],
            round_seconds: ROUND_SECONDS,
        }
    }
}

impl ArenaConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::Arena(format!(
                "canvas {}x{} must be positive",
                self.width, self.height
            )));
        }
        if self.round_seconds == 0 {
            return Err(ConfigError::Arena("round must last at least one second".into()));
        }
        for decor in &self.decor {
            if decor.frame_count == 0 || decor.frame_hold == 0 {
                return Err(ConfigError::Arena(format!(
                    "{} needs at least one frame held for one tick",
                    decor.path
                )));
            }
        }
        Ok(())
    }
}

/// The scenery of a running match
#[derive(Debug, Clone)]
pub struct Arena {
    decor: Vec<AnimatedSprite>,
}

impl Arena {
    pub fn new(config: &ArenaConfig, mut texture_for: impl FnMut(&str) -> TextureHandle) -> Self {
        let decor = config
            .decor
            .iter()
            .map(|decor| {
                let clip = AnimationClip::new(texture_for(decor.path), decor.frame_count);
                AnimatedSprite::new(decor.position, clip, decor.frame_hold).with_scale(decor.scale)
            })
            .collect();
        Self { decor }
    }

    /// Draw and animate every piece of scenery, back to front
    pub fn advance(&mut self, surface: &mut dyn RenderSurface) {
        for sprite in &mut self.decor {
            sprite.advance(surface);
        }
    }

    pub fn decor(&self) -> &[AnimatedSprite] {
        &self.decor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rect;
    use crate::engine::renderer::RecordingSurface;

    #[test]
    fn test_default_arena_is_valid() {
        assert_eq!(ArenaConfig::default().validate(), Ok(()));
        assert_eq!(ArenaConfig::default().size(), Vec2::new(1024.0, 576.0));
    }

    #[test]
    fn test_zero_frame_decor_rejected() {
        let mut config = ArenaConfig::default();
        config.decor[1].frame_count = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Arena(_))));
    }

    #[test]
    fn test_decor_drawn_back_to_front() {
        let background = TextureHandle::from_path("img/background.png");
        let shop = TextureHandle::from_path("img/shop.png");
        let mut surface = RecordingSurface::new()
            .with_texture(background, 1024, 576)
            .with_texture(shop, 708, 128);

        let mut arena = Arena::new(&ArenaConfig::default(), TextureHandle::from_path);
        arena.advance(&mut surface);

        assert_eq!(surface.commands.len(), 2);
        assert_eq!(surface.commands[0].texture, background);
        assert_eq!(surface.commands[0].dest, Rect::new(0.0, 0.0, 1024.0, 576.0));
        assert_eq!(surface.commands[1].texture, shop);
        assert_eq!(surface.commands[1].source, Rect::new(0.0, 0.0, 118.0, 128.0));
        assert_eq!(surface.commands[1].dest, Rect::new(600.0, 128.0, 324.5, 352.0));
    }

    #[test]
    fn test_shop_animates() {
        let mut arena = Arena::new(&ArenaConfig::default(), TextureHandle::from_path);
        let mut surface = RecordingSurface::new();
        for _ in 0..7 {
            arena.advance(&mut surface);
        }
        assert_eq!(arena.decor()[0].frame_index(), 0);
        assert_eq!(arena.decor()[1].frame_index(), 1);
    }
}
