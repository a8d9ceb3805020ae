// Fighter entity: animated body, movement and health

use super::animation::{Animatable, AnimatedSprite, AnimationClip, AnimationSet};
use super::state::FighterAnimation;
use super::stats::{ConfigError, FighterConfig};
use crate::core::Rect;
use crate::engine::assets::TextureHandle;
use crate::engine::physics::{integrate, GravityField};
use crate::engine::renderer::RenderSurface;
use glam::Vec2;

/// Hit-detection rectangle that follows its owner at a fixed offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackBox {
    pub offset: Vec2,
    pub size: Vec2,
    /// Owner position plus offset, as of the last physics step
    pub position: Vec2,
}

impl AttackBox {
    pub fn rect(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }
}

/// One of the two duelists
#[derive(Debug, Clone)]
pub struct Fighter {
    config: FighterConfig,
    sprite: AnimatedSprite,
    animations: AnimationSet,
    animation: FighterAnimation,
    velocity: Vec2,
    gravity: GravityField,
    attack_box: AttackBox,
    health: i32,
    is_attacking: bool,
    is_dead: bool,
}

impl Fighter {
    /// Build a fighter from a preset, resolving each clip path to a texture with `texture_for`
    pub fn new(
        config: FighterConfig,
        mut texture_for: impl FnMut(&str) -> TextureHandle,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let animations = AnimationSet::from_fn(|animation| {
            let clip = config.clips.get(animation);
            AnimationClip::new(texture_for(clip.path), clip.frame_count)
        });

        let sprite = AnimatedSprite::new(
            config.spawn,
            animations.get(FighterAnimation::Idle),
            config.frame_hold,
        )
        .with_size(config.body_size)
        .with_scale(config.render_scale)
        .with_render_offset(config.render_offset);

        let attack_box = AttackBox {
            offset: config.attack_offset,
            size: config.attack_size,
            position: config.spawn + config.attack_offset,
        };

        log::debug!("Spawned {} at {}", config.name, config.spawn);

        Ok(Self {
            gravity: GravityField::new(config.gravity, config.ground_line, config.rest_y),
            health: config.max_health,
            config,
            sprite,
            animations,
            animation: FighterAnimation::Idle,
            velocity: Vec2::ZERO,
            attack_box,
            is_attacking: false,
            is_dead: false,
        })
    }

    /// Ask for a different animation
    ///
    /// Attack1 and TakeHit play through to their last frame before anything
    /// else is accepted. Death is never left; a request made while its last
    /// frame shows marks the fighter dead for good. Once health is gone every
    /// accepted request becomes Death.
    pub fn switch_animation(&mut self, requested: FighterAnimation) {
        let current = self.animation;

        if current.is_committed() && !self.sprite.on_last_frame() {
            return;
        }

        if current.is_terminal() {
            if self.sprite.on_last_frame() && !self.is_dead {
                self.is_dead = true;
                log::debug!("{} is dead", self.config.name);
            }
            return;
        }

        let requested = if self.health <= 0 {
            FighterAnimation::Death
        } else {
            requested
        };

        if requested == current {
            return;
        }

        log::trace!("{}: {} -> {}", self.config.name, current, requested);
        self.animation = requested;
        self.sprite.set_clip(self.animations.get(requested));
    }

    /// Start a swing
    pub fn attack(&mut self) {
        self.switch_animation(FighterAnimation::Attack1);
        self.is_attacking = true;
    }

    /// Take one hit, returning the health left
    pub fn take_hit(&mut self) -> i32 {
        self.health = (self.health - self.config.hit_damage).max(0);

        if self.health <= 0 {
            self.switch_animation(FighterAnimation::Death);
        } else {
            self.switch_animation(FighterAnimation::TakeHit);
        }
        self.health
    }

    /// Launch upward; works in the air too
    pub fn jump(&mut self) {
        self.velocity.y = self.config.jump_velocity;
    }

    /// Move the attack box, integrate velocity, then apply gravity or land
    pub fn physics_step(&mut self) {
        self.attack_box.position = self.sprite.position + self.attack_box.offset;
        integrate(&mut self.sprite.position, self.velocity);
        self.gravity
            .apply(&mut self.sprite.position, &mut self.velocity, self.sprite.size.y);
    }

    /// One simulation tick: draw, animate unless dead, then move
    pub fn update(&mut self, surface: &mut dyn RenderSurface) {
        self.advance(surface);
        self.physics_step();
    }

    /// Clear the swing flag once its hit frame has been checked
    pub fn finish_swing(&mut self) {
        self.is_attacking = false;
    }

    pub fn set_velocity_x(&mut self, x: f32) {
        self.velocity.x = x;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.sprite.position = position;
    }

    pub fn name(&self) -> &'static str {
        self.config.name
    }

    pub fn config(&self) -> &FighterConfig {
        &self.config
    }

    pub fn position(&self) -> Vec2 {
        self.sprite.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn width(&self) -> f32 {
        self.sprite.size.x
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_attacking(&self) -> bool {
        self.is_attacking
    }

    /// Whether the death animation has finished; a dead fighter never animates again
    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn animation(&self) -> FighterAnimation {
        self.animation
    }

    pub fn frame_index(&self) -> u32 {
        self.sprite.frame_index()
    }

    pub fn hit_frame(&self) -> u32 {
        self.config.hit_frame
    }

    /// Body box (hurtbox) in canvas coordinates
    pub fn body(&self) -> Rect {
        Rect::from_position_size(self.sprite.position, self.sprite.size)
    }

    pub fn attack_box(&self) -> &AttackBox {
        &self.attack_box
    }

    pub fn attack_rect(&self) -> Rect {
        self.attack_box.rect()
    }
}

impl Animatable for Fighter {
    fn render(&self, surface: &mut dyn RenderSurface) {
        self.sprite.render(surface);
    }

    fn advance(&mut self, surface: &mut dyn RenderSurface) {
        if self.is_dead {
            self.sprite.render(surface);
        } else {
            self.sprite.advance(surface);
        }
    }
}
