// Fighter presets
//
// Every number that shapes how a fighter moves, hits and is drawn lives here.
// The two presets reproduce the classic duel; anything else has to pass
// `FighterConfig::validate` before a fighter is built from it.

use super::state::FighterAnimation;
use glam::Vec2;
use thiserror::Error;

/// Invalid fighter preset
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{fighter}: {animation} clip has no frames")]
    ZeroFrameCount {
        fighter: &'static str,
        animation: FighterAnimation,
    },

    #[error("{fighter}: hit frame {hit_frame} is outside the {attack_frames} frame attack")]
    HitFrameOutOfRange {
        fighter: &'static str,
        hit_frame: u32,
        attack_frames: u32,
    },

    #[error("{fighter}: frame hold must be at least one tick")]
    ZeroFrameHold { fighter: &'static str },

    #[error("{fighter}: max health must be positive, got {max_health}")]
    InvalidHealth {
        fighter: &'static str,
        max_health: i32,
    },

    #[error("{fighter}: hit damage must be positive, got {damage}")]
    InvalidDamage { fighter: &'static str, damage: i32 },

    #[error("{fighter}: body size {width}x{height} must be positive")]
    InvalidBodySize {
        fighter: &'static str,
        width: f32,
        height: f32,
    },

    #[error("{fighter}: resting at y={rest_y} leaves the feet above the ground line {ground_line}")]
    FloatingRest {
        fighter: &'static str,
        rest_y: f32,
        ground_line: f32,
    },

    #[error("arena: {0}")]
    Arena(String),
}

/// Image path and frame count of one animation strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipSpec {
    pub path: &'static str,
    pub frame_count: u32,
}

impl ClipSpec {
    pub const fn new(path: &'static str, frame_count: u32) -> Self {
        Self { path, frame_count }
    }
}

/// A strip for every fighter animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipTable {
    pub idle: ClipSpec,
    pub run: ClipSpec,
    pub jump: ClipSpec,
    pub fall: ClipSpec,
    pub attack1: ClipSpec,
    pub take_hit: ClipSpec,
    pub death: ClipSpec,
}

impl ClipTable {
    pub const fn get(&self, animation: FighterAnimation) -> ClipSpec {
        match animation {
            FighterAnimation::Idle => self.idle,
            FighterAnimation::Run => self.run,
            FighterAnimation::Jump => self.jump,
            FighterAnimation::Fall => self.fall,
            FighterAnimation::Attack1 => self.attack1,
            FighterAnimation::TakeHit => self.take_hit,
            FighterAnimation::Death => self.death,
        }
    }
}

/// Everything needed to build a fighter
#[derive(Debug, Clone, PartialEq)]
pub struct FighterConfig {
    /// Display name
    pub name: &'static str,

    // Placement and drawing
    /// Top-left corner of the body box at match start
    pub spawn: Vec2,
    /// Body box size (hurtbox)
    pub body_size: Vec2,
    /// How far up and left of the body the image is drawn
    pub render_offset: Vec2,
    pub render_scale: f32,
    /// Ticks each animation frame stays on screen
    pub frame_hold: u32,
    pub clips: ClipTable,

    // Combat
    /// Attack box position relative to the body position
    pub attack_offset: Vec2,
    pub attack_size: Vec2,
    /// Attack1 frame on which a swing connects
    pub hit_frame: u32,
    pub hit_damage: i32,
    pub max_health: i32,

    // Movement
    /// Added to vertical velocity every airborne tick
    pub gravity: f32,
    /// Feet may not pass below this y
    pub ground_line: f32,
    /// Body y after landing
    pub rest_y: f32,
    /// Horizontal speed in pixels per tick
    pub move_speed: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_velocity: f32,
}

/// Player one: the samurai on the left
pub const SAMURAI_MACK: FighterConfig = FighterConfig {
    name: "Samurai Mack",

    spawn: Vec2::new(250.0, 0.0),
    body_size: Vec2::new(50.0, 150.0),
    render_offset: Vec2::new(215.0, 157.0),
    render_scale: 2.5,
    frame_hold: 7,
    clips: ClipTable {
        idle: ClipSpec::new("img/samuraiMack/Idle.png", 8),
        run: ClipSpec::new("img/samuraiMack/Run.png", 8),
        jump: ClipSpec::new("img/samuraiMack/Jump.png", 2),
        fall: ClipSpec::new("img/samuraiMack/Fall.png", 2),
        attack1: ClipSpec::new("img/samuraiMack/Attack1.png", 6),
        take_hit: ClipSpec::new("img/samuraiMack/Take Hit - white silhouette.png", 4),
        death: ClipSpec::new("img/samuraiMack/Death.png", 6),
    },

    attack_offset: Vec2::new(100.0, 50.0),
    attack_size: Vec2::new(160.0, 50.0),
    hit_frame: 4,
    hit_damage: 20,
    max_health: 100,

    gravity: 0.7,
    // 96 pixels of floor art below the fighters on a 576 pixel canvas
    ground_line: 576.0 - 96.0,
    rest_y: 330.0,
    move_speed: 5.0,
    jump_velocity: -20.0,
};

/// Player two: Kenji on the right, swinging to the left
pub const KENJI: FighterConfig = FighterConfig {
    name: "Kenji",

    spawn: Vec2::new(650.0, 100.0),
    body_size: Vec2::new(50.0, 150.0),
    render_offset: Vec2::new(215.0, 167.0),
    render_scale: 2.5,
    frame_hold: 7,
    clips: ClipTable {
        idle: ClipSpec::new("img/kenji/Idle.png", 4),
        run: ClipSpec::new("img/kenji/Run.png", 8),
        jump: ClipSpec::new("img/kenji/Jump.png", 2),
        fall: ClipSpec::new("img/kenji/Fall.png", 2),
        attack1: ClipSpec::new("img/kenji/Attack1.png", 4),
        take_hit: ClipSpec::new("img/kenji/Take hit.png", 3),
        death: ClipSpec::new("img/kenji/Death.png", 7),
    },

    attack_offset: Vec2::new(-165.0, 50.0),
    attack_size: Vec2::new(180.0, 50.0),
    hit_frame: 2,
    hit_damage: 20,
    max_health: 100,

    gravity: 0.7,
    ground_line: 576.0 - 96.0,
    rest_y: 330.0,
    move_speed: 5.0,
    jump_velocity: -20.0,
};

impl FighterConfig {
    pub fn samurai_mack() -> Self {
        SAMURAI_MACK
    }

    pub fn kenji() -> Self {
        KENJI
    }

    /// Check the preset can drive the animation and combat rules
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fighter = self.name;

        for animation in FighterAnimation::ALL {
            if self.clips.get(animation).frame_count == 0 {
                return Err(ConfigError::ZeroFrameCount { fighter, animation });
            }
        }

        let attack_frames = self.clips.attack1.frame_count;
        if self.hit_frame >= attack_frames {
            return Err(ConfigError::HitFrameOutOfRange {
                fighter,
                hit_frame: self.hit_frame,
                attack_frames,
            });
        }

        if self.frame_hold == 0 {
            return Err(ConfigError::ZeroFrameHold { fighter });
        }

        if self.max_health <= 0 {
            return Err(ConfigError::InvalidHealth {
                fighter,
                max_health: self.max_health,
            });
        }

        if self.hit_damage <= 0 {
            return Err(ConfigError::InvalidDamage {
                fighter,
                damage: self.hit_damage,
            });
        }

        if self.body_size.x <= 0.0 || self.body_size.y <= 0.0 {
            return Err(ConfigError::InvalidBodySize {
                fighter,
                width: self.body_size.x,
                height: self.body_size.y,
            });
        }

        // A resting fighter must already touch the ground or it falls forever
        if self.rest_y + self.body_size.y < self.ground_line {
            return Err(ConfigError::FloatingRest {
                fighter,
                rest_y: self.rest_y,
                ground_line: self.ground_line,
            });
        }

        Ok(())
    }
}
