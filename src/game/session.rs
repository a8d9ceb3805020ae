// A single round between the two fighters

use super::arena::{Arena, ArenaConfig};
use super::characters::{ConfigError, Fighter, FighterAnimation, FighterConfig};
use super::clock::MatchClock;
use super::combat::{resolve_attack, HitEvent};
use crate::engine::assets::TextureHandle;
use crate::engine::input::{Action, Direction, InputManager, PlayerInput};
use crate::engine::renderer::RenderSurface;
use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

/// Which side a fighter plays on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [Self::One, Self::Two];

    /// Input player index driving this slot
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Why the round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Knockout,
    TimeUp,
}

/// Final result, decided once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    /// `None` on equal health
    pub winner: Option<PlayerSlot>,
    pub reason: EndReason,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner {
            Some(slot) => write!(f, "{} wins", slot),
            None => f.write_str("Tie"),
        }
    }
}

/// What one fighter was told to do this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Controls {
    direction: Option<Direction>,
    jump: bool,
    attack: bool,
}

impl Controls {
    fn from_input(input: &PlayerInput) -> Self {
        Self {
            direction: input.horizontal_intent(),
            jump: input.just_pressed(Action::Jump),
            attack: input.just_pressed(Action::Attack),
        }
    }
}

/// The round: scenery, both fighters, the clock and the result
pub struct Match {
    arena_config: ArenaConfig,
    arena: Arena,
    fighters: [Fighter; 2],
    clock: MatchClock,
    outcome: Option<MatchOutcome>,
    ticks: u64,
}

impl Match {
    /// Set up a round; `texture_for` turns every image path into a texture handle
    pub fn new(
        arena_config: ArenaConfig,
        fighters: [FighterConfig; 2],
        mut texture_for: impl FnMut(&str) -> TextureHandle,
    ) -> Result<Self, ConfigError> {
        arena_config.validate()?;

        let arena = Arena::new(&arena_config, &mut texture_for);
        let [one, two] = fighters;
        let fighters = [
            Fighter::new(one, &mut texture_for)?,
            Fighter::new(two, &mut texture_for)?,
        ];

        log::info!(
            "Match start: {} vs {}, {} seconds",
            fighters[0].name(),
            fighters[1].name(),
            arena_config.round_seconds
        );

        Ok(Self {
            clock: MatchClock::new(arena_config.round_seconds),
            arena_config,
            arena,
            fighters,
            outcome: None,
            ticks: 0,
        })
    }

    /// Samurai Mack against Kenji in the default arena
    pub fn classic(texture_for: impl FnMut(&str) -> TextureHandle) -> Result<Self, ConfigError> {
        Self::new(
            ArenaConfig::default(),
            [FighterConfig::samurai_mack(), FighterConfig::kenji()],
            texture_for,
        )
    }

    /// Run one simulation tick and queue its drawing on `surface`
    pub fn tick(&mut self, input: &InputManager, surface: &mut dyn RenderSurface) {
        self.ticks += 1;

        let controls = PlayerSlot::ALL.map(|slot| self.controls_for(slot, input));

        // Presses land before the frame, the way key events arrive between frames
        for slot in PlayerSlot::ALL {
            let fighter = &mut self.fighters[slot.index()];
            let controls = controls[slot.index()];
            if controls.jump {
                fighter.jump();
            }
            if controls.attack {
                fighter.attack();
            }
        }

        self.arena.advance(surface);
        for fighter in &mut self.fighters {
            fighter.update(surface);
        }

        let arena_width = self.arena_config.width;
        for slot in PlayerSlot::ALL {
            steer(
                &mut self.fighters[slot.index()],
                controls[slot.index()].direction,
                arena_width,
            );
        }

        // Health is frozen along with the result
        if !self.is_over() {
            let [one, two] = &mut self.fighters;
            let hits = [resolve_attack(one, two), resolve_attack(two, one)];
            for hit in hits.into_iter().flatten() {
                self.on_hit(hit);
            }
        }

        if !self.is_over() && self.fighters.iter().any(|f| f.health() <= 0) {
            self.conclude(EndReason::Knockout);
        }
    }

    /// Feed real elapsed time to the round clock
    pub fn advance_clock(&mut self, elapsed: Duration) {
        if self.is_over() {
            return;
        }
        if self.clock.advance(elapsed) {
            self.conclude(EndReason::TimeUp);
        }
    }

    fn controls_for(&self, slot: PlayerSlot, input: &InputManager) -> Controls {
        if self.is_over() || self.fighter(slot).health() <= 0 {
            return Controls::default();
        }
        input
            .player(slot.index())
            .map(Controls::from_input)
            .unwrap_or_default()
    }

    fn on_hit(&self, hit: HitEvent) {
        log::info!(
            "{} lands a hit on {}, {} health left",
            hit.attacker,
            hit.defender,
            hit.remaining_health
        );
    }

    fn conclude(&mut self, reason: EndReason) {
        let [one, two] = &self.fighters;
        let winner = match one.health().cmp(&two.health()) {
            Ordering::Greater => Some(PlayerSlot::One),
            Ordering::Less => Some(PlayerSlot::Two),
            Ordering::Equal => None,
        };

        let outcome = MatchOutcome { winner, reason };
        self.outcome = Some(outcome);
        self.clock.stop();
        log::info!(
            "Match over ({:?}) after {} ticks: {}",
            reason,
            self.ticks,
            outcome
        );
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn fighter(&self, slot: PlayerSlot) -> &Fighter {
        &self.fighters[slot.index()]
    }

    pub fn fighter_mut(&mut self, slot: PlayerSlot) -> &mut Fighter {
        &mut self.fighters[slot.index()]
    }

    pub fn clock(&self) -> &MatchClock {
        &self.clock
    }

    pub fn arena(&self) -> &ArenaConfig {
        &self.arena_config
    }

    /// One-line scoreboard: both health values, the clock and the result
    pub fn status_line(&self) -> String {
        let [one, two] = &self.fighters;
        let mut line = format!(
            "{} {} | {} | {} {}",
            one.name(),
            one.health(),
            self.clock.remaining(),
            two.health(),
            two.name()
        );
        if let Some(outcome) = self.outcome {
            line.push_str(&format!(" | {}", outcome));
        }
        line
    }
}

/// Set horizontal velocity from the held direction and pick the matching animation
fn steer(fighter: &mut Fighter, direction: Option<Direction>, arena_width: f32) {
    fighter.set_velocity_x(0.0);

    let x = fighter.position().x;
    let can_move = match direction {
        Some(Direction::Left) => x > 0.0,
        Some(Direction::Right) => x < arena_width - fighter.width(),
        None => false,
    };

    match direction {
        Some(direction) if can_move => {
            fighter.set_velocity_x(direction.sign() * fighter.config().move_speed);
            fighter.switch_animation(FighterAnimation::Run);
        }
        _ => fighter.switch_animation(FighterAnimation::Idle),
    }

    let vertical = fighter.velocity().y;
    if vertical < 0.0 {
        fighter.switch_animation(FighterAnimation::Jump);
    } else if vertical > 0.0 {
        fighter.switch_animation(FighterAnimation::Fall);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::InputSource;
    use crate::engine::renderer::RecordingSurface;
    use glam::Vec2;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    fn classic() -> Match {
        Match::classic(TextureHandle::from_path).unwrap()
    }

    fn press(input: &mut InputManager, key: KeyCode) {
        input.apply(InputSource::key(key), ElementState::Pressed);
    }

    fn release(input: &mut InputManager, key: KeyCode) {
        input.apply(InputSource::key(key), ElementState::Released);
    }

    /// Run ticks the way the main loop does, consuming edges after each tick
    fn run(game: &mut Match, input: &mut InputManager, ticks: u32) {
        let mut surface = RecordingSurface::new();
        for _ in 0..ticks {
            game.tick(input, &mut surface);
            input.update();
        }
    }

    /// Let both fighters drop onto the floor
    fn settled() -> (Match, InputManager) {
        let mut game = classic();
        let mut input = InputManager::default();
        run(&mut game, &mut input, 120);
        (game, input)
    }

    #[test]
    fn test_fighters_settle_idle_on_ground() {
        let (game, _) = settled();
        for slot in PlayerSlot::ALL {
            let fighter = game.fighter(slot);
            assert_eq!(fighter.position().y, 330.0);
            assert_eq!(fighter.animation(), FighterAnimation::Idle);
        }
        assert!(!game.is_over());
    }

    #[test]
    fn test_run_right_and_left() {
        let (mut game, mut input) = settled();
        let start = game.fighter(PlayerSlot::One).position().x;

        press(&mut input, KeyCode::KeyD);
        run(&mut game, &mut input, 1);
        assert_eq!(game.fighter(PlayerSlot::One).velocity().x, 5.0);
        assert_eq!(game.fighter(PlayerSlot::One).animation(), FighterAnimation::Run);

        run(&mut game, &mut input, 1);
        assert_eq!(game.fighter(PlayerSlot::One).position().x, start + 5.0);

        release(&mut input, KeyCode::KeyD);
        press(&mut input, KeyCode::ArrowLeft);
        run(&mut game, &mut input, 1);
        assert_eq!(game.fighter(PlayerSlot::One).velocity().x, 0.0);
        assert_eq!(game.fighter(PlayerSlot::One).animation(), FighterAnimation::Idle);
        assert_eq!(game.fighter(PlayerSlot::Two).velocity().x, -5.0);
    }

    #[test]
    fn test_last_pressed_direction_wins() {
        let (mut game, mut input) = settled();
        press(&mut input, KeyCode::KeyD);
        press(&mut input, KeyCode::KeyA);
        run(&mut game, &mut input, 1);
        assert_eq!(game.fighter(PlayerSlot::One).velocity().x, -5.0);

        // Releasing the newer key does not fall back to the older one
        release(&mut input, KeyCode::KeyA);
        run(&mut game, &mut input, 1);
        assert_eq!(game.fighter(PlayerSlot::One).velocity().x, 0.0);
    }

    #[test]
    fn test_arena_edges_block_movement() {
        let (mut game, mut input) = settled();
        game.fighter_mut(PlayerSlot::One).set_position(Vec2::new(0.0, 330.0));
        game.fighter_mut(PlayerSlot::Two)
            .set_position(Vec2::new(1024.0 - 50.0, 330.0));

        press(&mut input, KeyCode::KeyA);
        press(&mut input, KeyCode::ArrowRight);
        run(&mut game, &mut input, 1);

        assert_eq!(game.fighter(PlayerSlot::One).velocity().x, 0.0);
        assert_eq!(game.fighter(PlayerSlot::One).animation(), FighterAnimation::Idle);
        assert_eq!(game.fighter(PlayerSlot::Two).velocity().x, 0.0);
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let (mut game, mut input) = settled();
        press(&mut input, KeyCode::KeyW);
        run(&mut game, &mut input, 1);

        let fighter = game.fighter(PlayerSlot::One);
        assert!(fighter.velocity().y < 0.0);
        assert_eq!(fighter.animation(), FighterAnimation::Jump);

        // Holding the key does not jump again
        run(&mut game, &mut input, 10);
        assert!(game.fighter(PlayerSlot::One).position().y < 330.0);
        let rising = game.fighter(PlayerSlot::One).velocity().y;
        assert!(rising > -20.0 + 0.7 * 10.0 - 0.01);

        run(&mut game, &mut input, 30);
        assert_eq!(game.fighter(PlayerSlot::One).animation(), FighterAnimation::Fall);

        run(&mut game, &mut input, 60);
        assert_eq!(game.fighter(PlayerSlot::One).position().y, 330.0);
    }

    #[test]
    fn test_swing_hits_once() {
        let (mut game, mut input) = settled();
        game.fighter_mut(PlayerSlot::One).set_position(Vec2::new(450.0, 330.0));
        game.fighter_mut(PlayerSlot::Two).set_position(Vec2::new(600.0, 330.0));

        press(&mut input, KeyCode::Space);
        run(&mut game, &mut input, 60);

        assert_eq!(game.fighter(PlayerSlot::Two).health(), 80);
        assert_eq!(game.fighter(PlayerSlot::One).health(), 100);
        assert!(!game.is_over());
    }

    #[test]
    fn test_knockout_ends_match_once() {
        let (mut game, mut input) = settled();
        game.fighter_mut(PlayerSlot::One).set_position(Vec2::new(450.0, 330.0));
        game.fighter_mut(PlayerSlot::Two).set_position(Vec2::new(600.0, 330.0));

        for _ in 0..5 {
            press(&mut input, KeyCode::Space);
            run(&mut game, &mut input, 1);
            release(&mut input, KeyCode::Space);
            run(&mut game, &mut input, 60);
        }

        assert_eq!(game.fighter(PlayerSlot::Two).health(), 0);
        let outcome = game.outcome().unwrap();
        assert_eq!(outcome.winner, Some(PlayerSlot::One));
        assert_eq!(outcome.reason, EndReason::Knockout);
        assert!(!game.clock().is_running());

        // Time running out later does not decide the match again
        game.advance_clock(Duration::from_secs(120));
        assert_eq!(game.outcome(), Some(outcome));
    }

    #[test]
    fn test_knocked_out_fighter_cannot_strike_back() {
        // Staggered swings where both would connect if the loser kept swinging
        for delay in (0..=8).chain(16..=22) {
            let (mut game, mut input) = settled();
            game.fighter_mut(PlayerSlot::One).set_position(Vec2::new(450.0, 330.0));
            game.fighter_mut(PlayerSlot::Two).set_position(Vec2::new(600.0, 330.0));
            for slot in PlayerSlot::ALL {
                for _ in 0..4 {
                    game.fighter_mut(slot).take_hit();
                }
            }
            run(&mut game, &mut input, 60);

            press(&mut input, KeyCode::Space);
            run(&mut game, &mut input, delay);
            press(&mut input, KeyCode::ArrowDown);
            run(&mut game, &mut input, 120);

            let outcome = game.outcome().unwrap();
            assert_eq!(outcome.reason, EndReason::Knockout, "delay {}", delay);
            let (winner, loser) = match outcome.winner.unwrap() {
                PlayerSlot::One => (PlayerSlot::One, PlayerSlot::Two),
                PlayerSlot::Two => (PlayerSlot::Two, PlayerSlot::One),
            };
            assert_eq!(game.fighter(winner).health(), 20, "delay {}", delay);
            assert_eq!(game.fighter(loser).health(), 0, "delay {}", delay);
        }
    }

    #[test]
    fn test_time_up_then_knockout_keeps_result() {
        let (mut game, mut input) = settled();
        game.fighter_mut(PlayerSlot::One).set_position(Vec2::new(450.0, 330.0));
        game.fighter_mut(PlayerSlot::Two).set_position(Vec2::new(600.0, 330.0));
        game.fighter_mut(PlayerSlot::Two).take_hit();

        game.advance_clock(Duration::from_secs(61));
        let outcome = game.outcome().unwrap();
        assert_eq!(outcome.reason, EndReason::TimeUp);
        assert_eq!(outcome.winner, Some(PlayerSlot::One));

        // A health value reaching zero afterwards does not decide it again
        for _ in 0..4 {
            game.fighter_mut(PlayerSlot::Two).take_hit();
        }
        assert_eq!(game.fighter(PlayerSlot::Two).health(), 0);
        run(&mut game, &mut input, 1);

        assert_eq!(game.outcome(), Some(outcome));
        assert_eq!(game.outcome().unwrap().reason, EndReason::TimeUp);
    }

    #[test]
    fn test_knocked_out_fighter_finishes_dying() {
        let (mut game, mut input) = settled();
        game.fighter_mut(PlayerSlot::One).set_position(Vec2::new(450.0, 330.0));
        game.fighter_mut(PlayerSlot::Two).set_position(Vec2::new(600.0, 330.0));

        for _ in 0..5 {
            press(&mut input, KeyCode::Space);
            run(&mut game, &mut input, 1);
            release(&mut input, KeyCode::Space);
            run(&mut game, &mut input, 60);
        }
        run(&mut game, &mut input, 120);

        let loser = game.fighter(PlayerSlot::Two);
        assert_eq!(loser.animation(), FighterAnimation::Death);
        assert!(loser.is_dead());

        let frame = loser.frame_index();
        run(&mut game, &mut input, 30);
        assert_eq!(game.fighter(PlayerSlot::Two).frame_index(), frame);
    }

    #[test]
    fn test_no_control_after_match_over() {
        let (mut game, mut input) = settled();
        game.advance_clock(Duration::from_secs(60));
        assert!(game.is_over());

        let x = game.fighter(PlayerSlot::One).position().x;
        press(&mut input, KeyCode::KeyD);
        press(&mut input, KeyCode::KeyW);
        run(&mut game, &mut input, 5);
        assert_eq!(game.fighter(PlayerSlot::One).position().x, x);
        assert_eq!(game.fighter(PlayerSlot::One).position().y, 330.0);
    }

    #[test]
    fn test_time_up_with_equal_health_is_tie() {
        let mut game = classic();
        for _ in 0..59 {
            game.advance_clock(Duration::from_secs(1));
            assert!(!game.is_over());
        }
        game.advance_clock(Duration::from_secs(1));

        assert_eq!(game.clock().remaining(), 0);
        assert_eq!(
            game.outcome(),
            Some(MatchOutcome {
                winner: None,
                reason: EndReason::TimeUp,
            })
        );
        assert_eq!(game.outcome().unwrap().to_string(), "Tie");
    }

    #[test]
    fn test_time_up_goes_to_healthier_fighter() {
        let mut game = classic();
        game.fighter_mut(PlayerSlot::One).take_hit();
        game.advance_clock(Duration::from_secs(60));

        let outcome = game.outcome().unwrap();
        assert_eq!(outcome.winner, Some(PlayerSlot::Two));
        assert_eq!(outcome.to_string(), "Player 2 wins");
    }

    #[test]
    fn test_draw_order() {
        let mut game = classic();
        let input = InputManager::default();
        let background = TextureHandle::from_path("img/background.png");
        let samurai_idle = TextureHandle::from_path("img/samuraiMack/Idle.png");
        let kenji_idle = TextureHandle::from_path("img/kenji/Idle.png");
        let mut surface = RecordingSurface::new()
            .with_texture(background, 1024, 576)
            .with_texture(samurai_idle, 1600, 200)
            .with_texture(kenji_idle, 800, 200);

        game.tick(&input, &mut surface);

        let drawn: Vec<_> = surface.commands.iter().map(|c| c.texture).collect();
        assert_eq!(drawn, vec![background, samurai_idle, kenji_idle]);

        // Idle frame of Samurai Mack drawn up and left of the spawn point
        assert_eq!(surface.commands[1].dest.x, 250.0 - 215.0);
        assert_eq!(surface.commands[1].dest.width, 200.0 * 2.5);
    }

    #[test]
    fn test_status_line() {
        let mut game = classic();
        assert_eq!(game.status_line(), "Samurai Mack 100 | 60 | 100 Kenji");

        game.advance_clock(Duration::from_secs(60));
        assert!(game.status_line().ends_with("| Tie"));
    }

    #[test]
    fn test_invalid_preset_fails_setup() {
        let mut kenji = FighterConfig::kenji();
        kenji.clips.idle.frame_count = 0;
        let result = Match::new(
            ArenaConfig::default(),
            [FighterConfig::samurai_mack(), kenji],
            TextureHandle::from_path,
        );
        assert!(result.is_err());
    }
}
