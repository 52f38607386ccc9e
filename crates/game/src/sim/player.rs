use std::time::Duration;

use super::animation::{Animator, DeathSequence, FrameSet};
use super::audio::SoundCue;
use super::cadence::window_elapsed;
use super::entity::{Aabb, Body, Collidable, DrawLayer, Drawable, Health, Inset, SpriteView};
use super::events::{GameEvent, GameEventBus};
use super::physics::{apply_gravity, GravityStep, GroundLine, PhysicsBody};
use super::projectile::Projectile;

pub(crate) const PLAYER_START_X: f32 = 0.0;
pub(crate) const PLAYER_WIDTH: f32 = 200.0;
pub(crate) const PLAYER_HEIGHT: f32 = 150.0;
pub(crate) const PLAYER_MAX_HEALTH: u32 = 100;
pub(crate) const CONTACT_DAMAGE: u32 = 25;
const PLAYER_INSET: Inset = Inset::new(75.0, 50.0, 110.0, 25.0);
const WALK_SPEED: f32 = 5.2;
const JUMP_VELOCITY: f32 = 19.5;
const GRAVITY_ACCEL: f32 = 1.75;
const STOMP_BOUNCE_VELOCITY: f32 = -5.0;
const STOMP_REACH: f32 = 100.0;
const DAMAGE_COOLDOWN: Duration = Duration::from_millis(1000);
const HURT_DISPLAY: Duration = Duration::from_millis(1000);
const THROW_COOLDOWN: Duration = Duration::from_millis(500);
const WALK_CUE_INTERVAL: Duration = Duration::from_millis(330);
pub(crate) const DEATH_TRAILING_DELAY: Duration = Duration::from_secs(2);

const WALK_FRAMES: FrameSet = FrameSet::new("character/walk", 6);
const JUMP_FRAMES: FrameSet = FrameSet::new("character/jump", 7);
const HURT_FRAMES: FrameSet = FrameSet::new("character/hurt", 4);
const DEAD_FRAMES: FrameSet = FrameSet::new("character/dead", 10);

/// Held controls for one tick. Vertical arrows are captured by the engine
/// but steer nothing here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PlayerInput {
    pub(crate) left: bool,
    pub(crate) right: bool,
    pub(crate) jump: bool,
    pub(crate) action: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayerState {
    Idle,
    Walking,
    Jumping,
    Hurt,
    Dead,
}

#[derive(Debug, Clone)]
pub(crate) struct Player {
    body: Body,
    physics: PhysicsBody,
    health: Health,
    speed: f32,
    held_projectiles: u32,
    is_jumping: bool,
    walk_held: bool,
    last_damage_at: Option<Duration>,
    last_throw_at: Option<Duration>,
    last_walk_cue_at: Option<Duration>,
    animator: Animator,
    death: Option<DeathSequence>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub(crate) fn new() -> Self {
        let ground = GroundLine::STANDARD;
        Self {
            body: Body::new(
                PLAYER_START_X,
                ground.rest_y,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
                PLAYER_INSET,
            ),
            physics: PhysicsBody::resting(GRAVITY_ACCEL, ground),
            health: Health::full(PLAYER_MAX_HEALTH),
            speed: WALK_SPEED,
            held_projectiles: 0,
            is_jumping: false,
            walk_held: false,
            last_damage_at: None,
            last_throw_at: None,
            last_walk_cue_at: None,
            animator: Animator::new(WALK_FRAMES),
            death: None,
        }
    }

    /// One 60 Hz movement step. Returns a projectile when a throw happens.
    pub(crate) fn update_movement(
        &mut self,
        input: &PlayerInput,
        now: Duration,
        level_end_x: f32,
        events: &mut GameEventBus,
    ) -> Option<Projectile> {
        self.walk_held = input.left || input.right;
        if self.is_dead() {
            return None;
        }

        if input.right && self.body.x < level_end_x {
            self.body.x = (self.body.x + self.speed).min(level_end_x);
            self.body.facing_left = false;
            self.play_walk_cue(now, events);
        }
        if input.left && self.body.x > 0.0 {
            self.body.x = (self.body.x - self.speed).max(0.0);
            self.body.facing_left = true;
            self.play_walk_cue(now, events);
        }
        if input.jump && !self.is_jumping && !self.is_airborne() {
            self.physics.vertical_velocity = JUMP_VELOCITY;
            self.is_jumping = true;
            events.play_once(SoundCue::CharacterJump);
        }
        if input.action {
            return self.try_throw(now, events);
        }
        None
    }

    fn play_walk_cue(&mut self, now: Duration, events: &mut GameEventBus) {
        if self.is_airborne() || !window_elapsed(self.last_walk_cue_at, now, WALK_CUE_INTERVAL) {
            return;
        }
        self.last_walk_cue_at = Some(now);
        events.play_once(SoundCue::CharacterWalk);
    }

    fn try_throw(&mut self, now: Duration, events: &mut GameEventBus) -> Option<Projectile> {
        if self.held_projectiles == 0 || !window_elapsed(self.last_throw_at, now, THROW_COOLDOWN)
        {
            return None;
        }
        self.held_projectiles -= 1;
        self.last_throw_at = Some(now);
        events.play_once(SoundCue::ThrowStone);
        events.emit(GameEvent::ProjectileThrown {
            remaining: self.held_projectiles,
        });
        Some(Projectile::launch(
            self.body.center_x(),
            self.body.center_y(),
            self.body.facing_left,
        ))
    }

    pub(crate) fn apply_gravity(&mut self) {
        if apply_gravity(&mut self.body, &mut self.physics) == GravityStep::Landed {
            self.is_jumping = false;
        }
    }

    /// Returns `true` when the hit landed.
    pub(crate) fn take_damage(
        &mut self,
        amount: u32,
        now: Duration,
        events: &mut GameEventBus,
    ) -> bool {
        if self.is_dead() || !window_elapsed(self.last_damage_at, now, DAMAGE_COOLDOWN) {
            return false;
        }
        let remaining = self.health.take(amount);
        self.last_damage_at = Some(now);
        events.play_once(SoundCue::CharacterHurt);
        events.emit(GameEvent::PlayerDamaged { health: remaining });
        if remaining == 0 {
            self.die(events);
        }
        true
    }

    fn die(&mut self, events: &mut GameEventBus) {
        if self.death.is_some() {
            return;
        }
        self.death = Some(DeathSequence::new(DEAD_FRAMES));
        self.walk_held = false;
        events.play_once(SoundCue::CharacterDeath);
        events.emit(GameEvent::PlayerDied);
    }

    pub(crate) fn state(&self, now: Duration) -> PlayerState {
        if self.is_dead() {
            PlayerState::Dead
        } else if self
            .last_damage_at
            .is_some_and(|at| now.saturating_sub(at) < HURT_DISPLAY)
        {
            PlayerState::Hurt
        } else if self.is_airborne() {
            PlayerState::Jumping
        } else if self.walk_held {
            PlayerState::Walking
        } else {
            PlayerState::Idle
        }
    }

    pub(crate) fn advance_animation(&mut self, now: Duration) {
        match self.state(now) {
            PlayerState::Dead => {
                if let Some(death) = self.death.as_mut() {
                    death.advance(now);
                }
            }
            PlayerState::Hurt => self.animator.advance(HURT_FRAMES),
            PlayerState::Jumping => self.animator.advance(JUMP_FRAMES),
            PlayerState::Walking => self.animator.advance(WALK_FRAMES),
            PlayerState::Idle => self.animator.hold_first(WALK_FRAMES),
        }
    }

    pub(crate) fn take_game_over_signal(&mut self, now: Duration) -> bool {
        self.death
            .as_mut()
            .is_some_and(|death| death.take_signal(now, DEATH_TRAILING_DELAY))
    }

    pub(crate) fn can_stomp(&self, enemy: &Body) -> bool {
        self.is_jumping
            && self.physics.vertical_velocity <= 0.0
            && self.body.bottom() <= enemy.y + STOMP_REACH
    }

    pub(crate) fn stomp_bounce(&mut self) {
        self.physics.vertical_velocity = STOMP_BOUNCE_VELOCITY;
        self.is_jumping = false;
    }

    pub(crate) fn collect_stone(&mut self) -> u32 {
        self.held_projectiles = self.held_projectiles.saturating_add(1);
        self.held_projectiles
    }

    pub(crate) fn is_airborne(&self) -> bool {
        self.physics.ground.is_above(self.body.y)
    }

    pub(crate) fn is_dead(&self) -> bool {
        self.health.is_depleted()
    }

    pub(crate) fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    #[cfg(test)]
    pub(crate) fn death_animation_complete(&self) -> bool {
        self.death
            .as_ref()
            .is_some_and(DeathSequence::animation_complete)
    }

    pub(crate) fn held_projectiles(&self) -> u32 {
        self.held_projectiles
    }

    pub(crate) fn health(&self) -> &Health {
        &self.health
    }

    pub(crate) fn body(&self) -> &Body {
        &self.body
    }

    pub(crate) fn vertical_velocity(&self) -> f32 {
        self.physics.vertical_velocity
    }

    #[cfg(test)]
    pub(crate) fn place_mid_jump(&mut self, y: f32, vertical_velocity: f32) {
        self.body.y = y;
        self.physics.vertical_velocity = vertical_velocity;
        self.is_jumping = true;
    }

    #[cfg(test)]
    pub(crate) fn place_at_x(&mut self, x: f32) {
        self.body.x = x;
    }

    #[cfg(test)]
    pub(crate) fn give_projectiles(&mut self, count: u32) {
        self.held_projectiles = count;
    }
}

impl Collidable for Player {
    fn collision_box(&self) -> Aabb {
        self.body.collision_box()
    }
}

impl Drawable for Player {
    fn sprite_view(&self) -> SpriteView {
        let key = match &self.death {
            Some(death) => death.sprite_key(),
            None => self.animator.sprite_key(),
        };
        SpriteView::of_body(key, DrawLayer::Player, &self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::audio::SoundCommand;

    const LEVEL_END_X: f32 = 2500.0;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn cue_count(events: &GameEventBus, cue: SoundCue) -> usize {
        events
            .sound_commands()
            .filter(|command| *command == SoundCommand::PlayOnce(cue))
            .count()
    }

    fn right() -> PlayerInput {
        PlayerInput {
            right: true,
            ..PlayerInput::default()
        }
    }

    #[test]
    fn moving_right_advances_by_speed_per_step() {
        let mut player = Player::new();
        let mut events = GameEventBus::default();
        for step in 0..10u64 {
            player.update_movement(&right(), ms(step * 16), LEVEL_END_X, &mut events);
        }

        assert!((player.body().x - 52.0).abs() < 1e-3, "x={}", player.body().x);
        assert!(!player.body().facing_left);
    }

    #[test]
    fn position_is_clamped_to_level_bounds() {
        let mut player = Player::new();
        let mut events = GameEventBus::default();
        let left = PlayerInput {
            left: true,
            ..PlayerInput::default()
        };
        player.update_movement(&left, ms(0), LEVEL_END_X, &mut events);
        assert_eq!(player.body().x, 0.0);

        for step in 0..600u64 {
            player.update_movement(&right(), ms(step * 16), LEVEL_END_X, &mut events);
        }
        assert_eq!(player.body().x, LEVEL_END_X);
    }

    #[test]
    fn walk_cue_is_rate_limited() {
        let mut player = Player::new();
        let mut events = GameEventBus::default();
        for step in 0..25u64 {
            player.update_movement(&right(), ms(step * 16), LEVEL_END_X, &mut events);
        }

        // Steps at 0 ms and 336 ms.
        assert_eq!(cue_count(&events, SoundCue::CharacterWalk), 2);
    }

    #[test]
    fn jump_requires_ground_and_sets_state() {
        let mut player = Player::new();
        let mut events = GameEventBus::default();
        let jump = PlayerInput {
            jump: true,
            ..PlayerInput::default()
        };
        player.update_movement(&jump, ms(0), LEVEL_END_X, &mut events);
        assert!(player.is_jumping());
        assert_eq!(player.vertical_velocity(), 19.5);

        player.apply_gravity();
        player.update_movement(&jump, ms(16), LEVEL_END_X, &mut events);
        assert_eq!(cue_count(&events, SoundCue::CharacterJump), 1);
        assert_eq!(player.state(ms(16)), PlayerState::Jumping);
    }

    #[test]
    fn held_jump_waits_for_liftoff_before_retriggering() {
        let mut player = Player::new();
        let mut events = GameEventBus::default();
        let jump = PlayerInput {
            jump: true,
            ..PlayerInput::default()
        };
        for tick in 0..3u64 {
            player.update_movement(&jump, ms(tick * 16), LEVEL_END_X, &mut events);
        }

        assert_eq!(player.body().y, 330.0);
        assert_eq!(cue_count(&events, SoundCue::CharacterJump), 1);
    }

    #[test]
    fn landing_clears_jumping() {
        let mut player = Player::new();
        let mut events = GameEventBus::default();
        let jump = PlayerInput {
            jump: true,
            ..PlayerInput::default()
        };
        player.update_movement(&jump, ms(0), LEVEL_END_X, &mut events);
        for _ in 0..60 {
            player.apply_gravity();
        }

        assert!(!player.is_jumping());
        assert_eq!(player.body().y, 330.0);
    }

    #[test]
    fn damage_respects_cooldown_and_clamps() {
        let mut player = Player::new();
        let mut events = GameEventBus::default();

        assert!(player.take_damage(CONTACT_DAMAGE, ms(0), &mut events));
        assert!(!player.take_damage(CONTACT_DAMAGE, ms(999), &mut events));
        assert_eq!(player.health().current(), 75);
        assert!(player.take_damage(CONTACT_DAMAGE, ms(1000), &mut events));
        assert_eq!(player.health().current(), 50);
        assert!(player.take_damage(500, ms(2000), &mut events));
        assert_eq!(player.health().current(), 0);
        assert!(!player.take_damage(CONTACT_DAMAGE, ms(5000), &mut events));
        assert_eq!(cue_count(&events, SoundCue::CharacterDeath), 1);
        assert_eq!(cue_count(&events, SoundCue::CharacterHurt), 3);
    }

    #[test]
    fn animation_priority_prefers_hurt_over_jumping() {
        let mut player = Player::new();
        let mut events = GameEventBus::default();
        player.place_mid_jump(200.0, 3.0);
        assert_eq!(player.state(ms(0)), PlayerState::Jumping);

        player.take_damage(CONTACT_DAMAGE, ms(100), &mut events);
        assert_eq!(player.state(ms(500)), PlayerState::Hurt);
        assert_eq!(player.state(ms(1100)), PlayerState::Jumping);
    }

    #[test]
    fn idle_holds_first_walk_frame() {
        let mut player = Player::new();
        player.advance_animation(ms(0));
        player.advance_animation(ms(130));

        assert_eq!(player.sprite_view().key, "character/walk/01");
    }

    #[test]
    fn throw_requires_ammo_and_honours_cooldown() {
        let mut player = Player::new();
        let mut events = GameEventBus::default();
        let throw = PlayerInput {
            action: true,
            ..PlayerInput::default()
        };
        assert!(player
            .update_movement(&throw, ms(0), LEVEL_END_X, &mut events)
            .is_none());

        player.give_projectiles(2);
        let first = player.update_movement(&throw, ms(10), LEVEL_END_X, &mut events);
        let second = player.update_movement(&throw, ms(400), LEVEL_END_X, &mut events);
        let third = player.update_movement(&throw, ms(510), LEVEL_END_X, &mut events);

        let first = first.expect("first throw");
        assert_eq!(first.body().x, 70.0);
        assert_eq!(first.body().y, 405.0);
        assert!(second.is_none());
        assert!(third.is_some());
        assert_eq!(player.held_projectiles(), 0);
    }

    #[test]
    fn death_sequence_signals_once_after_trailing_delay() {
        let mut player = Player::new();
        let mut events = GameEventBus::default();
        player.take_damage(PLAYER_MAX_HEALTH, ms(0), &mut events);

        for frame in 1..=10u64 {
            player.advance_animation(ms(frame * 130));
        }
        assert!(player.death_animation_complete());
        assert_eq!(player.sprite_view().key, "character/dead/10");

        assert!(!player.take_game_over_signal(ms(1300 + 1999)));
        assert!(player.take_game_over_signal(ms(1300 + 2000)));
        assert!(!player.take_game_over_signal(ms(10_000)));
    }

    #[test]
    fn dead_player_ignores_movement() {
        let mut player = Player::new();
        let mut events = GameEventBus::default();
        player.take_damage(PLAYER_MAX_HEALTH, ms(0), &mut events);
        player.update_movement(&right(), ms(16), LEVEL_END_X, &mut events);

        assert_eq!(player.body().x, 0.0);
        assert_eq!(player.state(ms(16)), PlayerState::Dead);
    }
}
