use std::time::Duration;

use tracing::{debug, info};

use super::audio::{AudioSink, SoundCommand, SoundCue};
use super::cadence::WorldCadences;
use super::entity::{Drawable, SpriteView};
use super::events::{GameEvent, GameEventBus, GameEventCounts};
use super::hud::HudSnapshot;
use super::level::Level;
use super::player::{Player, PlayerInput};
use super::projectile::Projectile;
use super::resolver::{resolve_combat, ResolveReport};

const CAMERA_LEAD: f32 = 100.0;

/// The two terminal notifications the world raises, each at most once.
pub(crate) trait ScreenSignals {
    fn on_game_over(&mut self);
    fn on_game_won(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    GameOver,
    GameWon,
}

/// Owns every live entity of one play session and advances them on fixed cadences.
/// Dropping the world drops its schedule with it.
#[derive(Debug)]
pub(crate) struct World<A: AudioSink, S: ScreenSignals> {
    player: Player,
    level: Level,
    projectiles: Vec<Projectile>,
    coins: u32,
    camera_offset_x: f32,
    clock: Duration,
    cadences: WorldCadences,
    events: GameEventBus,
    session_counts: GameEventCounts,
    outcome: Option<Outcome>,
    audio: A,
    signals: S,
}

impl<A: AudioSink, S: ScreenSignals> World<A, S> {
    pub(crate) fn new(level: Level, mut audio: A, signals: S) -> Self {
        let player = Player::new();
        audio.play_looping(SoundCue::GameMusic);
        info!(
            grunts = level.grunts.len(),
            coins = level.coins.len(),
            stones = level.stones.len(),
            level_end_x = level.level_end_x,
            "world_created"
        );
        Self {
            camera_offset_x: -player.body().x + CAMERA_LEAD,
            player,
            level,
            projectiles: Vec::new(),
            coins: 0,
            clock: Duration::ZERO,
            cadences: WorldCadences::default(),
            events: GameEventBus::default(),
            session_counts: GameEventCounts::default(),
            outcome: None,
            audio,
            signals,
        }
    }

    /// Advances the session by `dt`. Each cadence runs as many whole steps as
    /// `dt` covers, in a fixed order. Once an outcome is set the world is frozen.
    pub(crate) fn tick(&mut self, dt: Duration, input: &PlayerInput) {
        if self.outcome.is_some() {
            return;
        }
        self.clock = self.clock.saturating_add(dt);
        let now = self.clock;

        for _ in 0..self.cadences.movement.advance(dt) {
            self.step_movement(input, now);
        }
        for _ in 0..self.cadences.gravity.advance(dt) {
            self.player.apply_gravity();
        }
        for _ in 0..self.cadences.projectile.advance(dt) {
            for projectile in &mut self.projectiles {
                projectile.step();
            }
        }
        self.step_animations(dt, now);
        for _ in 0..self.cadences.combat.advance(dt) {
            self.step_combat(now);
        }
        self.check_terminal(now);

        for command in self.events.sound_commands() {
            self.audio.apply(command);
        }
        self.events.finish_tick_rollover();
        self.session_counts.absorb(self.events.last_tick_counts());
    }

    fn step_movement(&mut self, input: &PlayerInput, now: Duration) {
        let thrown = self
            .player
            .update_movement(input, now, self.level.level_end_x, &mut self.events);
        if let Some(projectile) = thrown {
            self.projectiles.push(projectile);
        }
        for grunt in &mut self.level.grunts {
            grunt.step_movement();
        }
        self.level.boss.step_movement(now, &mut self.events);
        if !self.player.is_dead() {
            self.camera_offset_x = -self.player.body().x + CAMERA_LEAD;
        }
    }

    fn step_animations(&mut self, dt: Duration, now: Duration) {
        for _ in 0..self.cadences.player_animation.advance(dt) {
            self.player.advance_animation(now);
        }
        for _ in 0..self.cadences.grunt_animation.advance(dt) {
            for grunt in &mut self.level.grunts {
                grunt.advance_animation();
            }
        }
        let boss_steps = self.cadences.boss_animation.advance(dt);
        let death_steps = self.cadences.boss_death_animation.advance(dt);
        if self.level.boss.is_dead() {
            for _ in 0..death_steps {
                self.level.boss.advance_death_animation(now);
            }
        } else {
            for _ in 0..boss_steps {
                self.level.boss.advance_animation(now);
            }
        }
    }

    fn step_combat(&mut self, now: Duration) {
        let report = resolve_combat(
            &mut self.player,
            &mut self.level,
            &mut self.projectiles,
            &mut self.coins,
            now,
            &mut self.events,
        );
        if report != ResolveReport::default() {
            debug!(
                stomps = report.stomps,
                player_hits = report.player_hits,
                projectile_defeats = report.projectile_defeats,
                boss_hits = report.boss_hits,
                coins = report.coins_collected,
                stones = report.stones_collected,
                swept = report.projectiles_swept,
                "combat_resolved"
            );
        }
        self.level
            .boss
            .try_activate(self.player.body().x, &mut self.events);
    }

    fn check_terminal(&mut self, now: Duration) {
        let outcome = if self.player.take_game_over_signal(now) {
            Outcome::GameOver
        } else if self.level.boss.take_game_won_signal(now) {
            Outcome::GameWon
        } else {
            return;
        };
        self.outcome = Some(outcome);
        self.events.emit(GameEvent::Sound(SoundCommand::StopAll));
        match outcome {
            Outcome::GameOver => {
                info!(clock_ms = now.as_millis() as u64, coins = self.coins, "game_over");
                self.signals.on_game_over();
            }
            Outcome::GameWon => {
                info!(clock_ms = now.as_millis() as u64, coins = self.coins, "game_won");
                self.signals.on_game_won();
            }
        }
    }

    pub(crate) fn camera_offset_x(&self) -> f32 {
        self.camera_offset_x
    }

    pub(crate) fn player(&self) -> &Player {
        &self.player
    }

    #[cfg(test)]
    pub(crate) fn level(&self) -> &Level {
        &self.level
    }

    #[cfg(test)]
    pub(crate) fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub(crate) fn coins(&self) -> u32 {
        self.coins
    }

    pub(crate) fn clock(&self) -> Duration {
        self.clock
    }

    #[cfg(test)]
    pub(crate) fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub(crate) fn hud(&self) -> HudSnapshot {
        HudSnapshot::capture(&self.player, &self.level.boss, self.coins)
    }

    /// World-space sprites in paint order.
    pub(crate) fn drawables(&self) -> Vec<SpriteView> {
        let level = &self.level;
        let mut views = Vec::with_capacity(
            level.backgrounds.len() + level.clouds.len() + self.level.live_entity_count() + 1,
        );
        views.extend(level.backgrounds.iter().map(Drawable::sprite_view));
        views.extend(level.clouds.iter().map(Drawable::sprite_view));
        views.push(self.player.sprite_view());
        views.push(level.boss.sprite_view());
        views.extend(level.grunts.iter().map(Drawable::sprite_view));
        views.extend(level.coins.iter().map(Drawable::sprite_view));
        views.extend(level.stones.iter().map(Drawable::sprite_view));
        views.extend(self.projectiles.iter().map(Drawable::sprite_view));
        views
    }

    pub(crate) fn audio(&self) -> &A {
        &self.audio
    }

    pub(crate) fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub(crate) fn signals(&self) -> &S {
        &self.signals
    }

    /// Player, boss, grunts, pickups and live projectiles.
    pub(crate) fn entity_count(&self) -> usize {
        1 + self.level.live_entity_count() + self.projectiles.len()
    }

    /// Event totals since the world was created.
    pub(crate) fn session_counts(&self) -> GameEventCounts {
        self.session_counts
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[cfg(test)]
    pub(crate) fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    #[cfg(test)]
    pub(crate) fn push_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }
}
