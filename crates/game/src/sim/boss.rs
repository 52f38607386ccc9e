use std::time::Duration;

use tracing::{debug, info};

use super::animation::{Animator, DeathSequence, FrameSet, OneShot};
use super::audio::SoundCue;
use super::cadence::window_elapsed;
use super::entity::{Aabb, Body, Collidable, DrawLayer, Drawable, Health, Inset, SpriteView};
use super::events::{GameEvent, GameEventBus};

pub(crate) const BOSS_START_X: f32 = 2550.0;
const BOSS_Y: f32 = 200.0;
const BOSS_WIDTH: f32 = 400.0;
const BOSS_HEIGHT: f32 = 350.0;
pub(crate) const BOSS_MAX_HEALTH: u32 = 90;
const BOSS_INSET: Inset = Inset::new(130.0, 185.0, 90.0, 90.0);
const ATTACK_LEFT_INSET: f32 = 60.0;
const ROAM_SPEED: f32 = 0.45;
pub(crate) const ACTIVATION_X: f32 = 2000.0;
pub(crate) const PROJECTILE_DAMAGE: u32 = 30;
const ATTACK_INTERVAL: Duration = Duration::from_secs(2);
const HURT_DURATION: Duration = Duration::from_millis(500);
const STEP_CUE_INTERVAL: Duration = Duration::from_millis(500);
pub(crate) const DEATH_TRAILING_DELAY: Duration = Duration::from_secs(2);

const WALK_FRAMES: FrameSet = FrameSet::new("endboss/walk", 6);
const ATTACK_FRAMES: FrameSet = FrameSet::new("endboss/attack", 4);
const HURT_FRAMES: FrameSet = FrameSet::new("endboss/hurt", 2);
const DEAD_FRAMES: FrameSet = FrameSet::new("endboss/dead", 6);

/// Encounter phases. Once activated the boss never returns to `Dormant`,
/// and `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BossPhase {
    Dormant,
    Activating,
    Roaming,
    Attacking,
    Hurt,
    Dead,
}

#[derive(Debug, Clone)]
pub(crate) struct EndBoss {
    body: Body,
    health: Health,
    speed: f32,
    phase: BossPhase,
    has_activated: bool,
    animator: Animator,
    scripted: Option<OneShot>,
    next_attack_at: Option<Duration>,
    hurt_since: Option<Duration>,
    last_step_cue_at: Option<Duration>,
    death: Option<DeathSequence>,
}

impl EndBoss {
    pub(crate) fn new(x: f32) -> Self {
        Self {
            body: Body::new(x, BOSS_Y, BOSS_WIDTH, BOSS_HEIGHT, BOSS_INSET),
            health: Health::full(BOSS_MAX_HEALTH),
            speed: ROAM_SPEED,
            phase: BossPhase::Dormant,
            has_activated: false,
            animator: Animator::new(WALK_FRAMES),
            scripted: None,
            next_attack_at: None,
            hurt_since: None,
            last_step_cue_at: None,
            death: None,
        }
    }

    /// Wakes the boss the first time the player passes the activation line.
    pub(crate) fn try_activate(&mut self, player_x: f32, events: &mut GameEventBus) -> bool {
        if self.has_activated || self.phase != BossPhase::Dormant || player_x <= ACTIVATION_X {
            return false;
        }
        self.has_activated = true;
        self.phase = BossPhase::Activating;
        self.scripted = Some(OneShot::new(ATTACK_FRAMES));
        events.stop(SoundCue::GameMusic);
        events.play_once(SoundCue::EndbossActivation);
        events.play_looping(SoundCue::EndbossFight);
        events.emit(GameEvent::BossActivated);
        true
    }

    /// One 60 Hz movement step.
    pub(crate) fn step_movement(&mut self, now: Duration, events: &mut GameEventBus) {
        if self.phase != BossPhase::Roaming {
            return;
        }
        if self.next_attack_at.is_some_and(|at| now >= at) {
            self.begin_attack();
            return;
        }
        self.body.x -= self.speed;
        if window_elapsed(self.last_step_cue_at, now, STEP_CUE_INTERVAL) {
            self.last_step_cue_at = Some(now);
            events.play_once(SoundCue::EndbossStep);
        }
    }

    fn begin_attack(&mut self) {
        self.phase = BossPhase::Attacking;
        self.scripted = Some(OneShot::new(ATTACK_FRAMES));
        self.next_attack_at = None;
        self.body.inset.left = ATTACK_LEFT_INSET;
        debug!(boss_x = self.body.x, "boss_attack_started");
    }

    fn resume_roaming(&mut self, now: Duration) {
        self.phase = BossPhase::Roaming;
        self.scripted = None;
        self.body.inset = BOSS_INSET;
        self.next_attack_at = Some(now + ATTACK_INTERVAL);
    }

    pub(crate) fn advance_animation(&mut self, now: Duration) {
        match self.phase {
            BossPhase::Dormant => self.animator.hold_first(WALK_FRAMES),
            BossPhase::Activating | BossPhase::Attacking => {
                let finished = self.scripted.as_mut().map_or(true, OneShot::advance);
                if finished {
                    if self.phase == BossPhase::Activating {
                        info!(boss_x = self.body.x, "boss_roaming");
                    }
                    self.resume_roaming(now);
                }
            }
            BossPhase::Roaming => self.animator.advance(WALK_FRAMES),
            BossPhase::Hurt => {
                self.animator.advance(HURT_FRAMES);
                let recovered = self
                    .hurt_since
                    .map_or(true, |at| now.saturating_sub(at) > HURT_DURATION);
                if recovered {
                    self.hurt_since = None;
                    self.resume_roaming(now);
                }
            }
            BossPhase::Dead => {}
        }
    }

    pub(crate) fn advance_death_animation(&mut self, now: Duration) {
        if let Some(death) = self.death.as_mut() {
            death.advance(now);
        }
    }

    /// Applies damage. A hit while roaming or attacking interrupts the attack,
    /// drops the widened hitbox and restarts the attack cooldown after recovery.
    pub(crate) fn take_hit(
        &mut self,
        damage: u32,
        now: Duration,
        events: &mut GameEventBus,
    ) -> bool {
        if self.phase == BossPhase::Dead {
            return false;
        }
        let remaining = self.health.take(damage);
        events.emit(GameEvent::BossDamaged { health: remaining });
        if remaining == 0 {
            self.die(events);
            return true;
        }
        events.play_once(SoundCue::EndbossHurt);
        if matches!(
            self.phase,
            BossPhase::Roaming | BossPhase::Attacking | BossPhase::Hurt
        ) {
            self.phase = BossPhase::Hurt;
            self.scripted = None;
            self.body.inset = BOSS_INSET;
            self.next_attack_at = None;
            self.hurt_since = Some(now);
        }
        true
    }

    fn die(&mut self, events: &mut GameEventBus) {
        self.phase = BossPhase::Dead;
        self.scripted = None;
        self.next_attack_at = None;
        self.hurt_since = None;
        self.body.inset = BOSS_INSET;
        self.death = Some(DeathSequence::new(DEAD_FRAMES));
        events.play_once(SoundCue::EndbossDeath);
        events.emit(GameEvent::BossDied);
    }

    pub(crate) fn take_game_won_signal(&mut self, now: Duration) -> bool {
        self.death
            .as_mut()
            .is_some_and(|death| death.take_signal(now, DEATH_TRAILING_DELAY))
    }

    pub(crate) fn phase(&self) -> BossPhase {
        self.phase
    }

    pub(crate) fn is_dead(&self) -> bool {
        self.phase == BossPhase::Dead
    }

    pub(crate) fn has_activated(&self) -> bool {
        self.has_activated
    }

    #[cfg(test)]
    pub(crate) fn death_animation_complete(&self) -> bool {
        self.death
            .as_ref()
            .is_some_and(DeathSequence::animation_complete)
    }

    pub(crate) fn health(&self) -> &Health {
        &self.health
    }

    pub(crate) fn body(&self) -> &Body {
        &self.body
    }
}

impl Collidable for EndBoss {
    fn collision_box(&self) -> Aabb {
        self.body.collision_box()
    }
}

impl Drawable for EndBoss {
    fn sprite_view(&self) -> SpriteView {
        let key = match (&self.death, &self.scripted) {
            (Some(death), _) => death.sprite_key(),
            (None, Some(scripted)) => scripted.sprite_key(),
            (None, None) => self.animator.sprite_key(),
        };
        SpriteView::of_body(key, DrawLayer::Boss, &self.body)
    }
}
