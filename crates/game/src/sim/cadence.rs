use std::time::Duration;

pub(crate) const MOVEMENT_PERIOD: Duration = Duration::from_nanos(16_666_667);
pub(crate) const GRAVITY_PERIOD: Duration = Duration::from_millis(50);
pub(crate) const PROJECTILE_PERIOD: Duration = Duration::from_millis(50);
pub(crate) const COMBAT_PERIOD: Duration = Duration::from_millis(100);
pub(crate) const PLAYER_ANIMATION_PERIOD: Duration = Duration::from_millis(130);
pub(crate) const GRUNT_ANIMATION_PERIOD: Duration = Duration::from_millis(100);
pub(crate) const BOSS_ANIMATION_PERIOD: Duration = Duration::from_millis(200);
pub(crate) const BOSS_DEATH_ANIMATION_PERIOD: Duration = Duration::from_millis(215);

/// Elapsed-time accumulator that yields whole steps of a fixed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cadence {
    period: Duration,
    accumulated: Duration,
}

impl Cadence {
    pub(crate) const fn new(period: Duration) -> Self {
        Self {
            period,
            accumulated: Duration::ZERO,
        }
    }

    pub(crate) fn advance(&mut self, dt: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        self.accumulated = self.accumulated.saturating_add(dt);
        let mut steps = 0u32;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            steps = steps.saturating_add(1);
        }
        steps
    }
}

/// True when no previous timestamp exists or at least `window` has passed since it.
pub(crate) fn window_elapsed(last: Option<Duration>, now: Duration, window: Duration) -> bool {
    last.map_or(true, |at| now.saturating_sub(at) >= window)
}

/// The scheduler owned by the world; one cadence per repeating concern.
#[derive(Debug, Clone)]
pub(crate) struct WorldCadences {
    pub(crate) movement: Cadence,
    pub(crate) gravity: Cadence,
    pub(crate) projectile: Cadence,
    pub(crate) combat: Cadence,
    pub(crate) player_animation: Cadence,
    pub(crate) grunt_animation: Cadence,
    pub(crate) boss_animation: Cadence,
    pub(crate) boss_death_animation: Cadence,
}

impl Default for WorldCadences {
    fn default() -> Self {
        Self {
            movement: Cadence::new(MOVEMENT_PERIOD),
            gravity: Cadence::new(GRAVITY_PERIOD),
            projectile: Cadence::new(PROJECTILE_PERIOD),
            combat: Cadence::new(COMBAT_PERIOD),
            player_animation: Cadence::new(PLAYER_ANIMATION_PERIOD),
            grunt_animation: Cadence::new(GRUNT_ANIMATION_PERIOD),
            boss_animation: Cadence::new(BOSS_ANIMATION_PERIOD),
            boss_death_animation: Cadence::new(BOSS_DEATH_ANIMATION_PERIOD),
        }
    }
}
