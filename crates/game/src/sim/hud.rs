use super::boss::EndBoss;
use super::entity::Health;
use super::player::Player;

pub(crate) const HEALTH_BAR_ORIGIN: (f32, f32) = (10.0, 5.0);
pub(crate) const HEALTH_BAR_SIZE: (f32, f32) = (200.0, 40.0);
pub(crate) const AMMO_BAR_ORIGIN: (f32, f32) = (10.0, 50.0);
pub(crate) const AMMO_BAR_SIZE: (f32, f32) = (200.0, 30.0);
pub(crate) const COIN_COUNTER_ORIGIN: (f32, f32) = (20.0, 90.0);
pub(crate) const BOSS_BAR_ORIGIN: (f32, f32) = (720.0 - 200.0 - 10.0, 5.0);
pub(crate) const HEALTH_ICON_SIZE: (f32, f32) = (12.0, 20.0);
pub(crate) const HEALTH_ICON_SPACING: f32 = 5.0;
pub(crate) const AMMO_ICON_SIZE: (f32, f32) = (25.0, 15.0);
pub(crate) const AMMO_ICON_SPACING: f32 = 3.0;
const MAX_AMMO_ICONS: u32 = 6;

/// Fixed-position UI state, independent of the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HudSnapshot {
    pub(crate) health_icons: u32,
    pub(crate) ammo_icons: u32,
    pub(crate) coins: u32,
    pub(crate) boss_icons: Option<u32>,
}

impl HudSnapshot {
    pub(crate) fn capture(player: &Player, boss: &EndBoss, coins: u32) -> Self {
        Self {
            health_icons: health_icons(player.health()),
            ammo_icons: player.held_projectiles().min(MAX_AMMO_ICONS),
            coins,
            boss_icons: boss.has_activated().then(|| health_icons(boss.health())),
        }
    }
}

/// One icon per started tenth of health.
pub(crate) fn health_icons(health: &Health) -> u32 {
    (health.percentage() / 10.0).ceil() as u32
}
