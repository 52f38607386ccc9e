use std::time::Duration;

use super::audio::SoundCue;
use super::boss::PROJECTILE_DAMAGE;
use super::entity::Collidable;
use super::events::{DefeatCause, GameEvent, GameEventBus};
use super::level::Level;
use super::player::{Player, CONTACT_DAMAGE};
use super::projectile::Projectile;

/// What one combat pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ResolveReport {
    pub(crate) stomps: u32,
    pub(crate) player_hits: u32,
    pub(crate) projectile_defeats: u32,
    pub(crate) boss_hits: u32,
    pub(crate) coins_collected: u32,
    pub(crate) stones_collected: u32,
    pub(crate) projectiles_swept: usize,
}

/// One combat tick. Steps run in a fixed order and every removal is a
/// filter after the pass that flagged it.
pub(crate) fn resolve_combat(
    player: &mut Player,
    level: &mut Level,
    projectiles: &mut Vec<Projectile>,
    coins: &mut u32,
    now: Duration,
    events: &mut GameEventBus,
) -> ResolveReport {
    let mut report = ResolveReport::default();

    resolve_player_vs_grunts(player, level, now, events, &mut report);
    resolve_player_vs_boss(player, level, now, events, &mut report);
    resolve_projectiles_vs_grunts(level, projectiles, events, &mut report);
    resolve_projectiles_vs_boss(level, projectiles, now, events, &mut report);
    collect_coins(player, level, coins, events, &mut report);
    collect_stones(player, level, events, &mut report);

    let before = projectiles.len();
    projectiles.retain(|projectile| !projectile.is_spent());
    report.projectiles_swept = before - projectiles.len();

    report
}

fn resolve_player_vs_grunts(
    player: &mut Player,
    level: &mut Level,
    now: Duration,
    events: &mut GameEventBus,
    report: &mut ResolveReport,
) {
    if player.is_dead() {
        return;
    }
    for grunt in level.grunts.iter_mut().filter(|grunt| !grunt.is_dead()) {
        if !player.is_colliding(&*grunt) {
            continue;
        }
        if player.can_stomp(grunt.body()) {
            if grunt.hit(events) {
                events.emit(GameEvent::GruntDefeated {
                    skin: grunt.skin(),
                    cause: DefeatCause::Stomp,
                });
            }
            player.stomp_bounce();
            report.stomps += 1;
        } else if player.take_damage(CONTACT_DAMAGE, now, events) {
            report.player_hits += 1;
        }
    }
    level.grunts.retain(|grunt| !grunt.is_dead());
}

fn resolve_player_vs_boss(
    player: &mut Player,
    level: &Level,
    now: Duration,
    events: &mut GameEventBus,
    report: &mut ResolveReport,
) {
    if player.is_dead() || level.boss.is_dead() || !player.is_colliding(&level.boss) {
        return;
    }
    if player.take_damage(CONTACT_DAMAGE, now, events) {
        report.player_hits += 1;
    }
}

fn resolve_projectiles_vs_grunts(
    level: &mut Level,
    projectiles: &mut [Projectile],
    events: &mut GameEventBus,
    report: &mut ResolveReport,
) {
    for projectile in projectiles.iter_mut().filter(|p| !p.is_spent()) {
        let target = level
            .grunts
            .iter_mut()
            .find(|grunt| !grunt.is_dead() && projectile.is_colliding(&**grunt));
        let Some(grunt) = target else {
            continue;
        };
        if grunt.hit(events) {
            events.emit(GameEvent::GruntDefeated {
                skin: grunt.skin(),
                cause: DefeatCause::Projectile,
            });
            report.projectile_defeats += 1;
        }
        projectile.mark_spent();
    }
    level.grunts.retain(|grunt| !grunt.is_dead());
}

fn resolve_projectiles_vs_boss(
    level: &mut Level,
    projectiles: &mut [Projectile],
    now: Duration,
    events: &mut GameEventBus,
    report: &mut ResolveReport,
) {
    for projectile in projectiles.iter_mut().filter(|p| !p.is_spent()) {
        if level.boss.is_dead() || !projectile.is_colliding(&level.boss) {
            continue;
        }
        if level.boss.take_hit(PROJECTILE_DAMAGE, now, events) {
            report.boss_hits += 1;
        }
        projectile.mark_spent();
    }
}

fn collect_coins(
    player: &Player,
    level: &mut Level,
    coins: &mut u32,
    events: &mut GameEventBus,
    report: &mut ResolveReport,
) {
    let reach = player.collision_box();
    level.coins.retain(|coin| {
        if !reach.overlaps(&coin.collision_box()) {
            return true;
        }
        *coins = coins.saturating_add(1);
        report.coins_collected += 1;
        events.play_once(SoundCue::CollectCoin);
        events.emit(GameEvent::CoinCollected { coins: *coins });
        false
    });
}

fn collect_stones(
    player: &mut Player,
    level: &mut Level,
    events: &mut GameEventBus,
    report: &mut ResolveReport,
) {
    let reach = player.collision_box();
    level.stones.retain(|stone| {
        if !reach.overlaps(&stone.collision_box()) {
            return true;
        }
        let ammo = player.collect_stone();
        report.stones_collected += 1;
        events.play_once(SoundCue::CollectStone);
        events.emit(GameEvent::StoneCollected { ammo });
        false
    });
}
