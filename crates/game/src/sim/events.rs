use tracing::{debug, info};

use super::audio::{SoundCommand, SoundCue};
use super::grunt::GruntSkin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DefeatCause {
    Stomp,
    Projectile,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum GameEvent {
    Sound(SoundCommand),
    PlayerDamaged { health: u32 },
    PlayerDied,
    ProjectileThrown { remaining: u32 },
    GruntDefeated { skin: GruntSkin, cause: DefeatCause },
    CoinCollected { coins: u32 },
    StoneCollected { ammo: u32 },
    BossActivated,
    BossDamaged { health: u32 },
    BossDied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GameEventKind {
    Sound,
    PlayerDamaged,
    PlayerDied,
    ProjectileThrown,
    GruntDefeated,
    CoinCollected,
    StoneCollected,
    BossActivated,
    BossDamaged,
    BossDied,
}

impl GameEvent {
    pub(crate) fn kind(&self) -> GameEventKind {
        match self {
            GameEvent::Sound(_) => GameEventKind::Sound,
            GameEvent::PlayerDamaged { .. } => GameEventKind::PlayerDamaged,
            GameEvent::PlayerDied => GameEventKind::PlayerDied,
            GameEvent::ProjectileThrown { .. } => GameEventKind::ProjectileThrown,
            GameEvent::GruntDefeated { .. } => GameEventKind::GruntDefeated,
            GameEvent::CoinCollected { .. } => GameEventKind::CoinCollected,
            GameEvent::StoneCollected { .. } => GameEventKind::StoneCollected,
            GameEvent::BossActivated => GameEventKind::BossActivated,
            GameEvent::BossDamaged { .. } => GameEventKind::BossDamaged,
            GameEvent::BossDied => GameEventKind::BossDied,
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Sound(_) => {}
        GameEvent::PlayerDamaged { health } => debug!(health, "player_damaged"),
        GameEvent::PlayerDied => info!("player_died"),
        GameEvent::ProjectileThrown { remaining } => debug!(remaining, "projectile_thrown"),
        GameEvent::GruntDefeated { skin, cause } => {
            debug!(skin = skin.token(), cause = ?cause, "grunt_defeated");
        }
        GameEvent::CoinCollected { coins } => debug!(coins, "coin_collected"),
        GameEvent::StoneCollected { ammo } => debug!(ammo, "stone_collected"),
        GameEvent::BossActivated => info!("boss_activated"),
        GameEvent::BossDamaged { health } => debug!(health, "boss_damaged"),
        GameEvent::BossDied => info!("boss_died"),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct GameEventCounts {
    pub(crate) sounds: u32,
    pub(crate) player_hits: u32,
    pub(crate) defeats: u32,
    pub(crate) pickups: u32,
    pub(crate) throws: u32,
    pub(crate) boss_hits: u32,
    pub(crate) phase_changes: u32,
}

impl GameEventCounts {
    fn record(&mut self, kind: GameEventKind) {
        let counter = match kind {
            GameEventKind::Sound => &mut self.sounds,
            GameEventKind::PlayerDamaged => &mut self.player_hits,
            GameEventKind::GruntDefeated | GameEventKind::BossDied => &mut self.defeats,
            GameEventKind::CoinCollected | GameEventKind::StoneCollected => &mut self.pickups,
            GameEventKind::ProjectileThrown => &mut self.throws,
            GameEventKind::BossDamaged => &mut self.boss_hits,
            GameEventKind::PlayerDied | GameEventKind::BossActivated => &mut self.phase_changes,
        };
        *counter = counter.saturating_add(1);
    }

    /// Adds another tally into this one.
    pub(crate) fn absorb(&mut self, other: GameEventCounts) {
        self.sounds = self.sounds.saturating_add(other.sounds);
        self.player_hits = self.player_hits.saturating_add(other.player_hits);
        self.defeats = self.defeats.saturating_add(other.defeats);
        self.pickups = self.pickups.saturating_add(other.pickups);
        self.throws = self.throws.saturating_add(other.throws);
        self.boss_hits = self.boss_hits.saturating_add(other.boss_hits);
        self.phase_changes = self.phase_changes.saturating_add(other.phase_changes);
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Per-tick event buffer. Entities emit into it; the world drains sound
/// commands to the audio sink and rolls the rest into counts.
#[derive(Debug, Default)]
pub(crate) struct GameEventBus {
    current_tick_events: Vec<GameEvent>,
    last_tick_counts: GameEventCounts,
}

impl GameEventBus {
    pub(crate) fn emit(&mut self, event: GameEvent) {
        log_event(&event);
        self.current_tick_events.push(event);
    }

    pub(crate) fn play_once(&mut self, cue: SoundCue) {
        self.emit(GameEvent::Sound(SoundCommand::PlayOnce(cue)));
    }

    pub(crate) fn play_looping(&mut self, cue: SoundCue) {
        self.emit(GameEvent::Sound(SoundCommand::PlayLooping(cue)));
    }

    pub(crate) fn stop(&mut self, cue: SoundCue) {
        self.emit(GameEvent::Sound(SoundCommand::Stop(cue)));
    }

    #[cfg(test)]
    pub(crate) fn iter_emitted_so_far(&self) -> impl Iterator<Item = &GameEvent> {
        self.current_tick_events.iter()
    }

    pub(crate) fn sound_commands(&self) -> impl Iterator<Item = SoundCommand> + '_ {
        self.current_tick_events.iter().filter_map(|event| match event {
            GameEvent::Sound(command) => Some(*command),
            _ => None,
        })
    }

    pub(crate) fn finish_tick_rollover(&mut self) {
        let mut counts = GameEventCounts::default();
        for event in &self.current_tick_events {
            counts.record(event.kind());
        }
        self.last_tick_counts = counts;
        self.current_tick_events.clear();
    }

    pub(crate) fn last_tick_counts(&self) -> GameEventCounts {
        self.last_tick_counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollover_counts_and_clears_events() {
        let mut bus = GameEventBus::default();
        bus.play_once(SoundCue::CollectCoin);
        bus.emit(GameEvent::CoinCollected { coins: 1 });
        bus.emit(GameEvent::PlayerDamaged { health: 75 });

        assert_eq!(bus.iter_emitted_so_far().count(), 3);
        bus.finish_tick_rollover();

        let counts = bus.last_tick_counts();
        assert_eq!(counts.sounds, 1);
        assert_eq!(counts.pickups, 1);
        assert_eq!(counts.player_hits, 1);
        assert_eq!(bus.iter_emitted_so_far().count(), 0);
    }

    #[test]
    fn sound_commands_preserve_emission_order() {
        let mut bus = GameEventBus::default();
        bus.stop(SoundCue::GameMusic);
        bus.emit(GameEvent::BossActivated);
        bus.play_once(SoundCue::EndbossActivation);
        bus.play_looping(SoundCue::EndbossFight);

        let commands: Vec<SoundCommand> = bus.sound_commands().collect();
        assert_eq!(
            commands,
            vec![
                SoundCommand::Stop(SoundCue::GameMusic),
                SoundCommand::PlayOnce(SoundCue::EndbossActivation),
                SoundCommand::PlayLooping(SoundCue::EndbossFight),
            ]
        );
    }

    #[test]
    fn absorb_accumulates_every_counter() {
        let mut bus = GameEventBus::default();
        bus.emit(GameEvent::GruntDefeated {
            skin: GruntSkin::A,
            cause: DefeatCause::Stomp,
        });
        bus.emit(GameEvent::BossDamaged { health: 80 });
        bus.finish_tick_rollover();

        let mut session = GameEventCounts::default();
        session.absorb(bus.last_tick_counts());
        session.absorb(bus.last_tick_counts());

        assert_eq!(session.defeats, 2);
        assert_eq!(session.boss_hits, 2);
        assert_eq!(session.pickups, 0);
    }

    #[test]
    fn quiet_tick_has_empty_counts() {
        let mut bus = GameEventBus::default();
        bus.finish_tick_rollover();
        assert!(bus.last_tick_counts().is_empty());
    }
}
