#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum SoundCue {
    CharacterWalk,
    CharacterJump,
    CharacterHurt,
    CharacterDeath,
    ThrowStone,
    CollectCoin,
    CollectStone,
    Enemy1Dead,
    Enemy2Dead,
    EndbossActivation,
    EndbossStep,
    EndbossHurt,
    EndbossDeath,
    GameMusic,
    EndbossFight,
}

impl SoundCue {
    #[cfg(test)]
    pub(crate) const ALL: [SoundCue; 15] = [
        SoundCue::CharacterWalk,
        SoundCue::CharacterJump,
        SoundCue::CharacterHurt,
        SoundCue::CharacterDeath,
        SoundCue::ThrowStone,
        SoundCue::CollectCoin,
        SoundCue::CollectStone,
        SoundCue::Enemy1Dead,
        SoundCue::Enemy2Dead,
        SoundCue::EndbossActivation,
        SoundCue::EndbossStep,
        SoundCue::EndbossHurt,
        SoundCue::EndbossDeath,
        SoundCue::GameMusic,
        SoundCue::EndbossFight,
    ];

    /// Stable identifier used by sinks and logs.
    pub(crate) const fn id(self) -> &'static str {
        match self {
            SoundCue::CharacterWalk => "character_walk",
            SoundCue::CharacterJump => "character_jump",
            SoundCue::CharacterHurt => "character_hurt",
            SoundCue::CharacterDeath => "character_death",
            SoundCue::ThrowStone => "throw_stone",
            SoundCue::CollectCoin => "collect_coin",
            SoundCue::CollectStone => "collect_stone",
            SoundCue::Enemy1Dead => "enemy1_dead",
            SoundCue::Enemy2Dead => "enemy2_dead",
            SoundCue::EndbossActivation => "endboss_activation",
            SoundCue::EndbossStep => "endboss_step",
            SoundCue::EndbossHurt => "endboss_hurt",
            SoundCue::EndbossDeath => "endboss_death",
            SoundCue::GameMusic => "game_music",
            SoundCue::EndbossFight => "endboss_fight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SoundCommand {
    PlayOnce(SoundCue),
    PlayLooping(SoundCue),
    Stop(SoundCue),
    StopAll,
}

/// Fire-and-forget audio collaborator.
pub(crate) trait AudioSink {
    fn play_once(&mut self, cue: SoundCue);
    fn play_looping(&mut self, cue: SoundCue);
    fn stop(&mut self, cue: SoundCue);
    fn stop_all(&mut self);
    fn set_muted(&mut self, muted: bool);

    fn apply(&mut self, command: SoundCommand) {
        match command {
            SoundCommand::PlayOnce(cue) => self.play_once(cue),
            SoundCommand::PlayLooping(cue) => self.play_looping(cue),
            SoundCommand::Stop(cue) => self.stop(cue),
            SoundCommand::StopAll => self.stop_all(),
        }
    }
}
