//! Recording collaborators for simulation tests.

use super::audio::{AudioSink, SoundCommand, SoundCue};
use super::world::ScreenSignals;

#[derive(Debug, Default)]
pub(crate) struct RecordingAudio {
    pub(crate) commands: Vec<SoundCommand>,
    pub(crate) muted: bool,
}

impl AudioSink for RecordingAudio {
    fn play_once(&mut self, cue: SoundCue) {
        self.commands.push(SoundCommand::PlayOnce(cue));
    }

    fn play_looping(&mut self, cue: SoundCue) {
        self.commands.push(SoundCommand::PlayLooping(cue));
    }

    fn stop(&mut self, cue: SoundCue) {
        self.commands.push(SoundCommand::Stop(cue));
    }

    fn stop_all(&mut self) {
        self.commands.push(SoundCommand::StopAll);
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSignals {
    pub(crate) game_over: u32,
    pub(crate) game_won: u32,
}

impl ScreenSignals for RecordingSignals {
    fn on_game_over(&mut self) {
        self.game_over += 1;
    }

    fn on_game_won(&mut self) {
        self.game_won += 1;
    }
}
