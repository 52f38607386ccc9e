use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::sim::{AudioSink, SoundCue};

/// Audio collaborator for the desktop build: every request becomes a structured log
/// event, and looping cues are tracked so mute and stop requests stay consistent.
#[derive(Debug, Default)]
pub(crate) struct TracingAudioSink {
    muted: bool,
    active_loops: BTreeSet<SoundCue>,
    played: u64,
}

impl TracingAudioSink {
    pub(crate) fn new(muted: bool) -> Self {
        Self {
            muted,
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub(crate) fn is_muted(&self) -> bool {
        self.muted
    }

    #[cfg(test)]
    pub(crate) fn is_looping(&self, cue: SoundCue) -> bool {
        self.active_loops.contains(&cue)
    }

    /// One-shot cues actually voiced, muted ones excluded.
    pub(crate) fn played_count(&self) -> u64 {
        self.played
    }
}

impl AudioSink for TracingAudioSink {
    fn play_once(&mut self, cue: SoundCue) {
        if self.muted {
            return;
        }
        self.played = self.played.saturating_add(1);
        debug!(cue = cue.id(), "sound_play_once");
    }

    fn play_looping(&mut self, cue: SoundCue) {
        if self.active_loops.insert(cue) && !self.muted {
            debug!(cue = cue.id(), "sound_loop_started");
        }
    }

    fn stop(&mut self, cue: SoundCue) {
        if self.active_loops.remove(&cue) {
            debug!(cue = cue.id(), "sound_loop_stopped");
        }
    }

    fn stop_all(&mut self) {
        if !self.active_loops.is_empty() {
            debug!(loops = self.active_loops.len(), "sound_stop_all");
        }
        self.active_loops.clear();
    }

    fn set_muted(&mut self, muted: bool) {
        if self.muted == muted {
            return;
        }
        self.muted = muted;
        info!(muted, loops = self.active_loops.len(), "audio_mute_changed");
    }
}
