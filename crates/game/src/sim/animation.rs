use std::time::Duration;

/// A named image sequence; frame keys are `{prefix}/01` .. `{prefix}/{len}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameSet {
    pub(crate) prefix: &'static str,
    pub(crate) len: usize,
}

impl FrameSet {
    pub(crate) const fn new(prefix: &'static str, len: usize) -> Self {
        Self { prefix, len }
    }

    pub(crate) fn key(&self, index: usize) -> String {
        let index = if self.len == 0 { 0 } else { index % self.len };
        format!("{}/{:02}", self.prefix, index + 1)
    }
}

/// Looping frame driver. The frame counter is shared across sequences so switching
/// sequence continues from the running count.
#[derive(Debug, Clone)]
pub(crate) struct Animator {
    sequence: FrameSet,
    shown: usize,
    current_frame: usize,
}

impl Animator {
    pub(crate) fn new(initial: FrameSet) -> Self {
        Self {
            sequence: initial,
            shown: 0,
            current_frame: 0,
        }
    }

    pub(crate) fn advance(&mut self, sequence: FrameSet) {
        self.sequence = sequence;
        self.shown = if sequence.len == 0 {
            0
        } else {
            self.current_frame % sequence.len
        };
        self.current_frame = self.current_frame.wrapping_add(1);
    }

    /// Holds the first frame of `sequence` without advancing the counter.
    pub(crate) fn hold_first(&mut self, sequence: FrameSet) {
        self.sequence = sequence;
        self.shown = 0;
    }

    pub(crate) fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub(crate) fn sprite_key(&self) -> String {
        self.sequence.key(self.shown)
    }
}

/// Plays a sequence once and stays on its last frame.
#[derive(Debug, Clone)]
pub(crate) struct OneShot {
    sequence: FrameSet,
    played: usize,
    completion_reported: bool,
}

impl OneShot {
    pub(crate) fn new(sequence: FrameSet) -> Self {
        Self {
            sequence,
            played: 0,
            completion_reported: false,
        }
    }

    /// Shows the next frame. Returns `true` exactly once, on the step that
    /// shows the final frame.
    pub(crate) fn advance(&mut self) -> bool {
        if self.played < self.sequence.len {
            self.played += 1;
        }
        if self.played >= self.sequence.len && !self.completion_reported {
            self.completion_reported = true;
            return true;
        }
        false
    }

    #[cfg(test)]
    pub(crate) fn is_complete(&self) -> bool {
        self.completion_reported
    }

    pub(crate) fn sprite_key(&self) -> String {
        self.sequence.key(self.played.saturating_sub(1))
    }
}

/// Death animation followed by the trailing delay before game over.
#[derive(Debug, Clone)]
pub(crate) struct DeathSequence {
    frames: OneShot,
    completed_at: Option<Duration>,
    signalled: bool,
}

impl DeathSequence {
    pub(crate) fn new(frames: FrameSet) -> Self {
        Self {
            frames: OneShot::new(frames),
            completed_at: None,
            signalled: false,
        }
    }

    pub(crate) fn advance(&mut self, now: Duration) {
        if self.frames.advance() {
            self.completed_at = Some(now);
        }
    }

    /// True exactly once, when the trailing delay has passed after the last frame.
    pub(crate) fn take_signal(&mut self, now: Duration, trailing_delay: Duration) -> bool {
        let Some(completed_at) = self.completed_at else {
            return false;
        };
        if self.signalled || now.saturating_sub(completed_at) < trailing_delay {
            return false;
        }
        self.signalled = true;
        true
    }

    pub(crate) fn sprite_key(&self) -> String {
        self.frames.sprite_key()
    }

    #[cfg(test)]
    pub(crate) fn animation_complete(&self) -> bool {
        self.frames.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALK: FrameSet = FrameSet::new("character/walk", 6);
    const JUMP: FrameSet = FrameSet::new("character/jump", 7);

    #[test]
    fn frame_keys_wrap_and_are_one_based() {
        assert_eq!(WALK.key(0), "character/walk/01");
        assert_eq!(WALK.key(5), "character/walk/06");
        assert_eq!(WALK.key(6), "character/walk/01");
    }

    #[test]
    fn animator_cycles_by_running_counter() {
        let mut animator = Animator::new(WALK);
        for _ in 0..7 {
            animator.advance(WALK);
        }
        assert_eq!(animator.sprite_key(), "character/walk/01");
        assert_eq!(animator.current_frame(), 7);

        animator.advance(JUMP);
        assert_eq!(animator.sprite_key(), "character/jump/01");
    }

    #[test]
    fn hold_first_shows_idle_frame_without_advancing() {
        let mut animator = Animator::new(WALK);
        animator.advance(WALK);
        animator.advance(WALK);
        animator.hold_first(WALK);

        assert_eq!(animator.sprite_key(), "character/walk/01");
        assert_eq!(animator.current_frame(), 2);
    }

    #[test]
    fn one_shot_reports_completion_exactly_once() {
        let mut death = OneShot::new(FrameSet::new("endboss/dead", 3));

        assert!(!death.advance());
        assert!(!death.advance());
        assert!(death.advance());
        assert!(!death.advance());
        assert!(!death.advance());
        assert!(death.is_complete());
        assert_eq!(death.sprite_key(), "endboss/dead/03");
    }
}
