use rand::Rng;

use super::animation::{Animator, FrameSet};
use super::audio::SoundCue;
use super::entity::{Aabb, Body, Collidable, DrawLayer, Drawable, Health, Inset, SpriteView};
use super::events::GameEventBus;

const GRUNT_WIDTH: f32 = 150.0;
const GRUNT_HEIGHT: f32 = 100.0;
const GRUNT_HEALTH: u32 = 100;
pub(crate) const MIN_SPEED: f32 = 0.15;
pub(crate) const SPEED_SPREAD: f32 = 0.5;

/// Two visual variants sharing one behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum GruntSkin {
    A,
    B,
}

impl GruntSkin {
    fn ground_y(self) -> f32 {
        match self {
            GruntSkin::A => 368.0,
            GruntSkin::B => 385.0,
        }
    }

    fn inset(self) -> Inset {
        match self {
            GruntSkin::A => Inset::new(35.0, 35.0, 10.0, 10.0),
            GruntSkin::B => Inset::new(20.0, 40.0, 70.0, 25.0),
        }
    }

    fn walk_frames(self) -> FrameSet {
        match self {
            GruntSkin::A => FrameSet::new("grunt_a/walk", 5),
            GruntSkin::B => FrameSet::new("grunt_b/walk", 5),
        }
    }

    pub(crate) fn death_cue(self) -> SoundCue {
        match self {
            GruntSkin::A => SoundCue::Enemy1Dead,
            GruntSkin::B => SoundCue::Enemy2Dead,
        }
    }

    pub(crate) fn token(self) -> &'static str {
        match self {
            GruntSkin::A => "a",
            GruntSkin::B => "b",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GruntState {
    Walking,
    Dead,
}

#[derive(Debug, Clone)]
pub(crate) struct Grunt {
    skin: GruntSkin,
    body: Body,
    speed: f32,
    health: Health,
    state: GruntState,
    animator: Animator,
}

impl Grunt {
    /// Spawns with a walking speed drawn from `[0.15, 0.65)`.
    pub(crate) fn spawn(skin: GruntSkin, x: f32, rng: &mut impl Rng) -> Self {
        let speed = MIN_SPEED + rng.gen::<f32>() * SPEED_SPREAD;
        Self::with_speed(skin, x, speed)
    }

    pub(crate) fn with_speed(skin: GruntSkin, x: f32, speed: f32) -> Self {
        let frames = skin.walk_frames();
        Self {
            skin,
            body: Body::new(x, skin.ground_y(), GRUNT_WIDTH, GRUNT_HEIGHT, skin.inset()),
            speed,
            health: Health::full(GRUNT_HEALTH),
            state: GruntState::Walking,
            animator: Animator::new(frames),
        }
    }

    pub(crate) fn step_movement(&mut self) {
        if self.state == GruntState::Walking {
            self.body.x -= self.speed;
        }
    }

    pub(crate) fn advance_animation(&mut self) {
        if self.state == GruntState::Walking {
            self.animator.advance(self.skin.walk_frames());
        }
    }

    /// One hit kills. Returns `true` only for the call that caused the death.
    pub(crate) fn hit(&mut self, events: &mut GameEventBus) -> bool {
        self.health.deplete();
        if self.state == GruntState::Dead {
            return false;
        }
        self.state = GruntState::Dead;
        events.play_once(self.skin.death_cue());
        true
    }

    pub(crate) fn is_dead(&self) -> bool {
        self.state == GruntState::Dead
    }

    pub(crate) fn skin(&self) -> GruntSkin {
        self.skin
    }

    pub(crate) fn speed(&self) -> f32 {
        self.speed
    }

    pub(crate) fn health(&self) -> &Health {
        &self.health
    }

    pub(crate) fn body(&self) -> &Body {
        &self.body
    }
}

impl Collidable for Grunt {
    fn collision_box(&self) -> Aabb {
        self.body.collision_box()
    }
}

impl Drawable for Grunt {
    fn sprite_view(&self) -> SpriteView {
        SpriteView::of_body(self.animator.sprite_key(), DrawLayer::Grunt, &self.body)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::sim::audio::SoundCommand;

    fn death_cues(events: &GameEventBus) -> usize {
        events
            .sound_commands()
            .filter(|command| matches!(command, SoundCommand::PlayOnce(SoundCue::Enemy2Dead)))
            .count()
    }

    #[test]
    fn spawned_speed_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let grunt = Grunt::spawn(GruntSkin::A, 500.0, &mut rng);
            assert!(grunt.speed() >= 0.15 && grunt.speed() < 0.65, "{}", grunt.speed());
        }
    }

    #[test]
    fn walks_left_by_its_own_speed() {
        let mut grunt = Grunt::with_speed(GruntSkin::B, 650.0, 0.5);
        grunt.step_movement();
        grunt.step_movement();

        assert_eq!(grunt.body().x, 649.0);
        assert_eq!(grunt.body().y, 385.0);
    }

    #[test]
    fn hit_is_idempotent_with_one_death_cue() {
        let mut events = GameEventBus::default();
        let mut grunt = Grunt::with_speed(GruntSkin::B, 650.0, 0.3);

        assert!(grunt.hit(&mut events));
        assert!(!grunt.hit(&mut events));

        assert!(grunt.is_dead());
        assert_eq!(grunt.health().current(), 0);
        assert_eq!(death_cues(&events), 1);
    }

    #[test]
    fn dead_grunt_stops_walking() {
        let mut events = GameEventBus::default();
        let mut grunt = Grunt::with_speed(GruntSkin::A, 500.0, 0.5);
        grunt.hit(&mut events);
        grunt.step_movement();

        assert_eq!(grunt.body().x, 500.0);
    }

    #[test]
    fn skins_keep_their_insets_inside_the_sprite() {
        for skin in [GruntSkin::A, GruntSkin::B] {
            assert!(skin.inset().fits(GRUNT_WIDTH, GRUNT_HEIGHT));
        }
    }
}
