use std::time::Duration;

use engine::{DrawList, InputAction, InputSnapshot, Scene, SceneCommand};
use rand::rngs::StdRng;
use tracing::info;

use super::audio::TracingAudioSink;
use super::render_view::{draw_end_screen, draw_world};
use crate::sim::{AudioSink, Level, LevelLayout, Outcome, PlayerInput, ScreenSignals, World};

type GameWorld = World<TracingAudioSink, OutcomeLatch>;

/// Screen collaborator handed to the world. Keeps the first terminal
/// notification and ignores anything after it.
#[derive(Debug, Default)]
pub(crate) struct OutcomeLatch {
    outcome: Option<Outcome>,
}

impl OutcomeLatch {
    pub(crate) fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}

impl ScreenSignals for OutcomeLatch {
    fn on_game_over(&mut self) {
        self.outcome.get_or_insert(Outcome::GameOver);
    }

    fn on_game_won(&mut self) {
        self.outcome.get_or_insert(Outcome::GameWon);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Playing,
    Ended(Outcome),
}

/// One play session per load. A hard reset from the engine unloads and
/// loads again, which builds a fresh world from the same layout.
pub(crate) struct GameplayScene {
    layout: LevelLayout,
    rng: StdRng,
    muted: bool,
    canvas: (f32, f32),
    world: Option<GameWorld>,
    screen: Screen,
    sessions: u32,
}

impl GameplayScene {
    pub(crate) fn new(layout: LevelLayout, rng: StdRng, muted: bool, canvas: (u32, u32)) -> Self {
        Self {
            layout,
            rng,
            muted,
            canvas: (canvas.0 as f32, canvas.1 as f32),
            world: None,
            screen: Screen::Playing,
            sessions: 0,
        }
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        if let Some(world) = self.world.as_mut() {
            world.audio_mut().set_muted(self.muted);
        }
    }

    #[cfg(test)]
    fn world_mut(&mut self) -> Option<&mut GameWorld> {
        self.world.as_mut()
    }
}

fn player_input(input: &InputSnapshot) -> PlayerInput {
    PlayerInput {
        left: input.is_down(InputAction::MoveLeft),
        right: input.is_down(InputAction::MoveRight),
        jump: input.is_down(InputAction::Jump),
        action: input.is_down(InputAction::Action),
    }
}

impl Scene for GameplayScene {
    fn load(&mut self) {
        let level = Level::from_layout(&self.layout, &mut self.rng);
        let audio = TracingAudioSink::new(self.muted);
        self.world = Some(World::new(level, audio, OutcomeLatch::default()));
        self.screen = Screen::Playing;
        self.sessions = self.sessions.saturating_add(1);
        info!(session = self.sessions, muted = self.muted, "gameplay_session_started");
    }

    fn update(&mut self, fixed_dt: Duration, input: &InputSnapshot) -> SceneCommand {
        if input.quit_requested() {
            return SceneCommand::Quit;
        }
        if input.mute_toggle_pressed() {
            self.toggle_mute();
        }
        let Some(world) = self.world.as_mut() else {
            return SceneCommand::None;
        };
        match self.screen {
            Screen::Playing => {
                world.tick(fixed_dt, &player_input(input));
                if let Some(outcome) = world.signals().outcome() {
                    let counts = world.session_counts();
                    info!(
                        ?outcome,
                        clock_ms = world.clock().as_millis() as u64,
                        coins = world.coins(),
                        player_hits = counts.player_hits,
                        defeats = counts.defeats,
                        pickups = counts.pickups,
                        throws = counts.throws,
                        boss_hits = counts.boss_hits,
                        phase_changes = counts.phase_changes,
                        sounds = counts.sounds,
                        "gameplay_session_ended"
                    );
                    self.screen = Screen::Ended(outcome);
                }
                SceneCommand::None
            }
            Screen::Ended(_) if input.confirm_pressed() => {
                info!(session = self.sessions, "restart_requested");
                SceneCommand::HardReset
            }
            Screen::Ended(_) => SceneCommand::None,
        }
    }

    fn render(&self, frame: &mut DrawList) {
        let Some(world) = self.world.as_ref() else {
            return;
        };
        draw_world(world, frame);
        if let Screen::Ended(outcome) = self.screen {
            draw_end_screen(outcome, self.canvas, frame);
        }
    }

    fn unload(&mut self) {
        if let Some(world) = self.world.take() {
            info!(
                session = self.sessions,
                sounds_played = world.audio().played_count(),
                "gameplay_session_unloaded"
            );
        }
    }

    fn debug_title(&self) -> Option<String> {
        let world = self.world.as_ref()?;
        Some(format!(
            "hp {} | ammo {} | coins {}{}",
            world.player().health().current(),
            world.player().held_projectiles(),
            world.coins(),
            if self.muted { " | muted" } else { "" }
        ))
    }

    fn entity_count(&self) -> usize {
        self.world.as_ref().map_or(0, GameWorld::entity_count)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::sim::cadence::MOVEMENT_PERIOD;
    use crate::sim::grunt::{Grunt, GruntSkin};

    fn loaded_scene(layout: LevelLayout) -> GameplayScene {
        let mut scene = GameplayScene::new(layout, StdRng::seed_from_u64(9), false, (720, 480));
        scene.load();
        scene
    }

    fn run(scene: &mut GameplayScene, ticks: u32, input: &InputSnapshot) -> SceneCommand {
        let mut last = SceneCommand::None;
        for _ in 0..ticks {
            last = scene.update(MOVEMENT_PERIOD, input);
        }
        last
    }

    #[test]
    fn latch_keeps_the_first_outcome() {
        let mut latch = OutcomeLatch::default();
        latch.on_game_won();
        latch.on_game_over();

        assert_eq!(latch.outcome(), Some(Outcome::GameWon));
    }

    #[test]
    fn input_snapshot_maps_to_player_controls() {
        let snapshot = InputSnapshot::empty()
            .with_action_down(InputAction::MoveRight, true)
            .with_action_down(InputAction::Action, true);

        let input = player_input(&snapshot);

        assert!(input.right && input.action);
        assert!(!input.left && !input.jump);
    }

    #[test]
    fn loading_builds_the_level_population() {
        let scene = loaded_scene(LevelLayout::level1());

        assert_eq!(scene.entity_count(), 21);
        assert_eq!(
            scene.debug_title().as_deref(),
            Some("hp 100 | ammo 0 | coins 0")
        );
    }

    #[test]
    fn mute_toggle_survives_restart() {
        let mut scene = loaded_scene(LevelLayout::empty());
        let toggle = InputSnapshot::empty().with_mute_toggle_pressed(true);
        scene.update(MOVEMENT_PERIOD, &toggle);
        assert!(scene.debug_title().expect("title").ends_with("| muted"));

        scene.unload();
        scene.load();
        let world = scene.world_mut().expect("world");
        assert!(world.audio().is_muted());
    }

    #[test]
    fn game_over_waits_for_confirm_then_hard_resets() {
        let mut scene = loaded_scene(LevelLayout::empty());
        scene
            .world_mut()
            .expect("world")
            .level_mut()
            .grunts
            .push(Grunt::with_speed(GruntSkin::A, 0.0, 0.0));

        run(&mut scene, 420, &InputSnapshot::empty());
        assert_eq!(scene.screen, Screen::Ended(Outcome::GameOver));
        assert_eq!(
            run(&mut scene, 5, &InputSnapshot::empty()),
            SceneCommand::None
        );

        let confirm = InputSnapshot::empty().with_confirm_pressed(true);
        assert_eq!(scene.update(MOVEMENT_PERIOD, &confirm), SceneCommand::HardReset);

        scene.unload();
        scene.load();
        assert_eq!(scene.screen, Screen::Playing);
        assert_eq!(scene.entity_count(), 2);
    }

    #[test]
    fn escape_quits_from_any_screen() {
        let mut scene = loaded_scene(LevelLayout::empty());
        let quit = InputSnapshot::empty().with_quit_requested(true);

        assert_eq!(scene.update(MOVEMENT_PERIOD, &quit), SceneCommand::Quit);
    }

    #[test]
    fn end_screen_is_drawn_over_the_world() {
        let mut scene = loaded_scene(LevelLayout::empty());
        scene.screen = Screen::Ended(Outcome::GameWon);
        let mut frame = DrawList::default();

        scene.render(&mut frame);

        assert!(frame.commands().iter().any(|command| matches!(
            command,
            engine::DrawCommand::Text { text, .. } if text == "YOU WIN!"
        )));
    }
}
