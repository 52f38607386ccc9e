use engine::{DrawList, DrawSpace, Rect, Rgba, SpriteDraw};

use crate::sim::hud::{
    AMMO_BAR_ORIGIN, AMMO_BAR_SIZE, AMMO_ICON_SIZE, AMMO_ICON_SPACING, BOSS_BAR_ORIGIN,
    COIN_COUNTER_ORIGIN, HEALTH_BAR_ORIGIN, HEALTH_BAR_SIZE, HEALTH_ICON_SIZE,
    HEALTH_ICON_SPACING,
};
use crate::sim::{AudioSink, DrawLayer, HudSnapshot, Outcome, ScreenSignals, SpriteView, World};

const SKY_COLOR: Rgba = [118, 178, 222, 255];
const GROUND_COLOR: Rgba = [186, 140, 84, 255];
const PLAYER_COLOR: Rgba = [70, 110, 200, 255];
const BOSS_COLOR: Rgba = [120, 60, 140, 255];
const GRUNT_COLOR: Rgba = [190, 70, 60, 255];
const COIN_COLOR: Rgba = [240, 200, 40, 255];
const STONE_COLOR: Rgba = [130, 130, 130, 255];
const BAR_BACKDROP: Rgba = [30, 30, 36, 255];
const HEALTH_ICON_COLOR: Rgba = [210, 60, 60, 255];
const BOSS_ICON_COLOR: Rgba = [160, 80, 200, 255];
const AMMO_ICON_COLOR: Rgba = [150, 150, 150, 255];
const TEXT_COLOR: Rgba = [255, 255, 255, 255];
const OVERLAY_COLOR: Rgba = [10, 10, 14, 255];
const ICON_PADDING: f32 = 8.0;

/// Pushes the world in paint order, then the fixed HUD on top.
pub(crate) fn draw_world<A: AudioSink, S: ScreenSignals>(
    world: &World<A, S>,
    frame: &mut DrawList,
) {
    frame.set_clear_color(SKY_COLOR);
    frame.set_camera_offset_x(world.camera_offset_x());
    for view in world.drawables() {
        let fallback = fallback_color(&view);
        frame.sprite(SpriteDraw {
            rect: Rect::new(view.x, view.y, view.width, view.height),
            key: view.key,
            space: DrawSpace::World,
            flip_x: view.flip_x,
            fallback,
        });
    }
    draw_hud(&world.hud(), frame);
}

/// Flat colour drawn when a sprite image is missing. Decorative layers only
/// keep a box for the sky and the ground strip.
fn fallback_color(view: &SpriteView) -> Option<Rgba> {
    match view.layer {
        DrawLayer::Background => match view.key.as_str() {
            "background/sky" => Some(SKY_COLOR),
            "background/ground" => Some(GROUND_COLOR),
            _ => None,
        },
        DrawLayer::Cloud => None,
        DrawLayer::Player => Some(PLAYER_COLOR),
        DrawLayer::Boss => Some(BOSS_COLOR),
        DrawLayer::Grunt => Some(GRUNT_COLOR),
        DrawLayer::Coin => Some(COIN_COLOR),
        DrawLayer::Stone | DrawLayer::Projectile => Some(STONE_COLOR),
    }
}

struct IconBar {
    origin: (f32, f32),
    size: (f32, f32),
    icon: (f32, f32),
    spacing: f32,
    color: Rgba,
}

const HEALTH_BAR: IconBar = IconBar {
    origin: HEALTH_BAR_ORIGIN,
    size: HEALTH_BAR_SIZE,
    icon: HEALTH_ICON_SIZE,
    spacing: HEALTH_ICON_SPACING,
    color: HEALTH_ICON_COLOR,
};

const AMMO_BAR: IconBar = IconBar {
    origin: AMMO_BAR_ORIGIN,
    size: AMMO_BAR_SIZE,
    icon: AMMO_ICON_SIZE,
    spacing: AMMO_ICON_SPACING,
    color: AMMO_ICON_COLOR,
};

const BOSS_BAR: IconBar = IconBar {
    origin: BOSS_BAR_ORIGIN,
    color: BOSS_ICON_COLOR,
    ..HEALTH_BAR
};

fn draw_hud(hud: &HudSnapshot, frame: &mut DrawList) {
    draw_icon_bar(frame, &HEALTH_BAR, hud.health_icons);
    draw_icon_bar(frame, &AMMO_BAR, hud.ammo_icons);
    frame.text(
        COIN_COUNTER_ORIGIN.0,
        COIN_COUNTER_ORIGIN.1,
        format!("COINS {}", hud.coins),
        COIN_COLOR,
        3,
    );
    if let Some(boss_icons) = hud.boss_icons {
        draw_icon_bar(frame, &BOSS_BAR, boss_icons);
    }
}

fn draw_icon_bar(frame: &mut DrawList, bar: &IconBar, icons: u32) {
    let (x, y) = bar.origin;
    let (width, height) = bar.size;
    frame.fill_rect(Rect::new(x, y, width, height), DrawSpace::Screen, BAR_BACKDROP);
    let icon_y = y + (height - bar.icon.1) / 2.0;
    for index in 0..icons {
        let icon_x = x + ICON_PADDING + index as f32 * (bar.icon.0 + bar.spacing);
        frame.fill_rect(
            Rect::new(icon_x, icon_y, bar.icon.0, bar.icon.1),
            DrawSpace::Screen,
            bar.color,
        );
    }
}

/// Full-screen end card shown over the frozen world.
pub(crate) fn draw_end_screen(outcome: Outcome, canvas: (f32, f32), frame: &mut DrawList) {
    let (width, height) = canvas;
    let card = Rect::new(width * 0.15, height * 0.3, width * 0.7, height * 0.4);
    frame.fill_rect(card, DrawSpace::Screen, OVERLAY_COLOR);
    let headline = match outcome {
        Outcome::GameOver => "GAME OVER",
        Outcome::GameWon => "YOU WIN!",
    };
    frame.text(card.x + 40.0, card.y + 40.0, headline, TEXT_COLOR, 6);
    frame.text(
        card.x + 40.0,
        card.bottom() - 50.0,
        "ENTER: PLAY AGAIN  ESC: QUIT",
        TEXT_COLOR,
        2,
    );
}

#[cfg(test)]
mod tests {
    use engine::DrawCommand;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::sim::testing::{RecordingAudio, RecordingSignals};
    use crate::sim::{Level, LevelLayout};

    fn level1_world() -> World<RecordingAudio, RecordingSignals> {
        let mut rng = StdRng::seed_from_u64(5);
        let level = Level::from_layout(&LevelLayout::level1(), &mut rng);
        World::new(level, RecordingAudio::default(), RecordingSignals::default())
    }

    #[test]
    fn world_sprites_precede_screen_space_hud() {
        let world = level1_world();
        let mut frame = DrawList::default();

        draw_world(&world, &mut frame);

        assert_eq!(frame.camera_offset_x(), 100.0);
        let sprites = frame
            .commands()
            .iter()
            .take_while(|command| matches!(command, DrawCommand::Sprite(_)))
            .count();
        assert_eq!(sprites, world.drawables().len());
        assert!(frame.commands()[sprites..].iter().all(|command| match command {
            DrawCommand::FillRect { space, .. } => *space == DrawSpace::Screen,
            DrawCommand::Text { .. } => true,
            DrawCommand::Sprite(_) => false,
        }));
    }

    #[test]
    fn hud_draws_one_rect_per_icon_and_hides_dormant_boss_bar() {
        let mut frame = DrawList::default();
        let hud = HudSnapshot {
            health_icons: 10,
            ammo_icons: 2,
            coins: 4,
            boss_icons: None,
        };

        draw_hud(&hud, &mut frame);

        // two backdrops, twelve icons and the coin counter
        assert_eq!(frame.len(), 15);
        assert!(frame.commands().iter().any(|command| matches!(
            command,
            DrawCommand::Text { text, .. } if text == "COINS 4"
        )));

        let mut frame = DrawList::default();
        draw_hud(
            &HudSnapshot {
                boss_icons: Some(3),
                ..hud
            },
            &mut frame,
        );
        assert_eq!(frame.len(), 19);
    }

    #[test]
    fn scenery_only_falls_back_for_sky_and_ground() {
        let world = level1_world();
        let views = world.drawables();

        let fallbacks: Vec<Option<Rgba>> = views[..5].iter().map(fallback_color).collect();
        assert_eq!(
            fallbacks,
            vec![Some(SKY_COLOR), None, None, None, Some(GROUND_COLOR)]
        );
        assert_eq!(fallback_color(&views[38]), Some(PLAYER_COLOR));
    }
}
