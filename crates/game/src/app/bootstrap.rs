use engine::{resolve_app_paths, LoopConfig, Scene, StartupError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::config::{apply_mute_override, load_game_config, ConfigError};
use super::level_data::{load_level_layout, LevelDataError};
use super::scene::GameplayScene;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Level(#[from] LevelDataError),
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!("=== Sidescroller Startup ===");

    let paths = resolve_app_paths()?;
    info!(root = %paths.root.display(), "app_paths_resolved");
    let mut game_config = load_game_config(&paths.config_dir)?;
    apply_mute_override(&mut game_config);
    let layout = load_level_layout(&paths.levels_dir, &game_config.level_file)?;

    let config = LoopConfig {
        window_title: game_config.window_title,
        max_render_fps: game_config.max_render_fps,
        show_perf_overlay: game_config.show_perf_overlay,
        assets_dir: paths.assets_dir,
        ..LoopConfig::default()
    };
    let scene = GameplayScene::new(
        layout,
        StdRng::from_entropy(),
        game_config.start_muted,
        (config.canvas_width, config.canvas_height),
    );

    Ok(AppWiring {
        config,
        scene: Box::new(scene),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
