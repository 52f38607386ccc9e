use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

pub(crate) const CONFIG_FILE_NAME: &str = "game.json";
pub(crate) const MUTED_ENV_VAR: &str = "SIDESCROLLER_MUTED";

/// Player-facing settings read from `assets/config/game.json`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    pub(crate) window_title: String,
    pub(crate) max_render_fps: Option<u32>,
    pub(crate) start_muted: bool,
    pub(crate) show_perf_overlay: bool,
    pub(crate) level_file: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "Sidescroller".to_string(),
            max_render_fps: None,
            start_muted: false,
            show_perf_overlay: false,
            level_file: "level1.json".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid config file {path}: {field}: {message}")]
    Invalid {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

/// A missing file yields the defaults; anything unreadable or malformed is an error.
pub(crate) fn load_game_config(config_dir: &Path) -> Result<GameConfig, ConfigError> {
    let path = config_dir.join(CONFIG_FILE_NAME);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "game_config_missing_using_defaults");
            return Ok(GameConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    let config = match parse_game_config(&raw) {
        Ok(config) => config,
        Err(message) => return Err(ConfigError::Parse { path, message }),
    };
    validate_game_config(&config, &path)?;
    info!(
        path = %path.display(),
        level_file = config.level_file.as_str(),
        start_muted = config.start_muted,
        "game_config_loaded"
    );
    Ok(config)
}

fn parse_game_config(raw: &str) -> Result<GameConfig, String> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, GameConfig>(&mut deserializer) {
        Ok(config) => Ok(config),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                Err(format!("parse game config: {source}"))
            } else {
                Err(format!("parse game config at {path}: {source}"))
            }
        }
    }
}

fn validate_game_config(config: &GameConfig, path: &Path) -> Result<(), ConfigError> {
    let invalid = |field: &'static str, message: &str| ConfigError::Invalid {
        path: path.to_path_buf(),
        field,
        message: message.to_string(),
    };
    if config.window_title.trim().is_empty() {
        return Err(invalid("window_title", "must not be empty"));
    }
    if config.max_render_fps == Some(0) {
        return Err(invalid("max_render_fps", "must be at least 1 when set"));
    }
    if !is_plain_json_file_name(&config.level_file) {
        return Err(invalid(
            "level_file",
            "must be a bare file name ending in .json",
        ));
    }
    Ok(())
}

fn is_plain_json_file_name(name: &str) -> bool {
    name.len() > ".json".len()
        && name.ends_with(".json")
        && !name.contains(|ch: char| ch == '/' || ch == '\\')
        && !name.starts_with('.')
}

/// Applies `SIDESCROLLER_MUTED` on top of the file setting.
pub(crate) fn apply_mute_override(config: &mut GameConfig) {
    config.start_muted = parse_mute_override(env::var(MUTED_ENV_VAR), config.start_muted);
}

fn parse_mute_override(raw: Result<String, env::VarError>, configured: bool) -> bool {
    match raw {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => true,
            "0" | "false" => false,
            _ => {
                warn!(
                    env_var = MUTED_ENV_VAR,
                    value = value.as_str(),
                    "invalid mute env var value; falling back to config"
                );
                configured
            }
        },
        Err(env::VarError::NotPresent) => configured,
        Err(err) => {
            warn!(
                env_var = MUTED_ENV_VAR,
                error = %err,
                "unable to read mute env var; falling back to config"
            );
            configured
        }
    }
}
