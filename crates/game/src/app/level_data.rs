use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::sim::grunt::GruntSkin;
use crate::sim::{GruntPlacement, LevelLayout};

const MAX_BACKGROUND_COLUMNS: u32 = 64;
const MAX_CLOUDS: u32 = 64;

#[derive(Debug, Error)]
pub(crate) enum LevelDataError {
    #[error("failed to read level file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse level file {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid level file {path}: validation failed at {field}: {message}")]
    Invalid {
        path: PathBuf,
        field: String,
        message: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelFile {
    level_end_x: f32,
    boss_x: f32,
    #[serde(default)]
    grunts: Vec<GruntEntry>,
    #[serde(default)]
    coins: Vec<PointEntry>,
    #[serde(default)]
    stones: Vec<PointEntry>,
    #[serde(default)]
    cloud_count: u32,
    #[serde(default)]
    background_start_x: f32,
    #[serde(default)]
    background_columns: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GruntEntry {
    skin: SkinToken,
    x: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SkinToken {
    A,
    B,
}

impl From<SkinToken> for GruntSkin {
    fn from(token: SkinToken) -> Self {
        match token {
            SkinToken::A => GruntSkin::A,
            SkinToken::B => GruntSkin::B,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PointEntry {
    x: f32,
    y: f32,
}

/// Reads `levels_dir/file_name`. A missing file falls back to the built-in first level.
pub(crate) fn load_level_layout(
    levels_dir: &Path,
    file_name: &str,
) -> Result<LevelLayout, LevelDataError> {
    let path = levels_dir.join(file_name);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "level_file_missing_using_builtin");
            return Ok(LevelLayout::level1());
        }
        Err(source) => return Err(LevelDataError::Read { path, source }),
    };
    let file = match parse_level_file(&raw) {
        Ok(file) => file,
        Err(message) => return Err(LevelDataError::Parse { path, message }),
    };
    if let Err((field, message)) = validate_level_file(&file) {
        return Err(LevelDataError::Invalid {
            path,
            field,
            message,
        });
    }
    let layout = into_layout(file);
    info!(
        path = %path.display(),
        grunts = layout.grunts.len(),
        coins = layout.coins.len(),
        stones = layout.stones.len(),
        "level_loaded"
    );
    Ok(layout)
}

fn parse_level_file(raw: &str) -> Result<LevelFile, String> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, LevelFile>(&mut deserializer) {
        Ok(file) => Ok(file),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                Err(format!("parse level json: {source}"))
            } else {
                Err(format!("parse level json at {path}: {source}"))
            }
        }
    }
}

fn validate_level_file(file: &LevelFile) -> Result<(), (String, String)> {
    fn finite(path: String, value: f32) -> Result<(), (String, String)> {
        if value.is_finite() {
            Ok(())
        } else {
            Err((path, format!("expected finite number, got {value}")))
        }
    }

    finite("level_end_x".to_string(), file.level_end_x)?;
    if file.level_end_x <= 0.0 {
        return Err((
            "level_end_x".to_string(),
            format!("expected a positive bound, got {}", file.level_end_x),
        ));
    }
    finite("boss_x".to_string(), file.boss_x)?;
    finite("background_start_x".to_string(), file.background_start_x)?;
    for (index, grunt) in file.grunts.iter().enumerate() {
        finite(format!("grunts[{index}].x"), grunt.x)?;
    }
    for (name, points) in [("coins", &file.coins), ("stones", &file.stones)] {
        for (index, point) in points.iter().enumerate() {
            finite(format!("{name}[{index}].x"), point.x)?;
            finite(format!("{name}[{index}].y"), point.y)?;
        }
    }
    if file.cloud_count > MAX_CLOUDS {
        return Err((
            "cloud_count".to_string(),
            format!("expected at most {MAX_CLOUDS}, got {}", file.cloud_count),
        ));
    }
    if file.background_columns > MAX_BACKGROUND_COLUMNS {
        return Err((
            "background_columns".to_string(),
            format!(
                "expected at most {MAX_BACKGROUND_COLUMNS}, got {}",
                file.background_columns
            ),
        ));
    }
    Ok(())
}

fn into_layout(file: LevelFile) -> LevelLayout {
    let points = |entries: Vec<PointEntry>| -> Vec<(f32, f32)> {
        entries.into_iter().map(|point| (point.x, point.y)).collect()
    };
    LevelLayout {
        level_end_x: file.level_end_x,
        boss_x: file.boss_x,
        grunts: file
            .grunts
            .into_iter()
            .map(|entry| GruntPlacement {
                skin: entry.skin.into(),
                x: entry.x,
            })
            .collect(),
        coins: points(file.coins),
        stones: points(file.stones),
        cloud_count: file.cloud_count,
        background_start_x: file.background_start_x,
        background_columns: file.background_columns,
    }
}
