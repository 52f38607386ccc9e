use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use image::ImageReader;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteKeyError {
    #[error("sprite key must not be empty")]
    Empty,
    #[error("sprite key must not start with '/'")]
    LeadingSlash,
    #[error("sprite key must not end with '/'")]
    TrailingSlash,
    #[error("sprite key must not contain '..'")]
    ParentTraversal,
    #[error("sprite key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

/// Keys are relative, lowercase, slash-separated paths without an extension.
pub fn validate_sprite_key(key: &str) -> Result<(), SpriteKeyError> {
    if key.is_empty() {
        return Err(SpriteKeyError::Empty);
    }
    if key.starts_with('/') {
        return Err(SpriteKeyError::LeadingSlash);
    }
    if key.ends_with('/') {
        return Err(SpriteKeyError::TrailingSlash);
    }
    if key.contains("..") {
        return Err(SpriteKeyError::ParentTraversal);
    }
    for ch in key.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '/' | '-') {
            continue;
        }
        return Err(SpriteKeyError::InvalidCharacter { character: ch });
    }
    Ok(())
}

pub(crate) struct LoadedSprite {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) rgba: Vec<u8>,
}

/// Lazily decoded sprites keyed by sprite key. Failed loads are cached as `None`
/// and reported once.
pub(crate) struct SpriteCache {
    sprites_dir: PathBuf,
    entries: HashMap<String, Option<LoadedSprite>>,
    warned_keys: HashSet<String>,
}

impl SpriteCache {
    pub(crate) fn new(assets_dir: &Path) -> Self {
        Self {
            sprites_dir: assets_dir.join("sprites"),
            entries: HashMap::new(),
            warned_keys: HashSet::new(),
        }
    }

    pub(crate) fn resolve(&mut self, key: &str) -> Option<&LoadedSprite> {
        if !self.entries.contains_key(key) {
            let loaded = match resolve_sprite_image_path(&self.sprites_dir, key) {
                Ok(path) => match load_sprite_rgba(&path) {
                    Ok(sprite) => {
                        debug!(
                            sprite_key = key,
                            width = sprite.width,
                            height = sprite.height,
                            "sprite_loaded"
                        );
                        Some(sprite)
                    }
                    Err(reason) => {
                        self.warn_once(key, Some(&path), &reason);
                        None
                    }
                },
                Err(error) => {
                    self.warn_once(key, None, &format!("invalid_key:{error}"));
                    None
                }
            };
            self.entries.insert(key.to_string(), loaded);
        }
        self.entries.get(key).and_then(Option::as_ref)
    }

    pub(crate) fn cached_len(&self) -> usize {
        self.entries.len()
    }

    fn warn_once(&mut self, key: &str, resolved_path: Option<&Path>, reason: &str) {
        if !self.warned_keys.insert(key.to_string()) {
            return;
        }
        let path_display = resolved_path
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<unresolved>".to_string());
        warn!(
            sprite_key = key,
            path = %path_display,
            reason,
            "renderer_sprite_load_failed"
        );
    }
}

fn resolve_sprite_image_path(sprites_dir: &Path, key: &str) -> Result<PathBuf, SpriteKeyError> {
    validate_sprite_key(key)?;
    Ok(sprites_dir.join(format!("{key}.png")))
}

fn load_sprite_rgba(path: &Path) -> Result<LoadedSprite, String> {
    let reader = ImageReader::open(path).map_err(|error| format!("file_open_failed:{error}"))?;
    let decoded = reader
        .decode()
        .map_err(|error| format!("decode_failed:{error}"))?;
    let image = decoded.to_rgba8();
    Ok(LoadedSprite {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn accepts_animation_frame_keys() {
        for key in ["character/walk/01", "endboss/dead/06", "ui/hp-point", "coin"] {
            assert!(validate_sprite_key(key).is_ok(), "key={key}");
        }
    }

    #[test]
    fn rejects_malformed_keys() {
        assert_eq!(validate_sprite_key(""), Err(SpriteKeyError::Empty));
        assert_eq!(validate_sprite_key("/abs"), Err(SpriteKeyError::LeadingSlash));
        assert_eq!(validate_sprite_key("dir/"), Err(SpriteKeyError::TrailingSlash));
        assert_eq!(validate_sprite_key("a/../b"), Err(SpriteKeyError::ParentTraversal));
        assert_eq!(
            validate_sprite_key("Stone.png"),
            Err(SpriteKeyError::InvalidCharacter { character: 'S' })
        );
    }

    #[test]
    fn missing_sprite_is_cached_as_absent_and_warned_once() {
        let temp = TempDir::new().expect("temp");
        let mut cache = SpriteCache::new(temp.path());

        assert!(cache.resolve("character/idle/01").is_none());
        assert!(cache.resolve("character/idle/01").is_none());
        assert_eq!(cache.cached_len(), 1);
        assert_eq!(cache.warned_keys.len(), 1);
    }

    #[test]
    fn invalid_key_never_touches_the_filesystem() {
        let temp = TempDir::new().expect("temp");
        let mut cache = SpriteCache::new(temp.path());

        assert!(cache.resolve(r"bad\key").is_none());
        assert!(cache.warned_keys.contains(r"bad\key"));
    }

    #[test]
    fn png_on_disk_is_decoded_to_rgba() {
        let temp = TempDir::new().expect("temp");
        let sprite_dir = temp.path().join("sprites").join("coin");
        std::fs::create_dir_all(&sprite_dir).expect("sprite dir");
        let mut image = RgbaImage::new(2, 3);
        image.put_pixel(1, 2, Rgba([10, 20, 30, 255]));
        image.save(sprite_dir.join("01.png")).expect("save png");

        let mut cache = SpriteCache::new(temp.path());
        let sprite = cache.resolve("coin/01").expect("sprite");

        assert_eq!((sprite.width, sprite.height), (2, 3));
        assert_eq!(sprite.rgba.len(), 2 * 3 * 4);
        let last = &sprite.rgba[(2 * 2 + 1) * 4..];
        assert_eq!(last, &[10, 20, 30, 255]);
    }
}
