//! Fixed-cadence side-scroller simulation: entities, combat and the world loop.

pub(crate) mod animation;
pub(crate) mod audio;
pub(crate) mod boss;
pub(crate) mod cadence;
pub(crate) mod collectible;
pub(crate) mod entity;
pub(crate) mod events;
pub(crate) mod grunt;
pub(crate) mod hud;
pub(crate) mod level;
pub(crate) mod physics;
pub(crate) mod player;
pub(crate) mod projectile;
pub(crate) mod resolver;
#[cfg(test)]
pub(crate) mod testing;
pub(crate) mod world;

pub(crate) use audio::{AudioSink, SoundCue};
pub(crate) use entity::{DrawLayer, SpriteView};
pub(crate) use hud::HudSnapshot;
pub(crate) use level::{GruntPlacement, Level, LevelLayout};
pub(crate) use player::PlayerInput;
pub(crate) use world::{Outcome, ScreenSignals, World};
