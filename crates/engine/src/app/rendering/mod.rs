mod overlay;
mod renderer;
mod sprites;
mod text;
mod transform;

pub(crate) use overlay::OverlayData;
pub use renderer::Renderer;
pub use sprites::{validate_sprite_key, SpriteKeyError};
pub use transform::{world_to_screen_x, Viewport};
