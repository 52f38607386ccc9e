mod draw_list;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use draw_list::{DrawCommand, DrawList, DrawSpace, Rect, Rgba, SpriteDraw};
pub use input::InputAction;
pub use loop_runner::{run_app, run_app_with_metrics, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::{LoopMetricsSnapshot, MetricsHandle};
pub use rendering::{validate_sprite_key, world_to_screen_x, Renderer, SpriteKeyError, Viewport};
pub use scene::{InputSnapshot, Scene, SceneCommand};
