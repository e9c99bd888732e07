mod background;
mod clock;
mod geom;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use background::{
    background_camera, ParallaxBackground, ParallaxLayer, SkyBackground, BACKGROUND_VIRTUAL_HEIGHT,
    BACKGROUND_VIRTUAL_WIDTH,
};
pub use clock::{DayCycle, DAY_LENGTH_SECONDS};
pub use geom::{Rect, Vec2};
pub use input::InputAction;
pub use loop_runner::{run_app, run_app_with_metrics, AppError, LoopConfig};
pub use metrics::{LoopMetricsSnapshot, MetricsHandle};
pub use rendering::{
    screen_to_world_px, world_to_screen_px, Camera2D, Renderer, Surface, Viewport,
    PLACEHOLDER_SIZE_PX, TINT_NEUTRAL,
};
pub use scene::{InputSnapshot, Scene};
