mod renderer;
mod surface;
mod text;
mod transform;

pub use renderer::Renderer;
pub use surface::{Surface, PLACEHOLDER_SIZE_PX, TINT_NEUTRAL};
pub use transform::{screen_to_world_px, world_to_screen_px, Camera2D, Viewport};
