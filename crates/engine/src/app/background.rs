use crate::content::SpriteId;

use super::clock::DayCycle;
use super::geom::Vec2;
use super::rendering::{Camera2D, Surface, Viewport};

pub const BACKGROUND_VIRTUAL_WIDTH: u32 = 1280;
pub const BACKGROUND_VIRTUAL_HEIGHT: u32 = 720;

/// Fixed-size camera the sky and parallax layers render through; world
/// coordinate (0, 0) is the bottom-left corner of the view.
pub fn background_camera() -> Camera2D {
    Camera2D::new(
        Vec2::new(
            BACKGROUND_VIRTUAL_WIDTH as f32 * 0.5,
            BACKGROUND_VIRTUAL_HEIGHT as f32 * 0.5,
        ),
        Viewport {
            width: BACKGROUND_VIRTUAL_WIDTH,
            height: BACKGROUND_VIRTUAL_HEIGHT,
        },
    )
}

const DAY_SKY_TOP: [f32; 3] = [0.35, 0.62, 0.93];
const DAY_SKY_BOTTOM: [f32; 3] = [0.66, 0.85, 0.98];
const NIGHT_SKY_TOP: [f32; 3] = [0.02, 0.03, 0.10];
const NIGHT_SKY_BOTTOM: [f32; 3] = [0.08, 0.10, 0.22];

/// Vertical sky gradient blended between the day and night palettes by the
/// clock's daylight factor. Drawn first each frame, before the ambient tint
/// is applied.
#[derive(Debug, Clone, Copy)]
pub struct SkyBackground {
    daylight: f32,
}

impl SkyBackground {
    pub fn new() -> Self {
        Self { daylight: 1.0 }
    }

    pub fn update(&mut self, clock: &DayCycle) {
        self.daylight = clock.daylight();
    }

    pub fn render(&self, surface: &mut Surface<'_>) {
        let window = surface.window();
        if window.height == 0 {
            return;
        }
        let top = blend_palette(NIGHT_SKY_TOP, DAY_SKY_TOP, self.daylight);
        let bottom = blend_palette(NIGHT_SKY_BOTTOM, DAY_SKY_BOTTOM, self.daylight);
        let rows = window.height as i32;
        for row in 0..rows {
            let t = row as f32 / rows as f32;
            let color = [
                (lerp(top[0], bottom[0], t) * 255.0) as u8,
                (lerp(top[1], bottom[1], t) * 255.0) as u8,
                (lerp(top[2], bottom[2], t) * 255.0) as u8,
                255,
            ];
            surface.fill_rect_px(0, row, window.width as i32, 1, color);
        }
    }

    #[cfg(test)]
    fn current_daylight(&self) -> f32 {
        self.daylight
    }
}

impl Default for SkyBackground {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParallaxLayer {
    pub sprite: SpriteId,
    /// Horizontal scroll factor: 0 is pinned to the view, 1 scrolls with
    /// the camera.
    pub factor: f32,
    /// Bottom edge of the layer in virtual pixels above the view's bottom.
    pub base_y: f32,
}

/// Horizontally wrapping layers ordered far to near. `update` receives the
/// gameplay camera position and the world's pixel extents each tick;
/// `render` expects the background camera to be active.
#[derive(Debug, Clone, Default)]
pub struct ParallaxBackground {
    layers: Vec<ParallaxLayer>,
    scroll_x: f32,
}

impl ParallaxBackground {
    pub fn new(layers: Vec<ParallaxLayer>) -> Self {
        Self {
            layers,
            scroll_x: 0.0,
        }
    }

    pub fn update(
        &mut self,
        camera_x: f32,
        _camera_y: f32,
        _world_px_width: f32,
        _world_px_height: f32,
    ) {
        self.scroll_x = camera_x;
    }

    pub fn render(&self, surface: &mut Surface<'_>) {
        for layer in &self.layers {
            let Some((sprite_w, _)) = surface.sprite_size(layer.sprite) else {
                // Placeholder layers are skipped rather than tiled.
                continue;
            };
            let tile_w = sprite_w as f32;
            let start_x = wrapped_offset(self.scroll_x, layer.factor, tile_w);
            let mut x = start_x;
            while x < BACKGROUND_VIRTUAL_WIDTH as f32 {
                surface.draw_sprite(layer.sprite, Vec2::new(x, layer.base_y));
                x += tile_w;
            }
        }
    }
}

/// Leftmost tile start so that tiles cover the view seam-free for any
/// scroll position.
fn wrapped_offset(scroll_x: f32, factor: f32, tile_width: f32) -> f32 {
    if tile_width <= 0.0 {
        return 0.0;
    }
    -(scroll_x * factor).rem_euclid(tile_width)
}

fn blend_palette(from: [f32; 3], to: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp(from[0], to[0], t),
        lerp(from[1], to[1], t),
        lerp(from[2], to[2], t),
    ]
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
