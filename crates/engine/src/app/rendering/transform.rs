use crate::app::geom::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Orthographic camera over world pixels, y-up. `viewport` is the virtual
/// extent the camera shows; when it differs from the window (the fixed-size
/// background camera), draws are scaled up to fill the window.
#[derive(Debug, Clone, Copy)]
pub struct Camera2D {
    pub position: Vec2,
    pub viewport: Viewport,
}

impl Camera2D {
    pub fn new(position: Vec2, viewport: Viewport) -> Self {
        Self { position, viewport }
    }
}

pub(crate) fn scale_factors(camera: &Camera2D, window: Viewport) -> (f32, f32) {
    let scale_x = window.width as f32 / camera.viewport.width.max(1) as f32;
    let scale_y = window.height as f32 / camera.viewport.height.max(1) as f32;
    (scale_x, scale_y)
}

/// Window pixel position of a world point under `camera`. The camera looks
/// at `camera.position` in the viewport centre; world y grows upward,
/// screen y downward.
pub fn world_to_screen_px(camera: &Camera2D, window: Viewport, world: Vec2) -> (i32, i32) {
    let (scale_x, scale_y) = scale_factors(camera, window);
    let virtual_x = world.x - camera.position.x + camera.viewport.width as f32 * 0.5;
    let virtual_y = camera.viewport.height as f32 * 0.5 - (world.y - camera.position.y);
    (
        (virtual_x * scale_x).round() as i32,
        (virtual_y * scale_y).round() as i32,
    )
}

/// Inverse of `world_to_screen_px` for cursor picking.
pub fn screen_to_world_px(camera: &Camera2D, window: Viewport, screen: Vec2) -> Vec2 {
    let (scale_x, scale_y) = scale_factors(camera, window);
    let virtual_x = screen.x / scale_x.max(f32::EPSILON);
    let virtual_y = screen.y / scale_y.max(f32::EPSILON);
    Vec2 {
        x: camera.position.x + virtual_x - camera.viewport.width as f32 * 0.5,
        y: camera.position.y + camera.viewport.height as f32 * 0.5 - virtual_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_800_600() -> Viewport {
        Viewport {
            width: 800,
            height: 600,
        }
    }

    #[test]
    fn camera_position_maps_to_window_center() {
        let camera = Camera2D::new(Vec2::new(500.0, 300.0), window_800_600());
        let (x, y) = world_to_screen_px(&camera, window_800_600(), Vec2::new(500.0, 300.0));
        assert_eq!((x, y), (400, 300));
    }

    #[test]
    fn world_up_is_screen_up() {
        let camera = Camera2D::new(Vec2::ZERO, window_800_600());
        let (_, y_origin) = world_to_screen_px(&camera, window_800_600(), Vec2::ZERO);
        let (_, y_above) = world_to_screen_px(&camera, window_800_600(), Vec2::new(0.0, 100.0));
        assert!(y_above < y_origin);
    }

    #[test]
    fn offset_from_camera_shifts_screen_position() {
        let camera = Camera2D::new(Vec2::new(10.0, -5.0), window_800_600());
        let (x, y) = world_to_screen_px(&camera, window_800_600(), Vec2::new(30.0, 5.0));
        assert_eq!((x, y), (420, 290));
    }

    #[test]
    fn screen_to_world_round_trips() {
        let camera = Camera2D::new(Vec2::new(512.0, 1024.0), window_800_600());
        let world = Vec2::new(600.0, 950.0);
        let (sx, sy) = world_to_screen_px(&camera, window_800_600(), world);
        let back = screen_to_world_px(
            &camera,
            window_800_600(),
            Vec2::new(sx as f32, sy as f32),
        );
        assert!((back.x - world.x).abs() < 1.0);
        assert!((back.y - world.y).abs() < 1.0);
    }

    #[test]
    fn virtual_viewport_scales_to_window() {
        let camera = Camera2D::new(
            Vec2::new(640.0, 360.0),
            Viewport {
                width: 1280,
                height: 720,
            },
        );
        let window = Viewport {
            width: 2560,
            height: 1440,
        };
        // Virtual bottom-left corner lands on the window's bottom-left.
        let (x, y) = world_to_screen_px(&camera, window, Vec2::new(0.0, 0.0));
        assert_eq!((x, y), (0, 1440));
    }
}
