use crate::app::geom::Vec2;
use crate::content::{SpriteDatabase, SpriteId, SpriteImage};

use super::text;
use super::transform::{scale_factors, world_to_screen_px, Camera2D, Viewport};

pub const PLACEHOLDER_SIZE_PX: i32 = 16;
pub const TINT_NEUTRAL: [f32; 3] = [1.0, 1.0, 1.0];

const PLACEHOLDER_COLOR: [u8; 4] = [220, 220, 240, 255];

/// One frame's draw target: a borrowed RGBA buffer plus the active camera
/// projection and ambient tint. World-space draws go through the camera;
/// `*_px` calls address window pixels directly. Constructible over any
/// buffer, so scenes render in tests without a window.
pub struct Surface<'a> {
    frame: &'a mut [u8],
    window: Viewport,
    sprites: &'a SpriteDatabase,
    camera: Camera2D,
    tint: [f32; 3],
}

impl<'a> Surface<'a> {
    pub fn new(frame: &'a mut [u8], window: Viewport, sprites: &'a SpriteDatabase) -> Self {
        debug_assert_eq!(
            frame.len(),
            window.width as usize * window.height as usize * 4
        );
        Self {
            frame,
            window,
            sprites,
            camera: Camera2D::new(Vec2::ZERO, window),
            tint: TINT_NEUTRAL,
        }
    }

    pub fn window(&self) -> Viewport {
        self.window
    }

    /// Switches the projection for subsequent world-space draws.
    pub fn set_camera(&mut self, camera: Camera2D) {
        self.camera = camera;
    }

    /// Multiplies the RGB of every subsequent draw; used for the ambient
    /// day/night tint.
    pub fn set_tint(&mut self, tint: [f32; 3]) {
        self.tint = tint;
    }

    pub fn clear_tint(&mut self) {
        self.tint = TINT_NEUTRAL;
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    pub fn sprite_size(&self, id: SpriteId) -> Option<(u32, u32)> {
        self.sprites.sprite_size(id)
    }

    /// Draws the sprite with its bottom-left corner at `world_pos` under the
    /// active camera. Missing sprites draw a placeholder quad.
    pub fn draw_sprite(&mut self, id: SpriteId, world_pos: Vec2) {
        let (anchor_x, anchor_y) = world_to_screen_px(&self.camera, self.window, world_pos);
        let (scale_x, scale_y) = scale_factors(&self.camera, self.window);
        match self.sprites.image(id) {
            Some(image) => self.blit(image, anchor_x, anchor_y, scale_x, scale_y),
            None => self.fill_rect_px(
                anchor_x,
                anchor_y - PLACEHOLDER_SIZE_PX,
                PLACEHOLDER_SIZE_PX,
                PLACEHOLDER_SIZE_PX,
                PLACEHOLDER_COLOR,
            ),
        }
    }

    /// Window-space filled rectangle, clipped; `x`/`y` is the top-left
    /// corner.
    pub fn fill_rect_px(&mut self, x: i32, y: i32, rect_width: i32, rect_height: i32, color: [u8; 4]) {
        let tinted = self.apply_tint(color);
        let start_x = x.max(0);
        let start_y = y.max(0);
        let end_x = (x + rect_width).min(self.window.width as i32);
        let end_y = (y + rect_height).min(self.window.height as i32);
        if end_x <= start_x || end_y <= start_y {
            return;
        }

        let frame_width = self.window.width as usize;
        for py in start_y..end_y {
            let row_offset = py as usize * frame_width * 4;
            for px in start_x..end_x {
                let offset = row_offset + px as usize * 4;
                self.frame[offset..offset + 4].copy_from_slice(&tinted);
            }
        }
    }

    /// Window-space text through the built-in HUD font.
    pub fn draw_text_px(&mut self, x: i32, y: i32, message: &str, color: [u8; 4]) {
        let tinted = self.apply_tint(color);
        text::draw_text(
            self.frame,
            self.window.width,
            self.window.height,
            x,
            y,
            message,
            tinted,
        );
    }

    fn apply_tint(&self, color: [u8; 4]) -> [u8; 4] {
        [
            (color[0] as f32 * self.tint[0]) as u8,
            (color[1] as f32 * self.tint[1]) as u8,
            (color[2] as f32 * self.tint[2]) as u8,
            color[3],
        ]
    }

    /// Nearest-neighbour blit with the sprite's bottom-left at the anchor.
    /// Fully transparent source pixels are skipped; no alpha blending.
    fn blit(&mut self, image: &SpriteImage, anchor_x: i32, anchor_y: i32, scale_x: f32, scale_y: f32) {
        if image.width == 0 || image.height == 0 {
            return;
        }
        let expected_len = image.width as usize * image.height as usize * 4;
        if image.rgba.len() < expected_len {
            return;
        }

        let scaled_w = ((image.width as f32 * scale_x).round() as i32).max(1);
        let scaled_h = ((image.height as f32 * scale_y).round() as i32).max(1);
        let left = anchor_x;
        let top = anchor_y - scaled_h;

        let draw_left = left.max(0);
        let draw_top = top.max(0);
        let draw_right = (left + scaled_w).min(self.window.width as i32);
        let draw_bottom = (top + scaled_h).min(self.window.height as i32);
        if draw_left >= draw_right || draw_top >= draw_bottom {
            return;
        }

        let inv_scale_x = (scaled_w as f32 / image.width as f32).recip();
        let inv_scale_y = (scaled_h as f32 / image.height as f32).recip();
        let frame_width = self.window.width as usize;
        let sprite_width = image.width as usize;

        for out_y in draw_top..draw_bottom {
            let dy = out_y - top;
            let src_y = ((dy as f32) * inv_scale_y).floor() as u32;
            let src_y = src_y.min(image.height - 1) as usize;
            let src_row_offset = src_y * sprite_width * 4;
            let dst_row_offset = out_y as usize * frame_width * 4;

            for out_x in draw_left..draw_right {
                let dx = out_x - left;
                let src_x = ((dx as f32) * inv_scale_x).floor() as u32;
                let src_x = src_x.min(image.width - 1) as usize;
                let src_offset = src_row_offset + src_x * 4;
                let alpha = image.rgba[src_offset + 3];
                if alpha == 0 {
                    continue;
                }
                let dst_offset = dst_row_offset + out_x as usize * 4;
                self.frame[dst_offset] = (image.rgba[src_offset] as f32 * self.tint[0]) as u8;
                self.frame[dst_offset + 1] =
                    (image.rgba[src_offset + 1] as f32 * self.tint[1]) as u8;
                self.frame[dst_offset + 2] =
                    (image.rgba[src_offset + 2] as f32 * self.tint[2]) as u8;
                self.frame[dst_offset + 3] = alpha;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SpriteImage;

    const WINDOW: Viewport = Viewport {
        width: 64,
        height: 64,
    };

    fn frame_buffer() -> Vec<u8> {
        vec![0u8; WINDOW.width as usize * WINDOW.height as usize * 4]
    }

    fn solid_image(width: u32, height: u32, color: [u8; 4]) -> SpriteImage {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            rgba.extend_from_slice(&color);
        }
        SpriteImage {
            width,
            height,
            rgba,
        }
    }

    fn pixel_at(frame: &[u8], x: usize, y: usize) -> [u8; 4] {
        let offset = (y * WINDOW.width as usize + x) * 4;
        [
            frame[offset],
            frame[offset + 1],
            frame[offset + 2],
            frame[offset + 3],
        ]
    }

    fn lit_pixel_count(frame: &[u8]) -> usize {
        frame.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    #[test]
    fn sprite_draws_anchored_at_bottom_left() {
        let mut sprites = SpriteDatabase::empty();
        let id = sprites.insert_image("dot", solid_image(4, 4, [255, 0, 0, 255]));
        let mut frame = frame_buffer();
        let mut surface = Surface::new(&mut frame, WINDOW, &sprites);

        // Camera centred on the window: world origin maps to (32, 32).
        surface.set_camera(Camera2D::new(Vec2::ZERO, WINDOW));
        surface.draw_sprite(id, Vec2::ZERO);

        assert_eq!(pixel_at(&frame, 32, 31), [255, 0, 0, 255]);
        assert_eq!(pixel_at(&frame, 35, 28), [255, 0, 0, 255]);
        // Above the anchor row and left of the anchor column stay empty.
        assert_eq!(pixel_at(&frame, 31, 31), [0, 0, 0, 0]);
        assert_eq!(pixel_at(&frame, 32, 32), [0, 0, 0, 0]);
    }

    #[test]
    fn missing_sprite_draws_placeholder_quad() {
        let sprites = SpriteDatabase::empty();
        let mut frame = frame_buffer();
        let mut surface = Surface::new(&mut frame, WINDOW, &sprites);
        surface.draw_sprite(SpriteId::PLACEHOLDER, Vec2::ZERO);
        assert_eq!(
            lit_pixel_count(&frame),
            (PLACEHOLDER_SIZE_PX * PLACEHOLDER_SIZE_PX) as usize
        );
    }

    #[test]
    fn tint_multiplies_sprite_colors() {
        let mut sprites = SpriteDatabase::empty();
        let id = sprites.insert_image("dot", solid_image(2, 2, [200, 100, 50, 255]));
        let mut frame = frame_buffer();
        let mut surface = Surface::new(&mut frame, WINDOW, &sprites);
        surface.set_tint([0.5, 0.5, 0.5]);
        surface.draw_sprite(id, Vec2::ZERO);

        assert_eq!(pixel_at(&frame, 32, 31), [100, 50, 25, 255]);
    }

    #[test]
    fn clear_tint_restores_full_color() {
        let sprites = SpriteDatabase::empty();
        let mut frame = frame_buffer();
        let mut surface = Surface::new(&mut frame, WINDOW, &sprites);
        surface.set_tint([0.0, 0.0, 0.0]);
        surface.clear_tint();
        surface.fill_rect_px(0, 0, 1, 1, [255, 255, 255, 255]);
        assert_eq!(pixel_at(&frame, 0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn transparent_source_pixels_are_skipped() {
        let mut sprites = SpriteDatabase::empty();
        let id = sprites.insert_image("ghost", solid_image(2, 2, [255, 255, 255, 0]));
        let mut frame = frame_buffer();
        let mut surface = Surface::new(&mut frame, WINDOW, &sprites);
        surface.draw_sprite(id, Vec2::ZERO);
        assert_eq!(lit_pixel_count(&frame), 0);
    }

    #[test]
    fn fill_rect_clips_to_window() {
        let sprites = SpriteDatabase::empty();
        let mut frame = frame_buffer();
        let mut surface = Surface::new(&mut frame, WINDOW, &sprites);
        surface.fill_rect_px(-5, -5, 10, 10, [10, 20, 30, 255]);
        assert_eq!(pixel_at(&frame, 0, 0), [10, 20, 30, 255]);
        assert_eq!(lit_pixel_count(&frame), 25);
    }
}
