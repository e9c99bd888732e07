use pixels::{Error as PixelsError, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::scene::Scene;
use crate::content::SpriteDatabase;

use super::surface::Surface;
use super::transform::Viewport;

/// Sky-blue base clear; the scene normally paints over every pixel.
const CLEAR_COLOR: [u8; 4] = [128, 128, 255, 255];

/// Window-backed presenter: owns the framebuffer and the sprite table, hands
/// the scene a `Surface` each frame and presents the result.
pub struct Renderer {
    window: &'static Window,
    pixels: Pixels<'static>,
    window_size: Viewport,
    sprites: SpriteDatabase,
}

impl Renderer {
    pub fn new(window: &'static Window, sprites: SpriteDatabase) -> Result<Self, PixelsError> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(window, size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            window_size: Viewport {
                width: size.width,
                height: size.height,
            },
            sprites,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), PixelsError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(self.window, width, height)?;
        self.window_size = Viewport { width, height };
        Ok(())
    }

    pub fn render_scene(&mut self, scene: &mut dyn Scene) -> Result<(), PixelsError> {
        if self.window_size.width == 0 || self.window_size.height == 0 {
            return Ok(());
        }

        let frame = self.pixels.frame_mut();
        let mut surface = Surface::new(frame, self.window_size, &self.sprites);
        surface.clear(CLEAR_COLOR);
        scene.render(&mut surface);

        self.pixels.render()
    }

    fn build_pixels(
        window: &'static Window,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, PixelsError> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }
}
