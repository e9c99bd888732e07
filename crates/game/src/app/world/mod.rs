use std::f32::consts::TAU;
use std::time::{Duration, Instant};

use engine::{
    background_camera, screen_to_world_px, Camera2D, DayCycle, InputAction, InputSnapshot,
    ParallaxBackground, ParallaxLayer, Rect, Scene, SkyBackground, SpriteDatabase, SpriteId,
    Surface, Vec2, Viewport, BACKGROUND_VIRTUAL_HEIGHT, BACKGROUND_VIRTUAL_WIDTH,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::config::WorldConfig;

/// Tiles per chunk side.
pub const CHUNK_SIZE: i32 = 16;
/// Pixels per tile side.
pub const TILE_SIZE: i32 = 64;
/// Pixels a chunk spans on each axis.
pub const CHUNK_PIXELS: i32 = CHUNK_SIZE * TILE_SIZE;

const PLAYER_MOVE_SPEED: f32 = 300.0;
const PLAYER_WIDTH: f32 = 48.0;
const PLAYER_HEIGHT: f32 = 96.0;
const BULLET_SPEED: f32 = 1000.0;
const BULLET_MAX_AGE_SECONDS: f32 = 0.5;
const CAMERA_FOLLOW_OFFSET_X: f32 = 32.0;
const CAMERA_FOLLOW_OFFSET_Y: f32 = 100.0;
const FLOWER_SWAY_RATE: f32 = 2.0;
const FLOWER_SWAY_AMPLITUDE_PX: f32 = 2.0;
const HUD_MARGIN_PX: i32 = 25;
const HUD_LINE_STEP_PX: i32 = 20;
const HUD_TEXT_COLOR: [u8; 4] = [255, 255, 255, 255];
const FPS_WINDOW: Duration = Duration::from_secs(1);

include!("tiles.rs");
include!("entities.rs");
include!("player.rs");
include!("worldgen.rs");

/// Drawable handles for everything the world renders, resolved once at
/// construction. Unknown keys degrade to placeholders so the world stays
/// fully usable without assets on disk.
#[derive(Debug, Clone, Copy)]
struct WorldSprites {
    grass: SpriteId,
    dirt: SpriteId,
    stone: SpriteId,
    flower: SpriteId,
    player: SpriteId,
    demat_bullet: SpriteId,
}

impl WorldSprites {
    fn resolve(sprites: &SpriteDatabase) -> Self {
        Self {
            grass: sprites.sprite_id_or_placeholder("tiles.grass"),
            dirt: sprites.sprite_id_or_placeholder("tiles.dirt"),
            stone: sprites.sprite_id_or_placeholder("tiles.stone"),
            flower: sprites.sprite_id_or_placeholder("tiles.flower"),
            player: sprites.sprite_id_or_placeholder("entities.player"),
            demat_bullet: sprites.sprite_id_or_placeholder("entities.demat_bullet"),
        }
    }
}

fn parallax_layers(sprites: &SpriteDatabase) -> Vec<ParallaxLayer> {
    vec![
        ParallaxLayer {
            sprite: sprites.sprite_id_or_placeholder("background.forest"),
            factor: 0.15,
            base_y: 0.0,
        },
        ParallaxLayer {
            sprite: sprites.sprite_id_or_placeholder("background.mountains"),
            factor: 0.3,
            base_y: 0.0,
        },
        ParallaxLayer {
            sprite: sprites.sprite_id_or_placeholder("background.hills"),
            factor: 0.5,
            base_y: 0.0,
        },
        ParallaxLayer {
            sprite: sprites.sprite_id_or_placeholder("background.islands"),
            factor: 0.7,
            base_y: 160.0,
        },
    ]
}

/// HUD frame counter over a one-second wall-clock window.
#[derive(Debug)]
struct HudFpsCounter {
    window_start: Instant,
    frames: u32,
    fps: u32,
}

impl HudFpsCounter {
    fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
            fps: 0,
        }
    }

    fn roll_window(&mut self, now: Instant) {
        if now.saturating_duration_since(self.window_start) >= FPS_WINDOW {
            self.window_start = now;
            self.fps = self.frames;
            self.frames = 0;
        }
    }

    fn record_frame(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }

    fn fps(&self) -> u32 {
        self.fps
    }
}

/// The simulation root: owns the chunk grid, the entity registry, the
/// player, and the rendering context (cameras, clock, backgrounds). One
/// `update` and one `render` per frame, driven by the engine loop.
pub struct World {
    grid: TileGrid,
    entities: Vec<Entity>,
    entity_ids: EntityIdAllocator,
    player: Player,
    camera: Camera2D,
    clock: DayCycle,
    sky: SkyBackground,
    background: ParallaxBackground,
    sprites: WorldSprites,
    fps: HudFpsCounter,
}

impl World {
    pub fn new(config: &WorldConfig, sprites: &SpriteDatabase) -> Self {
        let mut grid = TileGrid::new(config.width, config.height);
        let (spawn_x, spawn_y) = generate_world(&mut grid, config.seed);

        let camera = Camera2D::new(
            Vec2::new(grid.pixel_width() * 0.5, grid.pixel_height() * 0.5),
            Viewport {
                width: BACKGROUND_VIRTUAL_WIDTH,
                height: BACKGROUND_VIRTUAL_HEIGHT,
            },
        );

        let world_sprites = WorldSprites::resolve(sprites);
        let mut world = Self {
            grid,
            entities: Vec::new(),
            entity_ids: EntityIdAllocator::default(),
            player: Player::new(world_sprites.player),
            camera,
            clock: DayCycle::new(),
            sky: SkyBackground::new(),
            background: ParallaxBackground::new(parallax_layers(sprites)),
            sprites: world_sprites,
            fps: HudFpsCounter::new(),
        };
        world.set_player_position(spawn_x, spawn_y);
        info!(
            seed = config.seed,
            width = world.grid.width(),
            height = world.grid.height(),
            "world_generated"
        );
        world
    }

    pub fn update(&mut self, dt_seconds: f32, input: &InputSnapshot) {
        self.clock.advance(dt_seconds);
        self.grid.update(dt_seconds);

        if input.fire_pressed() {
            self.fire_demat_bullet(input);
        }

        // Fast path: nothing registered, nothing to iterate or sweep.
        if !self.entities.is_empty() {
            for entity in &mut self.entities {
                entity.update(dt_seconds, &mut self.grid);
            }
            self.entities.retain(|entity| !entity.destroyed());
        }

        self.player.update(dt_seconds, input, &self.grid);

        self.camera.position = self
            .player
            .position()
            .offset(CAMERA_FOLLOW_OFFSET_X, CAMERA_FOLLOW_OFFSET_Y);

        self.sky.update(&self.clock);
        self.background.update(
            self.camera.position.x,
            self.camera.position.y,
            self.grid.pixel_width(),
            self.grid.pixel_height(),
        );

        self.fps.roll_window(Instant::now());
    }

    /// Draw order is load-bearing: background under tiles, tiles under
    /// entities, the player topmost, HUD last.
    pub fn render(&mut self, surface: &mut Surface<'_>) {
        surface.set_camera(background_camera());
        self.sky.render(surface);
        surface.set_tint(self.clock.current_color());
        self.background.render(surface);

        self.camera.viewport = surface.window();
        surface.set_camera(self.camera);
        self.grid.render(surface, &self.sprites);
        for entity in &self.entities {
            entity.render(surface);
        }
        self.player.render(surface);

        surface.clear_tint();
        self.render_hud(surface);
        self.fps.record_frame();
    }

    fn render_hud(&self, surface: &mut Surface<'_>) {
        let lines = [
            format!("TIME: {}", self.clock.formatted_time()),
            format!("DAY: {}", self.clock.days()),
            format!("FPS: {}", self.fps.fps()),
        ];
        for (index, line) in lines.iter().enumerate() {
            surface.draw_text_px(
                HUD_MARGIN_PX,
                HUD_MARGIN_PX + index as i32 * HUD_LINE_STEP_PX,
                line,
                HUD_TEXT_COLOR,
            );
        }
    }

    fn fire_demat_bullet(&mut self, input: &InputSnapshot) {
        let Some(cursor) = input.cursor_position_px() else {
            return;
        };
        let (width, height) = input.window_size();
        if width == 0 || height == 0 {
            return;
        }

        let window = Viewport { width, height };
        let aim_camera = Camera2D::new(self.camera.position, window);
        let target = screen_to_world_px(&aim_camera, window, cursor);
        let origin = self
            .player
            .position()
            .offset(PLAYER_WIDTH * 0.5, PLAYER_HEIGHT * 0.5);
        let direction = Vec2::new(target.x - origin.x, target.y - origin.y);
        let id = self.spawn_demat_bullet(origin, direction);
        debug!(entity_id = id.0, "demat_bullet_fired");
    }

    // --- entity registry ---

    pub fn spawn_demat_bullet(&mut self, origin: Vec2, direction: Vec2) -> EntityId {
        let id = self.entity_ids.allocate();
        self.entities.push(Entity::demat_bullet(
            id,
            origin,
            direction,
            self.sprites.demat_bullet,
        ));
        id
    }

    /// Removes by identity. Safe to call between updates; entities that
    /// destroy themselves mid-update are swept by the update pass instead.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let before = self.entities.len();
        self.entities.retain(|entity| entity.id() != id);
        self.entities.len() != before
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    // --- tile surface ---

    pub fn set_tile(&mut self, kind: TileKind, x: i32, y: i32) -> bool {
        self.grid.set_tile(kind, x, y)
    }

    pub fn tile_at(&self, x: f32, y: f32) -> Option<&Tile> {
        self.grid.tile_at(x, y)
    }

    pub fn is_tile_at(&self, x: f32, y: f32) -> bool {
        self.grid.is_tile_at(x, y)
    }

    pub fn tile_handle_at(&self, x: f32, y: f32) -> Option<TileHandle> {
        self.grid.tile_handle_at(x, y)
    }

    pub fn break_tile(&mut self, handle: TileHandle) -> bool {
        self.grid.break_tile(handle)
    }

    pub fn touches_collidable_tile(&self, rect: &Rect) -> bool {
        self.grid.touches_collidable_tile(rect)
    }

    // --- player & context ---

    /// Snaps the player onto the tile grid, addressed by tile index.
    pub fn set_player_position(&mut self, tile_x: i32, tile_y: i32) {
        self.player
            .set_position((tile_x * TILE_SIZE) as f32, (tile_y * TILE_SIZE) as f32);
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn time(&self) -> f32 {
        self.clock.time()
    }

    pub fn time_of_day(&self) -> f32 {
        self.clock.time_of_day()
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }
}

impl Scene for World {
    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
        World::update(self, fixed_dt_seconds, input);
    }

    fn render(&mut self, surface: &mut Surface<'_>) {
        World::render(self, surface);
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
