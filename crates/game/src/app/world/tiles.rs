/// Closed set of tile variants. Solidity gates player collision;
/// breakability gates removal. The two are independent on purpose: stone is
/// collidable but survives bullets, flowers never block movement but
/// dematerialize like anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Grass,
    Dirt,
    Stone,
    Flower,
}

impl TileKind {
    pub fn is_solid(self) -> bool {
        !matches!(self, TileKind::Flower)
    }

    pub fn is_breakable(self) -> bool {
        !matches!(self, TileKind::Stone)
    }

    fn is_animated(self) -> bool {
        matches!(self, TileKind::Flower)
    }

    fn sprite(self, sprites: &WorldSprites) -> SpriteId {
        match self {
            TileKind::Grass => sprites.grass,
            TileKind::Dirt => sprites.dirt,
            TileKind::Stone => sprites.stone,
            TileKind::Flower => sprites.flower,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    kind: TileKind,
    local_x: i32,
    local_y: i32,
    sway_phase: f32,
}

impl Tile {
    fn new(kind: TileKind) -> Self {
        Self {
            kind,
            local_x: 0,
            local_y: 0,
            sway_phase: 0.0,
        }
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn is_solid(&self) -> bool {
        self.kind.is_solid()
    }

    pub fn is_breakable(&self) -> bool {
        self.kind.is_breakable()
    }

    pub fn local_x(&self) -> i32 {
        self.local_x
    }

    pub fn local_y(&self) -> i32 {
        self.local_y
    }

    fn update(&mut self, dt_seconds: f32) {
        if self.kind.is_animated() {
            self.sway_phase = (self.sway_phase + dt_seconds * FLOWER_SWAY_RATE) % TAU;
        }
    }

    fn render(&self, surface: &mut Surface<'_>, sprites: &WorldSprites, world_pos: Vec2) {
        let pos = if self.kind.is_animated() {
            world_pos.offset(0.0, self.sway_phase.sin() * FLOWER_SWAY_AMPLITUDE_PX)
        } else {
            world_pos
        };
        surface.draw_sprite(self.kind.sprite(sprites), pos);
    }
}

/// Fixed CHUNK_SIZE x CHUNK_SIZE block of tile slots. Grid position is
/// immutable after construction; slots are row-major by local coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    chunk_x: i32,
    chunk_y: i32,
    slots: Vec<Option<Tile>>,
}

impl Chunk {
    fn new(chunk_x: i32, chunk_y: i32) -> Self {
        Self {
            chunk_x,
            chunk_y,
            slots: vec![None; (CHUNK_SIZE * CHUNK_SIZE) as usize],
        }
    }

    /// Stores `tile`, overwriting any prior occupant. Local coordinates are
    /// the caller's responsibility; the grid bounds-checks before
    /// delegating here.
    pub fn set_tile(&mut self, tile: Tile, local_x: i32, local_y: i32) {
        debug_assert_eq!((tile.local_x, tile.local_y), (local_x, local_y));
        self.slots[Self::slot_index(local_x, local_y)] = Some(tile);
    }

    pub fn tile(&self, local_x: i32, local_y: i32) -> Option<&Tile> {
        self.slots[Self::slot_index(local_x, local_y)].as_ref()
    }

    pub fn clear_tile(&mut self, local_x: i32, local_y: i32) -> Option<Tile> {
        self.slots[Self::slot_index(local_x, local_y)].take()
    }

    /// Chunk bounds in world pixels, used for broad-phase culling.
    pub fn absolute_rect(&self) -> Rect {
        Rect::new(
            (self.chunk_x * CHUNK_PIXELS) as f32,
            (self.chunk_y * CHUNK_PIXELS) as f32,
            CHUNK_PIXELS as f32,
            CHUNK_PIXELS as f32,
        )
    }

    /// World pixel position of a slot's bottom-left corner.
    fn tile_world_pos(&self, local_x: i32, local_y: i32) -> Vec2 {
        Vec2::new(
            (self.chunk_x * CHUNK_PIXELS + local_x * TILE_SIZE) as f32,
            (self.chunk_y * CHUNK_PIXELS + local_y * TILE_SIZE) as f32,
        )
    }

    fn update(&mut self, dt_seconds: f32) {
        for slot in &mut self.slots {
            if let Some(tile) = slot {
                tile.update(dt_seconds);
            }
        }
    }

    fn render(&self, surface: &mut Surface<'_>, sprites: &WorldSprites) {
        for local_y in 0..CHUNK_SIZE {
            for local_x in 0..CHUNK_SIZE {
                if let Some(tile) = self.tile(local_x, local_y) {
                    tile.render(surface, sprites, self.tile_world_pos(local_x, local_y));
                }
            }
        }
    }

    fn slot_index(local_x: i32, local_y: i32) -> usize {
        debug_assert!((0..CHUNK_SIZE).contains(&local_x));
        debug_assert!((0..CHUNK_SIZE).contains(&local_y));
        (local_x + local_y * CHUNK_SIZE) as usize
    }
}

/// Stable address of an occupied (or formerly occupied) tile slot. Resolved
/// through the grid on every use, so a handle never dangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileHandle {
    chunk_index: usize,
    local_x: i32,
    local_y: i32,
}

/// The chunked tile grid: `width` x `height` chunks, row-major, fully
/// populated at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: i32,
    height: i32,
    chunks: Vec<Chunk>,
}

impl TileGrid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut chunks = Vec::with_capacity((width * height) as usize);
        for chunk_y in 0..height {
            for chunk_x in 0..width {
                chunks.push(Chunk::new(chunk_x, chunk_y));
            }
        }
        Self {
            width,
            height,
            chunks,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn pixel_width(&self) -> f32 {
        (self.width * CHUNK_PIXELS) as f32
    }

    pub fn pixel_height(&self) -> f32 {
        (self.height * CHUNK_PIXELS) as f32
    }

    /// Sole tile-placement entry point, addressed by absolute tile index.
    /// Returns false without mutating anything when the enclosing chunk
    /// lies outside the grid.
    pub fn set_tile(&mut self, kind: TileKind, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let chunk_x = x / CHUNK_SIZE;
        let chunk_y = y / CHUNK_SIZE;
        if chunk_x >= self.width || chunk_y >= self.height {
            return false;
        }

        let local_x = x % CHUNK_SIZE;
        let local_y = y % CHUNK_SIZE;
        let mut tile = Tile::new(kind);
        tile.local_x = local_x;
        tile.local_y = local_y;

        let chunk_index = (chunk_x + chunk_y * self.width) as usize;
        self.chunks[chunk_index].set_tile(tile, local_x, local_y);
        true
    }

    /// Handle of the occupied slot containing the given world pixel, if
    /// any. Out-of-extent positions resolve to nothing.
    pub fn tile_handle_at(&self, x: f32, y: f32) -> Option<TileHandle> {
        if x < 0.0 || x >= self.pixel_width() || y < 0.0 || y >= self.pixel_height() {
            return None;
        }

        let chunk_x = x as i32 / CHUNK_PIXELS;
        let chunk_y = y as i32 / CHUNK_PIXELS;
        let local_x = (x as i32 / TILE_SIZE) % CHUNK_SIZE;
        let local_y = (y as i32 / TILE_SIZE) % CHUNK_SIZE;

        let chunk_index = (chunk_x + chunk_y * self.width) as usize;
        self.chunks[chunk_index]
            .tile(local_x, local_y)
            .map(|_| TileHandle {
                chunk_index,
                local_x,
                local_y,
            })
    }

    pub fn tile_at(&self, x: f32, y: f32) -> Option<&Tile> {
        self.tile_handle_at(x, y).and_then(|handle| self.tile(handle))
    }

    pub fn is_tile_at(&self, x: f32, y: f32) -> bool {
        self.tile_at(x, y).is_some()
    }

    pub fn tile(&self, handle: TileHandle) -> Option<&Tile> {
        self.chunks
            .get(handle.chunk_index)
            .and_then(|chunk| chunk.tile(handle.local_x, handle.local_y))
    }

    /// Bounds of the handle's slot in world pixels.
    pub fn tile_rect(&self, handle: TileHandle) -> Option<Rect> {
        let chunk = self.chunks.get(handle.chunk_index)?;
        let pos = chunk.tile_world_pos(handle.local_x, handle.local_y);
        Some(Rect::new(pos.x, pos.y, TILE_SIZE as f32, TILE_SIZE as f32))
    }

    /// Clears the slot when its occupant is breakable; breaking an
    /// unbreakable or already-empty slot is a silent no-op.
    pub fn break_tile(&mut self, handle: TileHandle) -> bool {
        let Some(tile) = self.tile(handle) else {
            return false;
        };
        if !tile.is_breakable() {
            return false;
        }
        self.chunks[handle.chunk_index]
            .clear_tile(handle.local_x, handle.local_y)
            .is_some()
    }

    /// Broad phase over chunk rects, then a full slot scan of each
    /// candidate chunk, short-circuiting on the first solid overlap.
    /// O(chunks * CHUNK_SIZE^2) worst case; fine at this world's scale, a
    /// per-chunk index over solid tiles would remove the full scan.
    pub fn touches_collidable_tile(&self, rect: &Rect) -> bool {
        for chunk in &self.chunks {
            if !chunk.absolute_rect().overlaps(rect) {
                continue;
            }
            for local_y in 0..CHUNK_SIZE {
                for local_x in 0..CHUNK_SIZE {
                    let Some(tile) = chunk.tile(local_x, local_y) else {
                        continue;
                    };
                    if !tile.is_solid() {
                        continue;
                    }
                    let pos = chunk.tile_world_pos(local_x, local_y);
                    let tile_rect =
                        Rect::new(pos.x, pos.y, TILE_SIZE as f32, TILE_SIZE as f32);
                    if tile_rect.overlaps(rect) {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn update(&mut self, dt_seconds: f32) {
        for chunk in &mut self.chunks {
            chunk.update(dt_seconds);
        }
    }

    fn render(&self, surface: &mut Surface<'_>, sprites: &WorldSprites) {
        for chunk in &self.chunks {
            chunk.render(surface, sprites);
        }
    }
}
