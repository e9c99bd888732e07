pub mod app;

pub use app::world::{
    Chunk, Entity, EntityId, EntityKind, Tile, TileGrid, TileHandle, TileKind, World, CHUNK_PIXELS,
    CHUNK_SIZE, DEFAULT_WORLD_SEED, TILE_SIZE,
};
