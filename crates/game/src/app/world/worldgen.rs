/// Generation seed used when the config does not override it. Identical
/// seeds produce identical worlds.
pub const DEFAULT_WORLD_SEED: u64 = 0;

/// Local tile offset of the starter island's anchor inside the centre
/// chunk.
const ISLAND_ANCHOR_LOCAL: i32 = 15;

const ISLAND_TOP_HALF_WIDTH: i32 = 5;
const FLOWER_CHANCE: f64 = 0.35;

/// Populates a fresh grid and returns the tile the player spawns on top
/// of.
fn generate_world(grid: &mut TileGrid, seed: u64) -> (i32, i32) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let anchor_x = (grid.width() / 2) * CHUNK_SIZE + ISLAND_ANCHOR_LOCAL;
    let anchor_y = (grid.height() / 2) * CHUNK_SIZE + ISLAND_ANCHOR_LOCAL;
    place_starter_island(grid, &mut rng, anchor_x, anchor_y);

    (anchor_x, anchor_y + 1)
}

/// A floating island: grass top row, tapering dirt underneath, an
/// unbreakable stone core, and a scattering of flowers on top.
fn place_starter_island(grid: &mut TileGrid, rng: &mut ChaCha8Rng, anchor_x: i32, anchor_y: i32) {
    for x in anchor_x - ISLAND_TOP_HALF_WIDTH..=anchor_x + ISLAND_TOP_HALF_WIDTH {
        place(grid, TileKind::Grass, x, anchor_y);
    }
    for x in anchor_x - 4..=anchor_x + 4 {
        let kind = if (anchor_x - 1..=anchor_x + 1).contains(&x) {
            TileKind::Stone
        } else {
            TileKind::Dirt
        };
        place(grid, kind, x, anchor_y - 1);
    }
    for x in anchor_x - 2..=anchor_x + 2 {
        place(grid, TileKind::Dirt, x, anchor_y - 2);
    }
    for x in anchor_x - ISLAND_TOP_HALF_WIDTH..=anchor_x + ISLAND_TOP_HALF_WIDTH {
        if rng.random_bool(FLOWER_CHANCE) {
            place(grid, TileKind::Flower, x, anchor_y + 1);
        }
    }
}

fn place(grid: &mut TileGrid, kind: TileKind, x: i32, y: i32) {
    if !grid.set_tile(kind, x, y) {
        debug!(x, y, ?kind, "generated_tile_outside_world_skipped");
    }
}
